use std::{fmt::Display, ops::Deref};

/// A non negative percentage. Values above 100 are representable, callers clamp where that
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0.round())
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);
    pub const FULL: Percentage = Percentage(100.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    pub fn clamp_to_full(self) -> Percentage {
        Percentage(self.0.min(100.))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// `part` of `whole` as a percentage, capped at 100. A non positive `whole` or a negative `part`
/// gives zero.
pub fn ratio_percentage(part: i64, whole: i64) -> Percentage {
    if whole <= 0 {
        return Percentage::ZERO;
    }
    Percentage::new_opt(part as f64 / whole as f64 * 100.)
        .map(Percentage::clamp_to_full)
        .unwrap_or(Percentage::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_capped() {
        assert_eq!(ratio_percentage(3, 4), Percentage(75.));
        assert_eq!(ratio_percentage(12, 4), Percentage::FULL);
        assert_eq!(ratio_percentage(1, 0), Percentage::ZERO);
        assert_eq!(ratio_percentage(-1, 4), Percentage::ZERO);
    }

    #[test]
    fn display_rounds() {
        assert_eq!(ratio_percentage(1, 3).to_string(), "33%");
    }
}
