//! Short user facing messages, the terminal counterpart of the dashboard toasts.

use ansi_term::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotificationLevel);
}

/// Prints notifications on their own line, coloured by level.
pub struct ConsoleNotifier {
    colored: bool,
}

impl ConsoleNotifier {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, level: NotificationLevel) {
        if !self.colored {
            println!("{message}");
            return;
        }
        let colour = match level {
            NotificationLevel::Success => Colour::Green,
            NotificationLevel::Info => Colour::Blue,
            NotificationLevel::Warning => Colour::Yellow,
            NotificationLevel::Error => Colour::Red,
        };
        println!("{}", colour.bold().paint(message));
    }
}
