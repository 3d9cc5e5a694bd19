use std::{collections::HashMap, sync::Arc};

/// Description shown when nothing is configured for a block.
pub const NO_DETAILS: &str = "No hay detalles adicionales para esta tarea.";

/// Description attached to an activity label. Only the curriculum study label is keyed by
/// topic, every other label has a single text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEntry {
    Plain(Arc<str>),
    ByTopic(HashMap<Arc<str>, Arc<str>>),
}

#[derive(Debug, Clone)]
pub struct TopicDetailIndex {
    entries: HashMap<Arc<str>, DetailEntry>,
    fallback_topic: Arc<str>,
}

impl TopicDetailIndex {
    /// `fallback_topic` is looked up inside a [DetailEntry::ByTopic] entry when the requested
    /// topic has no text of its own.
    pub fn new(fallback_topic: Arc<str>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback_topic,
        }
    }

    pub fn with_plain(mut self, label: &str, text: &str) -> Self {
        self.entries
            .insert(label.into(), DetailEntry::Plain(text.into()));
        self
    }

    pub fn with_topics<'a>(
        mut self,
        label: &str,
        topics: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let topics = topics
            .into_iter()
            .map(|(topic, text)| (Arc::from(topic), Arc::from(text)))
            .collect();
        self.entries.insert(label.into(), DetailEntry::ByTopic(topics));
        self
    }

    pub fn entry(&self, label: &str) -> Option<&DetailEntry> {
        self.entries.get(label)
    }

    /// Resolves the description for a block. Never fails, missing entries fall back to
    /// [NO_DETAILS].
    pub fn describe(&self, activity_label: &str, resolved_topic: Option<&str>) -> Arc<str> {
        match self.entry(activity_label) {
            Some(DetailEntry::Plain(text)) => text.clone(),
            Some(DetailEntry::ByTopic(topics)) => resolved_topic
                .and_then(|topic| topics.get(topic))
                .or_else(|| topics.get(&self.fallback_topic))
                .cloned()
                .unwrap_or_else(|| NO_DETAILS.into()),
            None => NO_DETAILS.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TopicDetailIndex, NO_DETAILS};

    fn index() -> TopicDetailIndex {
        TopicDetailIndex::new("review".into())
            .with_plain("Anki", "cards")
            .with_topics("Study", [("loops", "write loops"), ("review", "go over it")])
    }

    #[test]
    fn plain_entry_ignores_topic() {
        let index = index();
        assert_eq!(index.describe("Anki", None).as_ref(), "cards");
        assert_eq!(index.describe("Anki", Some("loops")).as_ref(), "cards");
    }

    #[test]
    fn topic_entry_uses_topic_then_fallback_topic() {
        let index = index();
        assert_eq!(index.describe("Study", Some("loops")).as_ref(), "write loops");
        assert_eq!(index.describe("Study", Some("numpy")).as_ref(), "go over it");
        assert_eq!(index.describe("Study", None).as_ref(), "go over it");
    }

    #[test]
    fn missing_fallback_topic_gives_fixed_text() {
        let index = TopicDetailIndex::new("absent".into()).with_topics("Study", [("loops", "x")]);
        assert_eq!(index.describe("Study", Some("numpy")).as_ref(), NO_DETAILS);
    }

    #[test]
    fn unknown_label_gives_fixed_text() {
        assert_eq!(index().describe("Lunch", None).as_ref(), NO_DETAILS);
    }
}
