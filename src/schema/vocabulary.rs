use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The candidate fragments bound to each named slot.
///
/// Fragment order is kept as written; selection is uniform so order only
/// matters for seeded reproducibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularySet {
    slots: FxHashMap<String, Vec<String>>,
}

impl VocabularySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `fragments` to `slot`, replacing any previous binding.
    pub fn insert<S, I, F>(&mut self, slot: S, fragments: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.slots
            .insert(slot.into(), fragments.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`VocabularySet::insert`].
    pub fn with_slot<S, I, F>(mut self, slot: S, fragments: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.insert(slot, fragments);
        self
    }

    pub fn get(&self, slot: &str) -> Option<&[String]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Overlay `other` onto this set. Slots in `other` replace slots of the
    /// same name here.
    pub fn merge(&mut self, other: VocabularySet) {
        for (slot, fragments) in other.slots {
            self.slots.insert(slot, fragments);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let vocab = VocabularySet::new().with_slot("adjective", ["calm", "busy"]);
        assert_eq!(
            vocab.get("adjective"),
            Some(&["calm".to_string(), "busy".to_string()][..])
        );
        assert!(vocab.get("action").is_none());
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn merge_precedence() {
        let mut base = VocabularySet::new()
            .with_slot("shared", ["base version"])
            .with_slot("base_only", ["only in base"]);
        let overlay = VocabularySet::new().with_slot("shared", ["override version"]);

        base.merge(overlay);

        assert_eq!(base.get("shared").unwrap()[0], "override version");
        assert!(base.contains("base_only"));
    }

    #[test]
    fn empty_slot_is_still_bound() {
        let vocab = VocabularySet::new().with_slot("empty", Vec::<String>::new());
        assert!(vocab.contains("empty"));
        assert_eq!(vocab.get("empty").map(<[String]>::len), Some(0));
    }
}
