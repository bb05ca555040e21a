//! Save Queue
//!
//! Ordered buffer of pending edits. Edits for the same key are never merged:
//! the receiver applies them in order and the last one wins.

use crate::domain::{EditBatch, PendingEdit, PerCategory};

/// Pending edits waiting for the next flush
#[derive(Debug, Clone, Default)]
pub struct SaveQueue {
    edits: Vec<PendingEdit>,
}

impl SaveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edit to the tail
    pub fn push(&mut self, edit: PendingEdit) {
        self.edits.push(edit);
    }

    /// Take every queued edit, leaving the queue empty
    pub fn drain(&mut self) -> EditBatch {
        std::mem::take(&mut self.edits)
    }

    /// Number of queued edits per category
    pub fn counts(&self) -> PerCategory<usize> {
        self.edits
            .iter()
            .fold(PerCategory::default(), |mut counts, edit| {
                counts[edit.category] += 1;
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingEdit> {
        self.edits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, SettingKey};
    use serde_json::json;

    fn edit(key: SettingKey, data: serde_json::Value) -> PendingEdit {
        PendingEdit::new(key.category(), key, data)
    }

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = SaveQueue::new();
        queue.push(edit(SettingKey::Autostart, json!(true)));
        queue.push(edit(SettingKey::Teams, json!([])));
        queue.push(edit(SettingKey::UseSpellChecker, json!(false)));

        let batch = queue.drain();
        let keys: Vec<_> = batch.iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![SettingKey::Autostart, SettingKey::Teams, SettingKey::UseSpellChecker]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let mut queue = SaveQueue::new();
        queue.push(edit(SettingKey::Autostart, json!(true)));
        queue.push(edit(SettingKey::Autostart, json!(false)));

        assert_eq!(queue.len(), 2);
        let batch = queue.drain();
        assert_eq!(batch[0].data, json!(true));
        assert_eq!(batch[1].data, json!(false));
    }

    #[test]
    fn test_counts_per_category() {
        let mut queue = SaveQueue::new();
        queue.push(edit(SettingKey::Autostart, json!(true)));
        queue.push(edit(SettingKey::ShowTrayIcon, json!(true)));
        queue.push(edit(SettingKey::Teams, json!([])));

        let counts = queue.counts();
        assert_eq!(counts[Category::AppOptions], 2);
        assert_eq!(counts[Category::Servers], 1);
    }
}
