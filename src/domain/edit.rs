//! Edit - A single pending change to the configuration store

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration partition with its own save/indicator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Server list
    #[serde(rename = "servers")]
    Servers,
    /// Flat app option settings
    #[serde(rename = "appOptions")]
    AppOptions,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 2] = [Category::Servers, Category::AppOptions];

    /// Index into per-category arrays
    pub fn index(self) -> usize {
        match self {
            Category::Servers => 0,
            Category::AppOptions => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Servers => "servers",
            Category::AppOptions => "appOptions",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per category, indexable by [`Category`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerCategory<T>([T; 2]);

impl<T> PerCategory<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self(Category::ALL.map(&mut f))
    }

    /// Pairs of (category, value) in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> std::ops::Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.0[category.index()]
    }
}

impl<T> std::ops::IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }
}

/// Top-level configuration key an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    Teams,
    ShowTrayIcon,
    TrayIconTheme,
    MinimizeToTray,
    Notifications,
    ShowUnreadBadge,
    UseSpellChecker,
    EnableHardwareAcceleration,
    Autostart,
}

impl SettingKey {
    /// Category this key belongs to
    pub fn category(self) -> Category {
        match self {
            SettingKey::Teams => Category::Servers,
            _ => Category::AppOptions,
        }
    }

    /// Field name in the stored JSON document
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Teams => "teams",
            SettingKey::ShowTrayIcon => "showTrayIcon",
            SettingKey::TrayIconTheme => "trayIconTheme",
            SettingKey::MinimizeToTray => "minimizeToTray",
            SettingKey::Notifications => "notifications",
            SettingKey::ShowUnreadBadge => "showUnreadBadge",
            SettingKey::UseSpellChecker => "useSpellChecker",
            SettingKey::EnableHardwareAcceleration => "enableHardwareAcceleration",
            SettingKey::Autostart => "autostart",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queued change, as sent over the wire
///
/// Serialized as `{"configType": ..., "key": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEdit {
    #[serde(rename = "configType")]
    pub category: Category,
    pub key: SettingKey,
    pub data: Value,
}

impl PendingEdit {
    pub fn new(category: Category, key: SettingKey, data: Value) -> Self {
        Self {
            category,
            key,
            data,
        }
    }
}

/// Ordered batch of edits sent in one flush
pub type EditBatch = Vec<PendingEdit>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edit_wire_format() {
        let edit = PendingEdit::new(Category::AppOptions, SettingKey::UseSpellChecker, json!(false));
        let value = serde_json::to_value(&edit).expect("serialize");
        assert_eq!(
            value,
            json!({"configType": "appOptions", "key": "useSpellChecker", "data": false})
        );
    }

    #[test]
    fn test_key_names_match_serde() {
        let keys = [
            SettingKey::Teams,
            SettingKey::ShowTrayIcon,
            SettingKey::TrayIconTheme,
            SettingKey::MinimizeToTray,
            SettingKey::Notifications,
            SettingKey::ShowUnreadBadge,
            SettingKey::UseSpellChecker,
            SettingKey::EnableHardwareAcceleration,
            SettingKey::Autostart,
        ];
        for key in keys {
            let value = serde_json::to_value(key).expect("serialize");
            assert_eq!(value, Value::String(key.as_str().to_string()));
        }
    }

    #[test]
    fn test_key_categories() {
        assert_eq!(SettingKey::Teams.category(), Category::Servers);
        assert_eq!(SettingKey::Autostart.category(), Category::AppOptions);
        assert_eq!(Category::ALL.map(Category::index), [0, 1]);
    }

    #[test]
    fn test_per_category_indexing() {
        let mut counts = PerCategory::<usize>::default();
        counts[Category::AppOptions] += 3;

        assert_eq!(counts[Category::Servers], 0);
        assert_eq!(counts[Category::AppOptions], 3);

        let labels = PerCategory::from_fn(|c| c.as_str());
        let collected: Vec<_> = labels.iter().map(|(c, l)| (c, *l)).collect();
        assert_eq!(
            collected,
            vec![(Category::Servers, "servers"), (Category::AppOptions, "appOptions")]
        );
    }
}
