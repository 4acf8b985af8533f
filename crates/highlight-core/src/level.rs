//! Highlight level configuration.
//!
//! Levels are style descriptors referenced by
//! [`HighlightSpan::level`](crate::span::HighlightSpan::level). They are owned by the
//! host application; the engine only reads their ids.

use crate::span::LevelId;
use serde::{Deserialize, Serialize};

/// A highlight style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightLevel {
    /// Stable id referenced by spans.
    pub id: LevelId,
    /// Display name.
    pub name: String,
    /// Render in bold.
    pub bold: bool,
    /// Render underlined.
    pub underline: bool,
    /// Font size as a percentage of the base size (100 = unchanged).
    pub font_size: u32,
    /// Optional foreground color (host-defined format, e.g. `#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub color: Option<String>,
    /// Optional background color.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub background_color: Option<String>,
}

/// Older configurations stored "no color" as an empty string.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl HighlightLevel {
    /// A level with no styling.
    pub fn plain(id: LevelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bold: false,
            underline: false,
            font_size: 100,
            color: None,
            background_color: None,
        }
    }

    /// Returns `true` if rendering with this level looks like unhighlighted text.
    pub fn is_plain(&self) -> bool {
        !self.bold
            && !self.underline
            && self.font_size == 100
            && self.color.is_none()
            && self.background_color.is_none()
    }

    /// `base` scaled by this level's font size percentage.
    pub fn effective_size(&self, base: f32) -> f32 {
        base * self.font_size as f32 / 100.0
    }

    fn apply(&mut self, update: LevelUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(bold) = update.bold {
            self.bold = bold;
        }
        if let Some(underline) = update.underline {
            self.underline = underline;
        }
        if let Some(font_size) = update.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(background_color) = update.background_color {
            self.background_color = background_color;
        }
    }
}

/// A partial update to a [`HighlightLevel`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New bold flag.
    pub bold: Option<bool>,
    /// New underline flag.
    pub underline: Option<bool>,
    /// New font size percentage.
    pub font_size: Option<u32>,
    /// New foreground color (`Some(None)` clears it).
    pub color: Option<Option<String>>,
    /// New background color (`Some(None)` clears it).
    pub background_color: Option<Option<String>>,
}

/// The ordered list of configured levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightLevels {
    levels: Vec<HighlightLevel>,
}

impl Default for HighlightLevels {
    fn default() -> Self {
        Self::defaults()
    }
}

impl HighlightLevels {
    /// Build from an explicit list.
    pub fn new(levels: Vec<HighlightLevel>) -> Self {
        Self { levels }
    }

    /// The built-in three-level configuration.
    pub fn defaults() -> Self {
        let mut highest = HighlightLevel::plain(1, "Level 1 (Highest)");
        highest.bold = true;
        highest.underline = true;

        let mut second = HighlightLevel::plain(2, "Level 2");
        second.bold = true;

        let mut third = HighlightLevel::plain(3, "Level 3");
        third.underline = true;

        Self::new(vec![highest, second, third])
    }

    /// Look up a level by id.
    pub fn get(&self, id: LevelId) -> Option<&HighlightLevel> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Check if a level id is configured.
    pub fn contains(&self, id: LevelId) -> bool {
        self.get(id).is_some()
    }

    /// Apply a partial update. Returns `false` if no level has `id`.
    pub fn update(&mut self, id: LevelId, update: LevelUpdate) -> bool {
        match self.levels.iter_mut().find(|l| l.id == id) {
            Some(level) => {
                level.apply(update);
                true
            }
            None => false,
        }
    }

    /// Append a plain level with id `max + 1` and return its id.
    ///
    /// Returns `None`, leaving the levels unchanged, if the largest id is `LevelId::MAX`.
    pub fn add_level(&mut self) -> Option<LevelId> {
        let id = self
            .levels
            .iter()
            .map(|l| l.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)?;
        self.levels.push(HighlightLevel::plain(id, format!("Level {id}")));
        Some(id)
    }

    /// Remove a level. Spans referring to it render unstyled until removed.
    pub fn remove_level(&mut self, id: LevelId) -> Option<HighlightLevel> {
        let pos = self.levels.iter().position(|l| l.id == id)?;
        Some(self.levels.remove(pos))
    }

    /// Restore the built-in configuration.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::defaults();
    }

    /// Levels in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &HighlightLevel> {
        self.levels.iter()
    }

    /// Levels as a slice.
    pub fn as_slice(&self) -> &[HighlightLevel] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if no levels are configured.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let levels = HighlightLevels::defaults();
        assert_eq!(levels.len(), 3);
        let first = levels.get(1).unwrap();
        assert!(first.bold && first.underline);
        assert_eq!(first.name, "Level 1 (Highest)");
        assert!(levels.get(2).unwrap().bold);
        assert!(!levels.get(2).unwrap().underline);
        assert!(levels.get(3).unwrap().underline);
        assert!(levels.iter().all(|l| l.font_size == 100));
    }

    #[test]
    fn test_add_uses_max_id_plus_one() {
        let mut levels = HighlightLevels::defaults();
        levels.remove_level(2);
        assert_eq!(levels.add_level(), Some(4));
        assert_eq!(levels.get(4).unwrap().name, "Level 4");
        assert!(levels.get(4).unwrap().is_plain());

        let mut empty = HighlightLevels::new(Vec::new());
        assert_eq!(empty.add_level(), Some(1));
    }

    #[test]
    fn test_add_level_after_max_id_fails() {
        let mut levels = HighlightLevels::new(vec![HighlightLevel::plain(LevelId::MAX, "Last")]);
        assert_eq!(levels.add_level(), None);
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_partial_update() {
        let mut levels = HighlightLevels::defaults();
        assert!(levels.update(
            3,
            LevelUpdate {
                font_size: Some(150),
                color: Some(Some("#ff0000".to_string())),
                ..Default::default()
            }
        ));
        let level = levels.get(3).unwrap();
        assert_eq!(level.font_size, 150);
        assert_eq!(level.color.as_deref(), Some("#ff0000"));
        assert!(level.underline);
        assert_eq!(level.effective_size(8.0), 12.0);

        assert!(!levels.update(9, LevelUpdate::default()));
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut levels = HighlightLevels::new(Vec::new());
        levels.reset_to_defaults();
        assert_eq!(levels, HighlightLevels::defaults());
    }

    #[test]
    fn test_serde_camel_case_and_empty_colors() {
        let json = r##"[{"id":1,"name":"L1","bold":true,"underline":false,"fontSize":120,"backgroundColor":"","color":"#000"}]"##;
        let levels: HighlightLevels = serde_json::from_str(json).unwrap();
        let level = levels.get(1).unwrap();
        assert_eq!(level.font_size, 120);
        assert_eq!(level.background_color, None);
        assert_eq!(level.color.as_deref(), Some("#000"));

        let out = serde_json::to_string(&levels).unwrap();
        assert!(out.contains("\"fontSize\":120"));
        assert!(!out.contains("backgroundColor"));
    }
}
