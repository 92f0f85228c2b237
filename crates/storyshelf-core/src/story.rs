//! Story group records and story-id helpers.

use serde::{Deserialize, Serialize};

/// One grouping call and the variants registered on it, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGroup {
    /// Group name, e.g. `Buttons` or `Example/Forms`.
    pub name: String,
    /// Variant names in the order they were added.
    pub variants: Vec<String>,
}

impl StoryGroup {
    /// Create a group with the given name and variants.
    pub fn new(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Viewer ids of every variant, in order.
    pub fn story_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.variants
            .iter()
            .map(move |variant| story_id(&self.name, variant))
    }
}

/// Normalize one part of a story id.
///
/// Lower-cases, collapses every run of non-alphanumeric characters into a
/// single `-`, and trims dashes from both ends.
pub fn sanitize(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut pending_dash = false;

    for ch in part.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Viewer id for a variant of a group: `<group>--<variant>`.
pub fn story_id(group: &str, variant: &str) -> String {
    format!("{}--{}", sanitize(group), sanitize(variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize("Example/Button"), "example-button");
        assert_eq!(sanitize("  With  Spaces  "), "with-spaces");
        assert_eq!(sanitize("snake_case__name"), "snake-case-name");
        assert_eq!(sanitize("--Already-Dashed--"), "already-dashed");
    }

    #[test]
    fn test_sanitize_keeps_non_ascii_letters() {
        assert_eq!(sanitize("Café Menu"), "café-menu");
    }

    #[test]
    fn test_story_id_joins_with_double_dash() {
        assert_eq!(story_id("Example/Button", "Primary"), "example-button--primary");
        assert_eq!(story_id("Forms", "With Label"), "forms--with-label");
    }

    #[test]
    fn test_story_ids_follow_variant_order() {
        let group = StoryGroup::new("Buttons", vec!["Primary".into(), "Secondary".into()]);
        let ids: Vec<_> = group.story_ids().collect();
        assert_eq!(ids, vec!["buttons--primary", "buttons--secondary"]);
    }

    #[test]
    fn test_story_group_serializes_name_and_variants() {
        let group = StoryGroup::new("Buttons", vec!["Primary".into()]);
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Buttons", "variants": ["Primary"] })
        );
    }
}
