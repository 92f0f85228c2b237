//! Docset manifest composition.
//!
//! A manifest maps a display path (`Button/Primary`) to the viewer URL that
//! opens that story inside the bundled storybook.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use storyshelf_core::{story_id, StoryGroup};

use crate::extract::StoryMeta;

/// Directory name the storybook is bundled under inside the docset.
pub const STORYBOOK_ROOT: &str = "storybook";

static INTRODUCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Example/Introduction").expect("valid pattern"));
static EXAMPLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^examples?/").expect("valid pattern"));

/// Docset entries, grouped by entry type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsetEntries {
    /// Component entries: display path to viewer URL.
    #[serde(rename = "Component", default)]
    pub component: BTreeMap<String, String>,
}

impl DocsetEntries {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries from extracted toolchain metadata.
    pub fn from_stories<'a>(stories: impl IntoIterator<Item = &'a StoryMeta>) -> Self {
        let mut entries = Self::new();
        for story in stories {
            entries.insert_story(&story.kind, &story.name, &story.id);
        }
        entries
    }

    /// Entries from scanned story groups.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a StoryGroup>) -> Self {
        let mut entries = Self::new();
        for group in groups {
            for variant in &group.variants {
                entries.insert_story(&group.name, variant, &story_id(&group.name, variant));
            }
        }
        entries
    }

    /// Single generic entry used when no story metadata is available.
    pub fn degraded() -> Self {
        let mut entries = Self::new();
        entries.component.insert(
            "Storybook".to_string(),
            format!("{}/index.html", STORYBOOK_ROOT),
        );
        entries
    }

    /// Add one story. Returns `false` for introduction pages, which are skipped.
    pub fn insert_story(&mut self, kind: &str, name: &str, id: &str) -> bool {
        if is_introduction(kind) {
            return false;
        }
        self.component.insert(display_path(kind, name), story_url(id));
        true
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.component.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.component.is_empty()
    }
}

/// Whether a group is the toolchain's introductory example page.
pub fn is_introduction(kind: &str) -> bool {
    INTRODUCTION.is_match(kind)
}

/// `kind/name` with a leading `example/` or `examples/` removed.
pub fn display_path(kind: &str, name: &str) -> String {
    format!("{}/{}", EXAMPLE_PREFIX.replace(kind, ""), name)
}

/// Viewer URL for a story id.
pub fn story_url(id: &str) -> String {
    format!("{}/index.html?path=/story/{}", STORYBOOK_ROOT, id)
}
