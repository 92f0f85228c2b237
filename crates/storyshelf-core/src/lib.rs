//! Core of Storyshelf: story metadata scanning for component-library sources.
//!
//! The [`scanner`] module harvests `storiesOf('Group').add('Variant', ...)`
//! registrations from raw source text. It is the fallback used when the
//! regular story toolchain cannot produce a metadata manifest.

pub mod error;
pub mod scanner;
pub mod story;

pub use error::{ScanError, ScanResult};
pub use scanner::{parse_story_module, ScanOptions, StoryScanner};
pub use story::{sanitize, story_id, StoryGroup};
