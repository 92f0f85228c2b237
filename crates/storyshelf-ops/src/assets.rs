//! Bundling the built storybook into a docset output directory.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{OpsError, OpsResult};

/// Appended to the bundled `index.html`: full-width preview, no drag handle.
pub const LAYOUT_OVERRIDES: &str = r#"
<style>
  .css-sqdry3, .css-sqdry3 + div {
    left: 0 !important;
    width: 100% !important;
  }
  .react-draggable {
    display: none !important;
  }
</style>
"#;

/// A directory to copy into the output, plus snippets to append to files in it.
#[derive(Debug, Clone)]
pub struct Inclusion {
    /// Directory to copy.
    pub source: PathBuf,
    /// Name of the copy inside the output directory.
    pub root_dir_name: String,
    /// Relative file path and the text appended to its end.
    pub append_to_bottom: Vec<(PathBuf, String)>,
}

impl Inclusion {
    /// Include `source` under `root_dir_name` with nothing appended.
    pub fn new(source: impl Into<PathBuf>, root_dir_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            root_dir_name: root_dir_name.into(),
            append_to_bottom: Vec::new(),
        }
    }

    /// Append `snippet` to the end of `file` after copying.
    pub fn append(mut self, file: impl Into<PathBuf>, snippet: impl Into<String>) -> Self {
        self.append_to_bottom.push((file.into(), snippet.into()));
        self
    }
}

/// Copy the included directory into `output` and apply appends.
///
/// Returns the path of the copied directory.
pub fn include_dir(inclusion: &Inclusion, output: &Path) -> OpsResult<PathBuf> {
    let dest = output.join(&inclusion.root_dir_name);
    let copied = copy_tree(&inclusion.source, &dest)?;
    info!(source = %inclusion.source.display(), dest = %dest.display(), files = copied, "Included directory");

    for (file, snippet) in &inclusion.append_to_bottom {
        let path = dest.join(file);
        if path.is_file() {
            append_to_bottom(&path, snippet)?;
        } else {
            debug!(path = %path.display(), "Nothing to append to");
        }
    }

    Ok(dest)
}

/// Recursively copy `source` to `dest`, returning the number of files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> OpsResult<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|err| OpsError::path_resolution(source, err.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| OpsError::path_resolution(entry.path(), err.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Append `snippet` to the end of the file at `path`.
pub fn append_to_bottom(path: &Path, snippet: &str) -> OpsResult<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(snippet.as_bytes())?;
    Ok(())
}
