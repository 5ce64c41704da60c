pub mod check;
pub mod count;
pub mod summarize;

use std::path::Path;

/// File name shown in messages (`newman.log`), or the whole path if it has none.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
