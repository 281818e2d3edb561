pub mod color;
pub mod json;
pub mod png;

use std::path::Path;

use crate::error::{Result, SpectrogramError};

/// Create the directory an output file will land in, if it does not exist yet.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| SpectrogramError::io(dir, e))
        }
        _ => Ok(()),
    }
}
