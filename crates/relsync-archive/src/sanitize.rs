use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an archive entry path against `base`, refusing anything that
/// would land outside of it.
pub fn sanitize_path<P: AsRef<Path>, B: AsRef<Path>>(entry_path: P, base: B) -> Result<SanitizedPath> {
    let entry_path = entry_path.as_ref();
    let zip_slip = |resolved: PathBuf| Error::ZipSlip {
        entry: entry_path.to_path_buf(),
        resolved,
    };

    // `None` means a `..` climbed above the archive root
    let normalized = normalize_path(entry_path).ok_or_else(|| zip_slip(entry_path.to_path_buf()))?;

    // Reject absolute paths (zip-slip protection)
    if normalized.is_absolute() || normalized.has_root() {
        return Err(zip_slip(normalized));
    }

    Ok(SanitizedPath {
        original: entry_path.to_path_buf(),
        resolved: base.as_ref().join(normalized),
    })
}

/// Resolve `.` and `..` lexically.
fn normalize_path(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::ParentDir => {
                depth = depth.checked_sub(1)?;
                result.pop();
            }
            Component::Normal(part) => {
                result.push(part);
                depth += 1;
            }
            Component::RootDir | Component::Prefix(_) => result.push(component.as_os_str()),
            Component::CurDir => {}
        }
    }

    Some(result)
}
