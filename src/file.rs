//! Parameter file discovery.
//!
//! Each [`SearchPath`] is resolved to a directory and checked for the file
//! name. [`SearchPath::Tree`] additionally descends into subdirectories, so a
//! script can find its parameter file anywhere below the project root.
//!
//! The list is priority-ascending, so it is searched from the end and the
//! first hit wins. Unreadable directories are skipped; only a complete miss is
//! an error.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::ParafileError;
use crate::types::SearchPath;

/// Extension appended to file names given without one.
pub const FILE_EXTENSION: &str = "para";

/// `"input"` → `"input.para"`; names that already have an extension are kept.
pub fn normalize_file_name(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.{FILE_EXTENSION}")
    }
}

/// Resolve a [`SearchPath`] to the directory it names.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) | SearchPath::Tree(p) => Some(p.clone()),
    }
}

/// Find `file_name` in the search paths, highest priority first.
pub fn locate(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: &str,
) -> Result<PathBuf, ParafileError> {
    for sp in search_paths.iter().rev() {
        let Some(dir) = resolve_search_path(sp, app_name) else {
            continue;
        };
        let found = match sp {
            SearchPath::Tree(_) => walk(&dir, file_name),
            _ => Some(dir.join(file_name)).filter(|p| p.is_file()),
        };
        if let Some(path) = found {
            debug!(path = %path.display(), "located parameter file");
            return Ok(path);
        }
    }

    Err(ParafileError::FileNotFound {
        name: file_name.to_string(),
    })
}

/// Depth-first search below `dir`: a directory's own file is checked before
/// its subdirectories, and subdirectories are visited in name order.
/// Symlinked directories are not followed; unreadable ones are skipped.
pub fn walk(dir: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_key(|entry| (entry.file_type().is_dir(), entry.file_name().to_os_string()))
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| entry.file_name() == file_name && entry.path().is_file())
        .map(DirEntry::into_path)
}
