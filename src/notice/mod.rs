//! notice
//!
//! One-time advice for adding `rvn` to the search path.
//!
//! # Design
//!
//! The "already advised" state lives behind the [`NoticeMarker`] trait:
//!
//! - [`FileMarker`]: an empty file under the user config directory
//! - [`MemoryMarker`]: in-memory state for tests
//!
//! [`advise_once`] prints the notice only when the marker is absent and the
//! entry point cannot be found on `$PATH`, then sets the marker so the
//! notice never repeats. Callers treat every failure here as non-fatal.

mod marker;

pub use marker::{FileMarker, MemoryMarker, NoticeError, NoticeMarker};

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the installed entry point.
pub const ENTRY_POINT: &str = "rvn";

/// Whether an executable named `entry` exists in some `path_var` directory.
pub fn on_search_path(entry: &str, path_var: Option<&OsStr>) -> bool {
    let Some(path_var) = path_var else {
        return false;
    };
    std::env::split_paths(path_var).any(|dir| is_executable(&dir.join(entry)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Render the notice for an entry point installed in `install_dir`.
pub fn notice_text(install_dir: Option<&Path>) -> String {
    match install_dir {
        Some(dir) => format!(
            "hint: '{ENTRY_POINT}' is not on your PATH. Add it with:\n\
             \n    export PATH=\"{}:$PATH\"\n\
             \nThis notice is shown only once.",
            dir.display()
        ),
        None => format!(
            "hint: '{ENTRY_POINT}' is not on your PATH. Add the directory that \
             contains it to PATH.\nThis notice is shown only once."
        ),
    }
}

/// Inputs for [`advise_once`].
#[derive(Debug, Clone, Default)]
pub struct Advice {
    /// Whether the entry point resolves on the search path.
    pub on_path: bool,
    /// Directory holding the running executable, if known.
    pub install_dir: Option<PathBuf>,
}

impl Advice {
    /// Probe the current process environment.
    pub fn from_env() -> Self {
        Self {
            on_path: on_search_path(ENTRY_POINT, std::env::var_os("PATH").as_deref()),
            install_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }
}

/// Print the search-path notice once.
///
/// Returns `Ok(true)` if the notice was printed.
///
/// # Errors
///
/// Returns `NoticeError` if the marker cannot be read or written. The
/// notice may already have been printed when marking fails.
pub fn advise_once<W: Write>(
    marker: &dyn NoticeMarker,
    advice: &Advice,
    err: &mut W,
) -> Result<bool, NoticeError> {
    if marker.has_been_notified()? || advice.on_path {
        return Ok(false);
    }

    writeln!(err, "{}", notice_text(advice.install_dir.as_deref()))
        .map_err(NoticeError::Write)?;
    marker.mark_notified()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn off_path() -> Advice {
        Advice {
            on_path: false,
            install_dir: Some(PathBuf::from("/opt/raven/bin")),
        }
    }

    #[test]
    fn notice_printed_once() {
        let marker = MemoryMarker::default();
        let mut err = Vec::<u8>::new();

        assert!(advise_once(&marker, &off_path(), &mut err).unwrap());
        assert!(marker.has_been_notified().unwrap());
        assert!(!advise_once(&marker, &off_path(), &mut err).unwrap());

        let text = String::from_utf8(err).unwrap();
        assert_eq!(text.matches("hint:").count(), 1);
        assert!(text.contains("export PATH=\"/opt/raven/bin:$PATH\""));
    }

    #[test]
    fn no_notice_when_on_path() {
        let marker = MemoryMarker::default();
        let advice = Advice {
            on_path: true,
            install_dir: None,
        };
        let mut err = Vec::<u8>::new();

        assert!(!advise_once(&marker, &advice, &mut err).unwrap());
        assert!(err.is_empty());
        assert!(!marker.has_been_notified().unwrap());
    }

    #[test]
    fn already_marked_stays_silent() {
        let marker = MemoryMarker::notified();
        let mut err = Vec::<u8>::new();
        assert!(!advise_once(&marker, &off_path(), &mut err).unwrap());
        assert!(err.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn search_path_lookup() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        let exe = bin.join(ENTRY_POINT);
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();

        let path_var = std::env::join_paths([temp.path(), bin.as_path()]).unwrap();
        assert!(!on_search_path(ENTRY_POINT, Some(path_var.as_os_str())));

        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(on_search_path(ENTRY_POINT, Some(path_var.as_os_str())));
        assert!(!on_search_path("other", Some(path_var.as_os_str())));
        assert!(!on_search_path(ENTRY_POINT, None));
    }

    #[test]
    fn notice_without_install_dir() {
        let text = notice_text(None);
        assert!(text.contains("not on your PATH"));
        assert!(!text.contains("export"));
    }
}
