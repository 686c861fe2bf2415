//! Filesystem locations used by the tracker.
//!
//! Follows the XDG base directory layout:
//!
//! - Data (record export, trace files): `$XDG_DATA_HOME/jobtrail`, falling back
//!   to `~/.local/share/jobtrail`
//! - Session state: `$XDG_RUNTIME_DIR/jobtrail`, a per-login directory the OS
//!   clears when the session ends. When unset, a directory under the system
//!   temp dir named after the process id stands in, so two runs never share
//!   session state

use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jobtrail";

/// Returns the data directory.
///
/// # Examples
///
/// ```
/// use jobtrail::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("jobtrail"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_data_dir(env::var_os("XDG_DATA_HOME").map(PathBuf::from), home_dir())
}

/// Returns the directory holding session-scoped view state.
#[must_use]
pub fn session_dir() -> PathBuf {
    resolve_session_dir(env::var_os("XDG_RUNTIME_DIR").map(PathBuf::from), std::process::id())
}

/// Default location of the record export read by the JSON record store.
#[must_use]
pub fn default_records_file() -> PathBuf {
    data_dir().join("applications.json")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use jobtrail::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

fn resolve_data_dir(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".local").join("share")))
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
}

fn resolve_session_dir(xdg_runtime_dir: Option<PathBuf>, pid: u32) -> PathBuf {
    match xdg_runtime_dir.filter(|dir| dir.is_absolute()) {
        Some(dir) => dir.join(APP_DIR),
        None => env::temp_dir().join(format!("{APP_DIR}-{pid}")),
    }
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_xdg() {
        assert_eq!(
            resolve_data_dir(Some("/xdg/data".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/data/jobtrail")
        );
        assert_eq!(
            resolve_data_dir(None, Some("/home/u".into())),
            PathBuf::from("/home/u/.local/share/jobtrail")
        );
        assert_eq!(
            resolve_data_dir(Some("relative".into()), Some("/home/u".into())),
            PathBuf::from("/home/u/.local/share/jobtrail")
        );
    }

    #[test]
    fn session_dir_falls_back_to_temp() {
        assert_eq!(
            resolve_session_dir(Some("/run/user/1000".into()), 42),
            PathBuf::from("/run/user/1000/jobtrail")
        );
        assert_eq!(resolve_session_dir(None, 42), env::temp_dir().join("jobtrail-42"));
        assert_eq!(
            resolve_session_dir(Some("relative".into()), 42),
            env::temp_dir().join("jobtrail-42")
        );
    }

    #[test]
    fn temp_fallback_is_per_process() {
        assert_ne!(resolve_session_dir(None, 1), resolve_session_dir(None, 2));
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/u");
        assert_eq!(expand_tilde_with("~/jobs.json", Some(home)), PathBuf::from("/home/u/jobs.json"));
        assert_eq!(expand_tilde_with("~", Some(home)), PathBuf::from("/home/u"));
        assert_eq!(expand_tilde_with("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }
}
