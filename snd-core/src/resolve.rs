//! Locating the archive on disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::container::header::EXTENSION;
use crate::diag::Collector;
use crate::error::{ErrorKind, Result};
use crate::policy::Config;

/// Force the `.snd` extension onto `name`.
///
/// A different extension is reported as `Invalid_SNDExtension` before being
/// replaced; a missing one is appended silently.
pub fn ensure_extension(name: &str, c: &mut Collector) -> Result<String> {
    let p = Path::new(name);
    match p.extension().and_then(|e| e.to_str()) {
        Some(EXTENSION) => Ok(name.to_string()),
        Some(other) if !other.is_empty() => {
            c.report(ErrorKind::InvalidSndExtension)?;
            Ok(p.with_extension(EXTENSION).to_string_lossy().into_owned())
        }
        _ => Ok(format!("{}.{EXTENSION}", name.trim_end_matches('.'))),
    }
}

/// Search for a regular file called exactly `name`.
///
/// The search starts at `dir` when given, else at the configured search
/// root, else at the current directory, and descends recursively.
/// Unreadable directories are skipped.
pub fn find(name: &str, dir: Option<&Path>, cfg: &Config, c: &mut Collector) -> Result<Option<PathBuf>> {
    let mut start = None;
    if let Some(d) = dir.filter(|d| !d.as_os_str().is_empty()) {
        match d.canonicalize() {
            Ok(p) => start = Some(p),
            Err(_) => c.report(ErrorKind::InvalidLoadSndPath)?,
        }
    }
    if start.is_none() && !cfg.search_root.as_os_str().is_empty() {
        match cfg.search_root.canonicalize() {
            Ok(p) => start = Some(p),
            Err(_) => c.report(ErrorKind::InvalidSndSearchPath)?,
        }
    }
    let start = match start {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    debug!(name, start = %start.display(), "searching for archive");

    let hit = WalkDir::new(&start)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == name);
    match hit {
        Some(e) => Ok(Some(e.into_path())),
        None => {
            c.report(ErrorKind::NotFoundSndFile)?;
            Ok(None)
        }
    }
}

/// Normalise `name` and find it. A `name` carrying its own directory part
/// searches from that directory when `dir` is not given.
pub fn resolve(name: &str, dir: Option<&Path>, cfg: &Config, c: &mut Collector) -> Result<Option<PathBuf>> {
    let name = ensure_extension(name, c)?;
    let p = Path::new(&name);
    let parent = p.parent().filter(|d| !d.as_os_str().is_empty());
    match (parent, p.file_name()) {
        (Some(parent), Some(file)) if dir.is_none() => {
            find(&file.to_string_lossy(), Some(parent), cfg, c)
        }
        _ => find(&name, dir, cfg, c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ErrorPolicy;

    #[test]
    fn extension_forced() {
        let mut c = Collector::new(ErrorPolicy::Collect);
        assert_eq!(ensure_extension("kfm.snd", &mut c).unwrap(), "kfm.snd");
        assert_eq!(ensure_extension("kfm", &mut c).unwrap(), "kfm.snd");
        assert!(c.is_empty());
        assert_eq!(ensure_extension("kfm.wav", &mut c).unwrap(), "kfm.snd");
        assert_eq!(c.count(ErrorKind::InvalidSndExtension), 1);
    }

    #[test]
    fn wrong_extension_throws_under_throw() {
        let mut c = Collector::new(ErrorPolicy::Throw);
        let err = ensure_extension("kfm.sff", &mut c).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidSndExtension));
    }

    #[test]
    fn finds_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("chars").join("kfm");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("kfm.snd"), b"x").unwrap();

        let mut c = Collector::default();
        let found = find("kfm.snd", Some(dir.path()), &Config::default(), &mut c).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "kfm.snd");
        assert!(c.is_empty());
    }

    #[test]
    fn bad_dir_falls_back_to_search_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("a.snd"), b"x").unwrap();
        let cfg = Config {
            search_root: root.path().to_path_buf(),
            ..Config::default()
        };
        let mut c = Collector::new(ErrorPolicy::Collect);
        let missing = root.path().join("missing");
        let found = find("a.snd", Some(&missing), &cfg, &mut c).unwrap();
        assert!(found.is_some());
        assert_eq!(c.count(ErrorKind::InvalidLoadSndPath), 1);
    }

    #[test]
    fn bad_search_root_reported() {
        let root = tempfile::tempdir().unwrap();
        let cfg = Config {
            search_root: root.path().join("gone"),
            ..Config::default()
        };
        let mut c = Collector::new(ErrorPolicy::Collect);
        let _ = find("zz_not_here.snd", Some(root.path()), &cfg, &mut c).unwrap();
        assert_eq!(c.count(ErrorKind::InvalidSndSearchPath), 0);

        let mut c = Collector::new(ErrorPolicy::Throw);
        let err = find("zz_not_here.snd", None, &cfg, &mut c).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidSndSearchPath));
    }

    #[test]
    fn miss_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = Collector::new(ErrorPolicy::Collect);
        let found = find("none.snd", Some(dir.path()), &Config::default(), &mut c).unwrap();
        assert!(found.is_none());
        assert_eq!(c.count(ErrorKind::NotFoundSndFile), 1);
    }

    #[test]
    fn name_with_directory_part() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.snd"), b"x").unwrap();
        let name = dir.path().join("b").to_string_lossy().into_owned();
        let mut c = Collector::default();
        let found = resolve(&name, None, &Config::default(), &mut c).unwrap();
        assert!(found.is_some());
    }
}
