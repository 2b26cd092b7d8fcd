use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the current operation on the first non-warning error.
    Throw,
    /// Record the error and keep going where it is safe to.
    #[default]
    Collect,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: ErrorPolicy,
    /// Write `snd_error_log_<name>.txt` after every load.
    pub create_log_file: bool,
    /// Place log output under a `sndlib` folder inside `output_dir`, creating it.
    pub create_output_dir: bool,
    /// Empty means the current directory.
    pub output_dir: PathBuf,
    /// Root for the recursive file search; empty means the current directory.
    pub search_root: PathBuf,
}

impl Config {
    pub fn strict() -> Self {
        Self {
            policy: ErrorPolicy::Throw,
            ..Default::default()
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        or_current_dir(&self.output_dir)
    }

    pub fn search_root(&self) -> PathBuf {
        or_current_dir(&self.search_root)
    }
}

fn or_current_dir(p: &Path) -> PathBuf {
    if p.as_os_str().is_empty() {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        p.to_path_buf()
    }
}
