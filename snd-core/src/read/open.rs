use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::container::header::{Header, SIZE_LIMIT};
use crate::diag::Collector;
use crate::error::{ErrorKind, Result};

/// An archive file with a validated header, positioned at byte 0.
pub struct Opened {
    pub f: BufReader<File>,
    pub header: Header,
    pub path: PathBuf,
}

impl Opened {
    /// Open `path` and validate its header. Every failure here is fatal to
    /// the load: it is recorded under the collect policy and always returned.
    pub fn open(path: Option<&Path>, c: &mut Collector) -> Result<Self> {
        let size = path
            .and_then(|p| std::fs::metadata(p).ok())
            .map_or(0, |m| m.len());
        if size > SIZE_LIMIT {
            return Err(c.fatal(ErrorKind::InvalidSndFileSize));
        }
        let path = match path {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Err(c.fatal(ErrorKind::InvalidEmptySndFilePath)),
        };
        let Ok(f) = File::open(path) else {
            return Err(c.fatal(ErrorKind::FailedOpenSndFile));
        };
        let mut f = BufReader::new(f);

        let header = match Header::read_from(&mut f, size) {
            Ok(Ok(h)) => h,
            Ok(Err(kind)) => return Err(c.fatal(kind)),
            Err(e) => {
                debug!(error = %e, "header read failed");
                return Err(c.fatal(ErrorKind::FailedOpenSndFile));
            }
        };
        if f.seek(SeekFrom::Start(0)).is_err() {
            return Err(c.fatal(ErrorKind::FailedOpenSndFile));
        }
        debug!(
            path = %path.display(),
            size,
            records = header.record_count,
            version = header.version,
            "opened archive"
        );

        Ok(Self {
            f,
            header,
            path: path.to_path_buf(),
        })
    }
}
