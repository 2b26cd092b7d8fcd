use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, warn};

use crate::context::Context;
use crate::diag::render_text;
use crate::error::{ErrorKind, Result};

pub const LOG_SUBDIR: &str = "sndlib";

pub fn log_file_name(archive: &str) -> String {
    format!("snd_error_log_{archive}.txt")
}

/// Directory the log goes into, created when configured. `None` after a
/// recoverable failure has been reported.
pub fn output_dir(ctx: &mut Context) -> Result<Option<PathBuf>> {
    let base = ctx.config.output_dir();
    if base.exists() && !base.is_dir() {
        ctx.collector.report(ErrorKind::InvalidOutputFolderPath)?;
        return Ok(None);
    }
    if !ctx.config.create_output_dir {
        return Ok(Some(base));
    }
    let dir = base.join(LOG_SUBDIR);
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!(dir = %dir.display(), error = %e, "cannot create output folder");
        ctx.collector.report(ErrorKind::FailedCreateOutputFolder)?;
        return Ok(None);
    }
    Ok(Some(dir))
}

/// Write the collected diagnostics for `archive` to its log file.
///
/// The report reflects the collector at the time of the call; failures
/// while writing it are reported afterwards.
pub fn write_log(ctx: &mut Context, archive: &str) -> Result<Option<PathBuf>> {
    let Some(dir) = output_dir(ctx)? else {
        return Ok(None);
    };
    let path = dir.join(log_file_name(archive));
    let stamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let text = format!("date: {stamp}\n{}", render_text(ctx.collector.entries()));

    let mut f = match File::create(&path) {
        Ok(f) => f,
        Err(_) => {
            ctx.collector.report(ErrorKind::FailedCreateErrorLogFile)?;
            return Ok(None);
        }
    };
    if f.write_all(text.as_bytes()).and_then(|_| f.flush()).is_err() {
        ctx.collector.report(ErrorKind::FailedWriteErrorLogFile)?;
        return Ok(None);
    }
    if f.sync_all().is_err() {
        ctx.collector.report(ErrorKind::FailedCloseErrorLogFile)?;
    }
    debug!(path = %path.display(), "error log written");
    Ok(Some(path))
}
