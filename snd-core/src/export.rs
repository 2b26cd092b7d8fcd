use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::archive::{SndArchive, SoundData};
use crate::context::Context;
use crate::error::{ErrorKind, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub dir: PathBuf,
    pub written: usize,
    pub skipped: usize,
}

pub fn wav_file_name(group: i32, item: i32) -> String {
    format!("{group}-{item}.wav")
}

/// Write one sound's WAVE bytes to `<dir>/<group>-<item>.wav`.
/// The dummy view writes nothing.
pub fn export_sound(ctx: &mut Context, sound: &SoundData<'_>, dir: &Path) -> Result<Option<PathBuf>> {
    if sound.is_dummy() {
        return Ok(None);
    }
    if fs::create_dir_all(dir).is_err() {
        ctx.collector.report(ErrorKind::FailedCreateExportWavFolder)?;
        return Ok(None);
    }
    write_wav(ctx, sound, dir)
}

/// Write every sound of `archive` into `<dir>/<archive stem>/`.
pub fn export_all(ctx: &mut Context, archive: &SndArchive, dir: &Path) -> Result<ExportSummary> {
    let stem = Path::new(archive.file_name())
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snd".to_string());
    let target = dir.join(stem);
    let mut sum = ExportSummary {
        dir: target.clone(),
        ..ExportSummary::default()
    };
    if fs::create_dir_all(&target).is_err() {
        ctx.collector.report(ErrorKind::FailedCreateExportWavFolder)?;
        sum.skipped = archive.num_item();
        return Ok(sum);
    }
    for s in archive.iter() {
        match write_wav(ctx, &s, &target)? {
            Some(_) => sum.written += 1,
            None => sum.skipped += 1,
        }
    }
    info!(dir = %target.display(), written = sum.written, skipped = sum.skipped, "exported sounds");
    Ok(sum)
}

fn write_wav(ctx: &mut Context, sound: &SoundData<'_>, dir: &Path) -> Result<Option<PathBuf>> {
    let path = dir.join(wav_file_name(sound.group(), sound.item()));
    let Ok(mut f) = File::create(&path) else {
        ctx.collector.report(ErrorKind::FailedCreateWavFile)?;
        return Ok(None);
    };
    if f.write_all(sound.bytes()).and_then(|_| f.flush()).is_err() {
        ctx.collector.report(ErrorKind::FailedWriteWavFile)?;
        return Ok(None);
    }
    if f.sync_all().is_err() {
        ctx.collector.report(ErrorKind::FailedCloseWavFile)?;
        return Ok(None);
    }
    debug!(path = %path.display(), bytes = sound.bytes().len(), "wrote wav");
    Ok(Some(path))
}
