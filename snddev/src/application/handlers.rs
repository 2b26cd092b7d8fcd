use std::path::PathBuf;

use serde::Serialize;
use snd_core::diag::render_text;
use snd_core::domain::DiagnosticRow;
use snd_core::error::{Result, SndError};
use snd_core::stats::Stats;
use snd_core::{Context, ErrorPolicy, SndArchive, export_all, export_sound, list};

#[derive(Serialize)]
struct InfoOut<'a> {
    file: &'a str,
    path: String,
    signature: &'a str,
    version: String,
    table_offset: u32,
    stats: Stats,
}

fn to_json<T: Serialize>(v: &T) -> Result<String> {
    serde_json::to_string_pretty(v).map_err(|e| SndError::Format(format!("json: {e}")))
}

pub fn handle_info(ctx: &mut Context, name: &str, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let ar = SndArchive::load(ctx, name, dir.as_deref())?;
    let h = ar.header();
    let out = InfoOut {
        file: ar.file_name(),
        path: ar.path().display().to_string(),
        signature: h.signature_str(),
        version: format!("{:#010x}", h.version),
        table_offset: h.table_off,
        stats: ar.stats(),
    };
    if json {
        println!("{}", to_json(&out)?);
        return Ok(());
    }
    println!("file:       {}", out.file);
    println!("path:       {}", out.path);
    println!("signature:  {}", out.signature);
    println!("version:    {}", out.version);
    println!("records:    {} declared", out.stats.declared_records);
    println!("sounds:     {} in {} groups", out.stats.items, out.stats.groups);
    println!(
        "blobs:      {} ({} bytes of {})",
        out.stats.blobs, out.stats.stored_bytes, out.stats.file_bytes
    );
    println!("duplicates: {}", out.stats.duplicates_skipped);
    Ok(())
}

pub fn handle_list(ctx: &mut Context, name: &str, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let ar = SndArchive::load(ctx, name, dir.as_deref())?;
    let rows = list(&ar);
    if json {
        println!("{}", to_json(&rows)?);
        return Ok(());
    }
    for r in rows {
        println!(
            "#{:<5} {:>6},{:<6} blob={:<5} {}ch {}Hz {}bit {:.3}s {} bytes{}",
            r.index,
            r.group,
            r.item,
            r.blob,
            r.channels,
            r.hz,
            r.bits,
            r.duration_secs,
            r.byte_size,
            r.comment.map(|c| format!("  \"{c}\"")).unwrap_or_default()
        );
    }
    Ok(())
}

pub fn handle_show(
    ctx: &mut Context,
    name: &str,
    group: i32,
    item: i32,
    dir: Option<PathBuf>,
) -> Result<()> {
    let ar = SndArchive::load(ctx, name, dir.as_deref())?;
    let s = ar.sound(ctx, group, item)?;
    if s.is_dummy() {
        println!("{group},{item}: not found");
        return Ok(());
    }
    let w = s.wave();
    println!("sound:       {},{}", s.group(), s.item());
    println!("blob:        {}", s.blob_index());
    println!("digest:      {}", s.digest_hex());
    println!("format tag:  {}", w.format_tag());
    println!("channels:    {}", s.channels());
    println!("sample rate: {}", s.hz());
    println!("byte rate:   {}", w.avg_bytes_per_sec());
    println!("block align: {}", w.block_align());
    println!("bits:        {}", s.bits());
    println!("data bytes:  {}", s.byte_size());
    println!("samples:     {}", w.sample_length());
    println!("duration:    {:.3}s ({:.1} frames)", s.duration_secs(), s.frames());
    if let Some(c) = s.comment_text() {
        println!("comment:     {c}");
    }
    Ok(())
}

/// Prints and drains the collector, so nothing is repeated on stderr.
/// Under the collect policy a failed load still exits cleanly once its
/// diagnostics are printed.
pub fn handle_errors(ctx: &mut Context, name: &str, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let loaded = SndArchive::load(ctx, name, dir.as_deref());
    let entries = ctx.collector_mut().drain();
    if json {
        let rows: Vec<DiagnosticRow> = entries.iter().map(DiagnosticRow::from).collect();
        println!("{}", to_json(&rows)?);
    } else {
        print!("{}", render_text(&entries));
    }
    match loaded {
        Err(e) if e.kind().is_none() || ctx.policy() == ErrorPolicy::Throw => Err(e),
        _ => Ok(()),
    }
}

pub fn handle_export(
    ctx: &mut Context,
    name: &str,
    dest: PathBuf,
    dir: Option<PathBuf>,
    group: Option<i32>,
    item: Option<i32>,
) -> Result<()> {
    let ar = SndArchive::load(ctx, name, dir.as_deref())?;
    match (group, item) {
        (Some(g), Some(i)) => {
            let s = ar.sound(ctx, g, i)?;
            match export_sound(ctx, &s, &dest)? {
                Some(p) => eprintln!("export: wrote {}", p.display()),
                None => eprintln!("export: nothing written"),
            }
        }
        (None, None) => {
            let sum = export_all(ctx, &ar, &dest)?;
            eprintln!(
                "export: {} written, {} skipped into {}",
                sum.written,
                sum.skipped,
                sum.dir.display()
            );
        }
        _ => {
            return Err(SndError::Format(
                "--group and --item must be given together".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snd_core::{Config, ErrorKind};

    #[test]
    fn errors_drains_after_a_failed_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = Context::new(Config::default());
        handle_errors(&mut ctx, "ghost", Some(dir.path().to_path_buf()), true).unwrap();
        assert!(ctx.collector().is_empty());

        let mut strict = Context::new(Config::strict());
        let err = handle_errors(&mut strict, "ghost", Some(dir.path().to_path_buf()), false)
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFoundSndFile));
    }
}
