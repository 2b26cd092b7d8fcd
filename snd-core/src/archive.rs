//! Loaded archive and the per-sound view handed to callers.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::container::header::Header;
use crate::context::Context;
use crate::errlog;
use crate::error::{ErrorKind, Result};
use crate::index::catalog::{Catalog, Entry};
use crate::key::SoundKey;
use crate::read::open::Opened;
use crate::read::walker::{WalkSummary, walk};
use crate::resolve;
use crate::stats::Stats;
use crate::wave::{ChunkLayout, NO_COMMENT, WaveView};

/// Frames per second used by [`SoundData::frames`].
pub const FRAMES_PER_SECOND: f64 = 60.0;

#[derive(Debug)]
pub struct SndArchive {
    file_name: String,
    path: PathBuf,
    header: Header,
    catalog: Catalog,
    walk: WalkSummary,
}

impl SndArchive {
    /// Resolve `name` and load the archive it names.
    ///
    /// `dir` restricts the search to one directory tree. Diagnostics are
    /// appended to `ctx.collector`, which is never cleared here. When the
    /// config asks for it, a log file is written whether the load succeeds
    /// or not.
    pub fn load(ctx: &mut Context, name: &str, dir: Option<&Path>) -> Result<Self> {
        let res = Self::load_inner(ctx, name, dir);
        if !ctx.config.create_log_file {
            return res;
        }
        let log_name = match &res {
            Ok(a) => a.file_name.clone(),
            Err(_) => Path::new(name)
                .file_name()
                .map_or_else(|| name.to_string(), |f| f.to_string_lossy().into_owned()),
        };
        let logged = errlog::write_log(ctx, &log_name);
        let archive = res?;
        logged?;
        Ok(archive)
    }

    fn load_inner(ctx: &mut Context, name: &str, dir: Option<&Path>) -> Result<Self> {
        let path = resolve::resolve(name, dir, &ctx.config, &mut ctx.collector)?;
        let mut opened = Opened::open(path.as_deref(), &mut ctx.collector)?;
        let header = opened.header;

        let mut catalog = Catalog::with_capacity(header.max_records() as usize, header.file_size as usize);
        let walk = walk(&mut opened.f, &header, &mut catalog, &mut ctx.collector)?;
        catalog.shrink_to_fit();

        let file_name = opened
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            file = %file_name,
            groups = catalog.groups.len(),
            items = catalog.entries.len(),
            blobs = catalog.store.len(),
            duplicates = walk.duplicates,
            "loaded archive"
        );
        Ok(Self {
            file_name,
            path: opened.path,
            header,
            catalog,
            walk,
        })
    }

    /// Look up by sound number. A miss is `NotFound_SoundNumber`: an error
    /// under the throw policy, otherwise recorded and answered with the
    /// dummy view.
    pub fn sound(&self, ctx: &mut Context, group: i32, item: i32) -> Result<SoundData<'_>> {
        if let Some(s) = self.get(group, item) {
            return Ok(s);
        }
        ctx.collector
            .report_sound(ErrorKind::NotFoundSoundNumber, group, item)?;
        Ok(SoundData::dummy())
    }

    /// Look up by load order.
    pub fn sound_at(&self, ctx: &mut Context, index: usize) -> Result<SoundData<'_>> {
        if let Some(s) = self.get_index(index) {
            return Ok(s);
        }
        let value = i32::try_from(index).unwrap_or(i32::MAX);
        ctx.collector
            .report_value(ErrorKind::NotFoundSoundIndex, value)?;
        Ok(SoundData::dummy())
    }

    pub fn get(&self, group: i32, item: i32) -> Option<SoundData<'_>> {
        let index = *self.catalog.by_key.get(&SoundKey::new(group, item))?;
        self.get_index(index)
    }

    pub fn get_index(&self, index: usize) -> Option<SoundData<'_>> {
        let entry = *self.catalog.entries.get(index)?;
        let bytes = self.catalog.store.blob(entry.blob)?;
        Some(SoundData {
            entry: Some(entry),
            wave: WaveView::with_layout(bytes, self.catalog.layout(entry.blob)),
            digest: self.catalog.store.digest(entry.blob),
        })
    }

    pub fn contains(&self, group: i32, item: i32) -> bool {
        self.catalog.contains(group, item)
    }

    pub fn num_group(&self) -> usize {
        self.catalog.groups.len()
    }

    /// Sounds actually loaded. Duplicates and records past the end of the
    /// chain are not counted.
    pub fn num_item(&self) -> usize {
        self.catalog.entries.len()
    }

    /// Record count from the header.
    pub fn declared_count(&self) -> u32 {
        self.header.record_count
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn walk_summary(&self) -> WalkSummary {
        self.walk
    }

    /// Bytes held by the distinct blobs.
    pub fn size(&self) -> usize {
        self.catalog.store.size()
    }

    pub fn iter(&self) -> impl Iterator<Item = SoundData<'_>> + '_ {
        (0..self.num_item()).filter_map(|i| self.get_index(i))
    }

    pub fn stats(&self) -> Stats {
        Stats {
            groups: self.num_group() as u64,
            items: self.num_item() as u64,
            declared_records: u64::from(self.header.record_count),
            blobs: self.catalog.store.len() as u64,
            stored_bytes: self.size() as u64,
            file_bytes: self.header.file_size,
            duplicates_skipped: self.catalog.duplicates as u64,
        }
    }
}

/// Read-only view of one sound. The dummy view answers zero for every
/// number and has no bytes.
#[derive(Clone, Copy, Debug)]
pub struct SoundData<'a> {
    entry: Option<Entry>,
    wave: WaveView<'a>,
    digest: Option<&'a [u8; 32]>,
}

impl<'a> SoundData<'a> {
    pub fn dummy() -> Self {
        Self {
            entry: None,
            wave: WaveView::with_layout(&[], ChunkLayout::default()),
            digest: None,
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.entry.is_none()
    }

    pub fn group(&self) -> i32 {
        self.entry.map_or(0, |e| e.group())
    }

    pub fn item(&self) -> i32 {
        self.entry.map_or(0, |e| e.item())
    }

    pub fn blob_index(&self) -> usize {
        self.entry.map_or(0, |e| e.blob)
    }

    /// Size of the data chunk.
    pub fn byte_size(&self) -> u32 {
        self.wave.data_len()
    }

    pub fn channels(&self) -> u16 {
        self.wave.channels()
    }

    pub fn hz(&self) -> u32 {
        self.wave.sample_rate()
    }

    pub fn bits(&self) -> u16 {
        self.wave.bits_per_sample()
    }

    pub fn duration_secs(&self) -> f64 {
        match self.wave.avg_bytes_per_sec() {
            0 => 0.0,
            rate => f64::from(self.byte_size()) / f64::from(rate),
        }
    }

    pub fn frames(&self) -> f64 {
        self.duration_secs() * FRAMES_PER_SECOND
    }

    /// Comment chunk body, or the single-NUL sentinel.
    pub fn comment(&self) -> &'a [u8] {
        if self.is_dummy() {
            return NO_COMMENT;
        }
        self.wave.comment()
    }

    pub fn comment_text(&self) -> Option<String> {
        self.wave.comment_text()
    }

    /// The complete embedded WAVE file.
    pub fn bytes(&self) -> &'a [u8] {
        self.wave.bytes()
    }

    pub fn wave(&self) -> WaveView<'a> {
        self.wave
    }

    pub fn digest(&self) -> Option<&'a [u8; 32]> {
        self.digest
    }

    pub fn digest_hex(&self) -> String {
        self.digest.map(hex::encode).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Config, ErrorPolicy};
    use crate::read::walker::tests::{Image, wav};

    fn load_image(img: Vec<u8>, policy: ErrorPolicy) -> (tempfile::TempDir, Context, Result<SndArchive>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.snd"), img).unwrap();
        let mut ctx = Context::new(Config {
            policy,
            ..Config::default()
        });
        let res = SndArchive::load(&mut ctx, "t", Some(dir.path()));
        (dir, ctx, res)
    }

    #[test]
    fn shared_payload_counts() {
        let a = wav(7);
        let img = Image::new().record(1, 1, &a).record(1, 2, &a).build();
        let (_d, ctx, res) = load_image(img, ErrorPolicy::Throw);
        let ar = res.unwrap();
        assert_eq!(ar.num_group(), 1);
        assert_eq!(ar.num_item(), 2);
        assert_eq!(ar.get(1, 1).unwrap().blob_index(), 0);
        assert_eq!(ar.get(1, 2).unwrap().blob_index(), 0);
        assert_eq!(ar.size(), a.len());
        assert_eq!(ar.file_name(), "t.snd");
        assert!(ctx.collector.is_empty());
    }

    #[test]
    fn miss_gives_dummy_when_collecting() {
        let img = Image::new().record(1, 1, &wav(1)).build();
        let (_d, mut ctx, res) = load_image(img, ErrorPolicy::Collect);
        let ar = res.unwrap();
        let s = ar.sound(&mut ctx, 9, 9).unwrap();
        assert!(s.is_dummy());
        assert_eq!(s.channels(), 0);
        assert_eq!(s.hz(), 0);
        assert_eq!(s.duration_secs(), 0.0);
        assert_eq!(s.comment(), NO_COMMENT);
        assert!(s.bytes().is_empty());
        assert_eq!(
            ctx.collector.entries()[0].payload,
            crate::error::Payload::Sound { group: 9, item: 9 }
        );

        let s = ar.sound_at(&mut ctx, 5).unwrap();
        assert!(s.is_dummy());
        assert_eq!(ctx.collector.count(ErrorKind::NotFoundSoundIndex), 1);
    }

    #[test]
    fn miss_throws_when_strict() {
        let img = Image::new().record(1, 1, &wav(1)).build();
        let (_d, mut ctx, res) = load_image(img, ErrorPolicy::Throw);
        let ar = res.unwrap();
        let err = ar.sound(&mut ctx, 9, 9).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFoundSoundNumber));
        assert!(ar.sound(&mut ctx, 1, 1).is_ok());
    }

    #[test]
    fn accessors_read_fmt_and_data() {
        let img = Image::new().record(3, 0, &wav(1)).build();
        let (_d, mut ctx, res) = load_image(img, ErrorPolicy::Throw);
        let ar = res.unwrap();
        let s = ar.sound(&mut ctx, 3, 0).unwrap();
        assert_eq!(s.channels(), 1);
        assert_eq!(s.hz(), 8000);
        assert_eq!(s.bits(), 8);
        assert_eq!(s.byte_size(), 4);
        assert_eq!(s.duration_secs(), 4.0 / 8000.0);
        assert_eq!(s.frames(), 4.0 / 8000.0 * 60.0);
        assert_eq!(s.digest_hex().len(), 64);
        assert_eq!(s.comment_text(), None);
    }

    #[test]
    fn stats_reflect_duplicates() {
        let img = Image::new()
            .record(1, 1, &wav(1))
            .record(1, 1, &wav(2))
            .record(2, 1, &wav(3))
            .build();
        let (_d, _ctx, res) = load_image(img, ErrorPolicy::Collect);
        let st = res.unwrap().stats();
        assert_eq!(st.items, 2);
        assert_eq!(st.groups, 2);
        assert_eq!(st.declared_records, 3);
        assert_eq!(st.duplicates_skipped, 1);
        assert_eq!(st.blobs, 2);
    }
}
