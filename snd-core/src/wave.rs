//! RIFF/WAVE chunk scanning and field access over an embedded sound blob.
//!
//! The scan only records where the interesting chunks start; field values are
//! decoded on demand from the blob bytes. Every read is bounds-checked, so a
//! malformed blob yields zeros rather than a panic.

use crate::error::ErrorKind;
use crate::util::endian::{fourcc, le_u16, le_u32};

pub const RIFF_ID: &[u8; 4] = b"RIFF";
pub const WAVE_ID: &[u8; 4] = b"WAVE";
pub const FMT_ID: &[u8; 4] = b"fmt ";
pub const FACT_ID: &[u8; 4] = b"fact";
pub const DATA_ID: &[u8; 4] = b"data";
/// Vendor comment chunk.
pub const COMMENT_ID: &[u8; 4] = b"SAEC";

/// Returned by [`WaveView::comment`] when there is no comment chunk.
pub const NO_COMMENT: &[u8] = &[0];

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Offsets of the recognised chunks (start of the chunk header).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkLayout {
    pub fmt: Option<usize>,
    pub fact: Option<usize>,
    pub data: Option<usize>,
    pub comment: Option<usize>,
}

impl ChunkLayout {
    /// Validate the RIFF/WAVE preamble and walk the chunk list.
    pub fn scan(bytes: &[u8]) -> Result<Self, ErrorKind> {
        if fourcc(bytes, 0).as_ref() != Some(RIFF_ID) {
            return Err(ErrorKind::InvalidRiffSignature);
        }
        if fourcc(bytes, 8).as_ref() != Some(WAVE_ID) {
            return Err(ErrorKind::InvalidWaveFormat);
        }

        let mut layout = ChunkLayout::default();
        let mut off = RIFF_HEADER_LEN;
        while off < bytes.len() {
            let (Some(id), Some(size)) = (fourcc(bytes, off), le_u32(bytes, off + 4)) else {
                break;
            };
            let size = size as usize;
            let body_end = match (off + CHUNK_HEADER_LEN).checked_add(size) {
                Some(end) if end <= bytes.len() => end,
                // declared size runs past the blob
                _ => break,
            };
            match &id {
                FMT_ID => layout.fmt = Some(off),
                FACT_ID => layout.fact = Some(off),
                DATA_ID => layout.data = Some(off),
                COMMENT_ID => layout.comment = Some(off),
                _ => {}
            }
            off = body_end + (size & 1);
        }
        Ok(layout)
    }
}

/// Borrowed view over one blob and its chunk layout.
#[derive(Clone, Copy, Debug)]
pub struct WaveView<'a> {
    bytes: &'a [u8],
    layout: ChunkLayout,
}

impl<'a> WaveView<'a> {
    /// Scan `bytes`; an invalid preamble gives an empty layout.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            layout: ChunkLayout::scan(bytes).unwrap_or_default(),
        }
    }

    pub fn with_layout(bytes: &'a [u8], layout: ChunkLayout) -> Self {
        Self { bytes, layout }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn layout(&self) -> ChunkLayout {
        self.layout
    }

    fn chunk_size(&self, at: Option<usize>) -> u32 {
        at.and_then(|o| le_u32(self.bytes, o + 4)).unwrap_or(0)
    }

    fn fmt_u16(&self, field: usize) -> u16 {
        self.layout
            .fmt
            .and_then(|o| le_u16(self.bytes, o + CHUNK_HEADER_LEN + field))
            .unwrap_or(0)
    }

    fn fmt_u32(&self, field: usize) -> u32 {
        self.layout
            .fmt
            .and_then(|o| le_u32(self.bytes, o + CHUNK_HEADER_LEN + field))
            .unwrap_or(0)
    }

    pub fn format_tag(&self) -> u16 {
        self.fmt_u16(0)
    }

    pub fn channels(&self) -> u16 {
        self.fmt_u16(2)
    }

    pub fn sample_rate(&self) -> u32 {
        self.fmt_u32(4)
    }

    pub fn avg_bytes_per_sec(&self) -> u32 {
        self.fmt_u32(8)
    }

    pub fn block_align(&self) -> u16 {
        self.fmt_u16(12)
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.fmt_u16(14)
    }

    /// `cbSize`; only present when the fmt chunk is at least 18 bytes.
    pub fn extra_size(&self) -> u16 {
        if self.chunk_size(self.layout.fmt) < 18 {
            return 0;
        }
        self.fmt_u16(16)
    }

    pub fn sample_length(&self) -> u32 {
        self.layout
            .fact
            .and_then(|o| le_u32(self.bytes, o + CHUNK_HEADER_LEN))
            .unwrap_or(0)
    }

    pub fn data_len(&self) -> u32 {
        self.chunk_size(self.layout.data)
    }

    /// Audio samples of the data chunk (empty when absent).
    pub fn data(&self) -> &'a [u8] {
        self.body(self.layout.data).unwrap_or(&[])
    }

    pub fn has_comment(&self) -> bool {
        self.layout.comment.is_some()
    }

    /// Body of the comment chunk, or [`NO_COMMENT`].
    pub fn comment(&self) -> &'a [u8] {
        self.body(self.layout.comment).unwrap_or(NO_COMMENT)
    }

    /// Comment up to the first NUL, if there is one.
    pub fn comment_text(&self) -> Option<String> {
        if !self.has_comment() {
            return None;
        }
        let raw = self.comment();
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Some(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    fn body(&self, at: Option<usize>) -> Option<&'a [u8]> {
        let o = at?;
        let start = o + CHUNK_HEADER_LEN;
        let len = le_u32(self.bytes, o + 4)? as usize;
        let end = start.checked_add(len)?.min(self.bytes.len());
        self.bytes.get(start..end)
    }
}
