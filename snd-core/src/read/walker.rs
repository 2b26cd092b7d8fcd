use std::io::{ErrorKind as IoKind, Read, Seek, SeekFrom};

use tracing::debug;

use crate::container::header::Header;
use crate::container::record::{ENTRY_SIZE, RecordHeader};
use crate::diag::Collector;
use crate::error::{ErrorKind, Result, SndError};
use crate::index::catalog::{Applied, Catalog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEnd {
    /// Read as many records as the header declares.
    Exhausted,
    /// A next offset of zero or pointing backwards.
    ChainEnd,
    /// The file ended inside a record.
    Truncated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: u32,
    pub stored: u32,
    pub duplicates: u32,
    pub end: WalkEnd,
}

/// Walk the record table, feeding every record into `cat`.
///
/// The declared record count bounds the walk; the next-offset chain decides
/// where it actually stops. Truncation is reported as `Corrupted_SNDFile`:
/// under the throw policy that aborts, otherwise the records read so far
/// are kept.
pub fn walk<R: Read + Seek>(
    r: &mut R,
    header: &Header,
    cat: &mut Catalog,
    c: &mut Collector,
) -> Result<WalkSummary> {
    let mut sum = WalkSummary {
        visited: 0,
        stored: 0,
        duplicates: 0,
        end: WalkEnd::Exhausted,
    };
    r.seek(SeekFrom::Start(u64::from(header.table_off)))
        .map_err(|e| io_fatal(c, e))?;
    let mut payload = Vec::new();

    for _ in 0..header.record_count {
        let at = r.stream_position().map_err(|e| io_fatal(c, e))?;
        let mut buf = [0u8; ENTRY_SIZE];
        if !read_full(r, &mut buf).map_err(|e| io_fatal(c, e))? {
            debug!(at, "record header truncated");
            c.report(ErrorKind::CorruptedSndFile)?;
            sum.end = WalkEnd::Truncated;
            break;
        }
        let rec = RecordHeader::parse(&buf);
        if rec.ends_chain(at) {
            debug!(at, next = rec.next_off, "end of record chain");
            sum.end = WalkEnd::ChainEnd;
            break;
        }
        sum.visited += 1;

        if !cat.claim(rec.group, rec.item, c)? {
            sum.duplicates += 1;
            r.seek(SeekFrom::Start(u64::from(rec.next_off)))
                .map_err(|e| io_fatal(c, e))?;
            continue;
        }

        let body_end = at + ENTRY_SIZE as u64 + u64::from(rec.size);
        if body_end > header.file_size {
            debug!(at, size = rec.size, "payload runs past end of file");
            c.report(ErrorKind::CorruptedSndFile)?;
            sum.end = WalkEnd::Truncated;
            break;
        }
        payload.resize(rec.size as usize, 0);
        if !read_full(r, &mut payload).map_err(|e| io_fatal(c, e))? {
            c.report(ErrorKind::CorruptedSndFile)?;
            sum.end = WalkEnd::Truncated;
            break;
        }
        if let Applied::Stored { .. } = cat.store_claimed(rec.group, rec.item, &payload, c)? {
            sum.stored += 1;
        }
        r.seek(SeekFrom::Start(u64::from(rec.next_off)))
            .map_err(|e| io_fatal(c, e))?;
    }
    Ok(sum)
}

/// A read failure other than end of file ends the load as corruption.
fn io_fatal(c: &mut Collector, e: std::io::Error) -> SndError {
    debug!(error = %e, "read failed while walking records");
    c.fatal(ErrorKind::CorruptedSndFile)
}

fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    match r.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == IoKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}
