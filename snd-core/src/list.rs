use crate::archive::SndArchive;
use crate::domain::SoundRow;

pub fn list(archive: &SndArchive) -> Vec<SoundRow> {
    archive
        .iter()
        .enumerate()
        .map(|(index, s)| SoundRow {
            index,
            group: s.group(),
            item: s.item(),
            blob: s.blob_index(),
            byte_size: s.byte_size(),
            channels: s.channels(),
            hz: s.hz(),
            bits: s.bits(),
            duration_secs: s.duration_secs(),
            digest: s.digest_hex(),
            comment: s.comment_text(),
        })
        .collect()
}
