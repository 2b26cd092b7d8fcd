use std::collections::HashMap;

use crate::container::record::ENTRY_SIZE;

/// One stored payload: a span of the backing buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobSpan {
    pub start: usize,
    pub len: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inserted {
    pub index: usize,
    /// False when an identical blob was already stored.
    pub fresh: bool,
}

/// Append-only store of distinct payloads.
///
/// Identity is exact byte equality. The digest map only narrows the
/// candidates that get compared; since no two stored blobs are identical,
/// the index returned for a repeated payload is the one a linear
/// first-match scan would find.
#[derive(Clone, Debug, Default)]
pub struct BlobStore {
    data: Vec<u8>,
    spans: Vec<BlobSpan>,
    digests: Vec<[u8; 32]>,
    by_digest: HashMap<(usize, [u8; 32]), Vec<usize>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve for a load of `records` payloads from a file of `file_size`
    /// bytes. Every payload sits behind a record header, which caps `records`.
    pub fn with_capacity(records: usize, file_size: usize) -> Self {
        let records = records.min(file_size / ENTRY_SIZE);
        Self {
            data: Vec::with_capacity(file_size),
            spans: Vec::with_capacity(records),
            digests: Vec::with_capacity(records),
            by_digest: HashMap::with_capacity(records),
        }
    }

    pub fn insert(&mut self, bytes: &[u8]) -> Inserted {
        let digest = *blake3::hash(bytes).as_bytes();
        let key = (bytes.len(), digest);
        if let Some(cands) = self.by_digest.get(&key) {
            for &index in cands {
                if self.blob(index) == Some(bytes) {
                    return Inserted {
                        index,
                        fresh: false,
                    };
                }
            }
        }

        let index = self.spans.len();
        let start = self.data.len();
        self.data.extend_from_slice(bytes);
        self.spans.push(BlobSpan {
            start,
            len: bytes.len(),
        });
        self.digests.push(digest);
        self.by_digest.entry(key).or_default().push(index);
        Inserted { index, fresh: true }
    }

    pub fn blob(&self, index: usize) -> Option<&[u8]> {
        let s = self.spans.get(index)?;
        self.data.get(s.start..s.start + s.len)
    }

    pub fn span(&self, index: usize) -> Option<BlobSpan> {
        self.spans.get(index).copied()
    }

    pub fn digest(&self, index: usize) -> Option<&[u8; 32]> {
        self.digests.get(index)
    }

    /// Number of distinct blobs.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total payload bytes held.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
        self.spans.shrink_to_fit();
        self.digests.shrink_to_fit();
        self.by_digest.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.spans.clear();
        self.digests.clear();
        self.by_digest.clear();
    }
}
