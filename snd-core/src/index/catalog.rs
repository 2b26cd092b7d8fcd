use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::container::record::ENTRY_SIZE;
use crate::diag::Collector;
use crate::error::{ErrorKind, Result};
use crate::key::SoundKey;
use crate::store::blobs::BlobStore;
use crate::wave::ChunkLayout;

/// One addressable sound: which blob it uses and under what number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub blob: usize,
    pub key: SoundKey,
}

impl Entry {
    pub fn group(&self) -> i32 {
        self.key.group()
    }

    pub fn item(&self) -> i32 {
        self.key.item()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Stored { entry: usize, blob: usize },
    Duplicate,
}

/// In-memory index built while walking the record table.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub by_key: HashMap<SoundKey, usize>,
    pub entries: Vec<Entry>,
    pub groups: HashSet<i32>,
    pub store: BlobStore,
    /// Chunk layout per blob, parallel to the store.
    pub layouts: Vec<ChunkLayout>,
    pub duplicates: usize,
}

impl Catalog {
    /// Reserve for a load. `records` is capped by how many record headers
    /// `file_size` bytes can hold, so a bogus declared count cannot force a
    /// huge allocation.
    pub fn with_capacity(records: usize, file_size: usize) -> Self {
        let records = records.min(file_size / ENTRY_SIZE);
        Self {
            by_key: HashMap::with_capacity(records),
            entries: Vec::with_capacity(records),
            groups: HashSet::with_capacity(records),
            store: BlobStore::with_capacity(records, file_size),
            layouts: Vec::with_capacity(records),
            duplicates: 0,
        }
    }

    pub fn contains(&self, group: i32, item: i32) -> bool {
        self.by_key.contains_key(&SoundKey::new(group, item))
    }

    /// Register a key before its payload is read. `false` means the key was
    /// already taken; the duplicate warning has been recorded.
    pub fn claim(&mut self, group: i32, item: i32, c: &mut Collector) -> Result<bool> {
        if self.contains(group, item) {
            warn!(group, item, "duplicate sound number, keeping the first");
            self.duplicates += 1;
            c.report_sound(ErrorKind::WarningDuplicateSoundNumber, group, item)?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Claim the key and store the payload.
    pub fn apply(
        &mut self,
        group: i32,
        item: i32,
        payload: &[u8],
        c: &mut Collector,
    ) -> Result<Applied> {
        if !self.claim(group, item, c)? {
            return Ok(Applied::Duplicate);
        }
        self.store_claimed(group, item, payload, c)
    }

    /// Store a payload whose key passed [`Catalog::claim`].
    pub fn store_claimed(
        &mut self,
        group: i32,
        item: i32,
        payload: &[u8],
        c: &mut Collector,
    ) -> Result<Applied> {
        let key = SoundKey::new(group, item);
        let entry = self.entries.len();
        self.by_key.insert(key, entry);
        self.groups.insert(group);

        let ins = self.store.insert(payload);
        let mut bad_wave = None;
        if ins.fresh {
            let layout = ChunkLayout::scan(payload).unwrap_or_else(|kind| {
                bad_wave = Some(kind);
                ChunkLayout::default()
            });
            self.layouts.push(layout);
        }
        self.entries.push(Entry {
            blob: ins.index,
            key,
        });
        debug!(group, item, blob = ins.index, fresh = ins.fresh, "stored sound");

        if let Some(kind) = bad_wave {
            c.report(kind)?;
        }
        Ok(Applied::Stored {
            entry,
            blob: ins.index,
        })
    }

    pub fn layout(&self, blob: usize) -> ChunkLayout {
        self.layouts.get(blob).copied().unwrap_or_default()
    }

    pub fn shrink_to_fit(&mut self) {
        self.by_key.shrink_to_fit();
        self.entries.shrink_to_fit();
        self.groups.shrink_to_fit();
        self.store.shrink_to_fit();
        self.layouts.shrink_to_fit();
    }
}
