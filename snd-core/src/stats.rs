use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub groups: u64,
    pub items: u64,
    pub declared_records: u64,
    pub blobs: u64,
    pub stored_bytes: u64,
    pub file_bytes: u64,
    pub duplicates_skipped: u64,
}
