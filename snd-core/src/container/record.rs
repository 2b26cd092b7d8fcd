use crate::util::endian::le_u32;

pub const ENTRY_SIZE: usize = 16;

/// One record-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Absolute offset of the next record.
    pub next_off: u32,
    pub size: u32,
    pub group: i32,
    pub item: i32,
}

impl RecordHeader {
    pub fn parse(e: &[u8; ENTRY_SIZE]) -> Self {
        // Layout: [0..4]=next, [4..8]=size, [8..12]=group, [12..16]=item
        let field = |at| le_u32(e, at).unwrap_or(0);
        Self {
            next_off: field(0),
            size: field(4),
            group: field(8) as i32,
            item: field(12) as i32,
        }
    }

    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut buf = [0u8; ENTRY_SIZE];
        buf[0..4].copy_from_slice(&self.next_off.to_le_bytes());
        buf[4..8].copy_from_slice(&self.size.to_le_bytes());
        buf[8..12].copy_from_slice(&self.group.to_le_bytes());
        buf[12..16].copy_from_slice(&self.item.to_le_bytes());
        buf
    }

    /// The chain ends when the next offset is zero or does not move past
    /// the position this record was read from.
    pub fn ends_chain(&self, read_at: u64) -> bool {
        self.next_off == 0 || u64::from(self.next_off) <= read_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_numbers() {
        let mut e = [0u8; ENTRY_SIZE];
        e[0..4].copy_from_slice(&600u32.to_le_bytes());
        e[4..8].copy_from_slice(&44u32.to_le_bytes());
        e[8..12].copy_from_slice(&(-5i32).to_le_bytes());
        e[12..16].copy_from_slice(&7i32.to_le_bytes());
        let r = RecordHeader::parse(&e);
        assert_eq!(
            r,
            RecordHeader {
                next_off: 600,
                size: 44,
                group: -5,
                item: 7
            }
        );
        assert_eq!(r.to_bytes(), e);
    }

    #[test]
    fn chain_end_conditions() {
        let r = |next_off| RecordHeader {
            next_off,
            size: 0,
            group: 0,
            item: 0,
        };
        assert!(r(0).ends_chain(512));
        assert!(r(512).ends_chain(512));
        assert!(r(100).ends_chain(512));
        assert!(!r(513).ends_chain(512));
    }
}
