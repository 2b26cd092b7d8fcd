//! Composite (group, item) key.
//!
//! Layout of the packed `i64`:
//!
//! ```text
//! bits  0..32  group (u32 image of the i32)
//! bits 32..64  item  (u32 image of the i32)
//! ```

const GROUP_SHIFT: u32 = 0;
const ITEM_SHIFT: u32 = 32;
const FIELD_MASK: i64 = 0xffff_ffff;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundKey(i64);

impl SoundKey {
    pub fn new(group: i32, item: i32) -> Self {
        Self(encode(group, item))
    }

    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> i64 {
        self.0
    }

    pub fn group(self) -> i32 {
        decode_group(self.0)
    }

    pub fn item(self) -> i32 {
        decode_item(self.0)
    }
}

#[inline]
pub fn encode(group: i32, item: i32) -> i64 {
    let g = group as u32 as i64 & FIELD_MASK;
    let i = item as u32 as i64 & FIELD_MASK;
    (g << GROUP_SHIFT) | (i << ITEM_SHIFT)
}

#[inline]
pub fn decode_group(key: i64) -> i32 {
    ((key >> GROUP_SHIFT) & FIELD_MASK) as u32 as i32
}

#[inline]
pub fn decode_item(key: i64) -> i32 {
    ((key >> ITEM_SHIFT) & FIELD_MASK) as u32 as i32
}
