//! Fixed-width field extraction. Out-of-range reads yield `None`.

#[inline]
fn take<const N: usize>(buf: &[u8], at: usize) -> Option<[u8; N]> {
    buf.get(at..at.checked_add(N)?)?.try_into().ok()
}

#[inline]
pub fn le_u16(buf: &[u8], at: usize) -> Option<u16> {
    take::<2>(buf, at).map(u16::from_le_bytes)
}

#[inline]
pub fn le_u32(buf: &[u8], at: usize) -> Option<u32> {
    take::<4>(buf, at).map(u32::from_le_bytes)
}

#[inline]
pub fn be_u16(buf: &[u8], at: usize) -> Option<u16> {
    take::<2>(buf, at).map(u16::from_be_bytes)
}

#[inline]
pub fn be_u32(buf: &[u8], at: usize) -> Option<u32> {
    take::<4>(buf, at).map(u32::from_be_bytes)
}

#[inline]
pub fn fourcc(buf: &[u8], at: usize) -> Option<[u8; 4]> {
    take::<4>(buf, at)
}
