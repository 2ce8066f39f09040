//! Packed 4-bit light storage, two voxels per byte.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NibbleArray {
    data: Vec<u8>,
    len: usize,
}

impl NibbleArray {
    pub fn new(len: usize) -> Self {
        Self::filled(len, 0)
    }

    pub fn filled(len: usize, level: u8) -> Self {
        debug_assert!(level <= 15, "Light level must be 0-15");
        let packed = (level & 0x0F) | ((level & 0x0F) << 4);
        Self {
            data: vec![packed; len.div_ceil(2)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        let b = self.data[i >> 1];
        if i & 1 == 1 { b >> 4 } else { b & 0x0F }
    }

    #[inline]
    pub fn set(&mut self, i: usize, level: u8) {
        debug_assert!(level <= 15, "Light level must be 0-15");
        let b = &mut self.data[i >> 1];
        if i & 1 == 1 {
            *b = (*b & 0x0F) | ((level & 0x0F) << 4);
        } else {
            *b = (*b & 0xF0) | (level & 0x0F);
        }
    }

    pub fn fill(&mut self, level: u8) {
        let packed = (level & 0x0F) | ((level & 0x0F) << 4);
        self.data.fill(packed);
    }

    /// Raw packed bytes, as handed to a storage layer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
