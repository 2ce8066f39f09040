//! Bit-packed 3-D flag grid used as the visited set of a single pass.

use bit_vec::BitVec;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("index ({x}, {y}, {z}) out of range for size {size:?}")]
pub struct Bool3DError {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub size: (usize, usize, usize),
}

#[derive(Clone, Debug)]
pub struct Bool3D {
    bits: BitVec,
    x_size: usize,
    y_size: usize,
    z_size: usize,
}

impl Bool3D {
    pub fn new(x_size: usize, y_size: usize, z_size: usize, initial: bool) -> Self {
        Self {
            bits: BitVec::from_elem(x_size * y_size * z_size, initial),
            x_size,
            y_size,
            z_size,
        }
    }

    #[inline]
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    #[inline]
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    #[inline]
    pub fn z_size(&self) -> usize {
        self.z_size
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Result<usize, Bool3DError> {
        let in_axis = |v: i32, size: usize| v >= 0 && (v as usize) < size;
        if in_axis(x, self.x_size) && in_axis(y, self.y_size) && in_axis(z, self.z_size) {
            Ok((y as usize * self.z_size + z as usize) * self.x_size + x as usize)
        } else {
            Err(Bool3DError {
                x,
                y,
                z,
                size: (self.x_size, self.y_size, self.z_size),
            })
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<bool, Bool3DError> {
        let i = self.index(x, y, z)?;
        Ok(self.bits.get(i).unwrap_or(false))
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: bool) -> Result<(), Bool3DError> {
        let i = self.index(x, y, z)?;
        self.bits.set(i, value);
        Ok(())
    }
}
