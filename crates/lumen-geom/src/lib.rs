//! Integer voxel geometry shared by the world and lighting crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// The voxel one step across `face`. Saturates at the edge of the
    /// coordinate range.
    #[inline]
    pub fn step(self, face: Face) -> IVec3 {
        self.saturating_add(face.offset())
    }

    #[inline]
    pub fn saturating_add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
            self.z.saturating_add(rhs.z),
        )
    }

    #[inline]
    pub fn saturating_sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(
            self.x.saturating_sub(rhs.x),
            self.y.saturating_sub(rhs.y),
            self.z.saturating_sub(rhs.z),
        )
    }

    #[inline]
    pub fn min(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    /// True when every component is <= the matching component of `rhs`.
    #[inline]
    pub fn all_le(self, rhs: IVec3) -> bool {
        self.x <= rhs.x && self.y <= rhs.y && self.z <= rhs.z
    }
}

impl Add for IVec3 {
    type Output = IVec3;
    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for IVec3 {
    #[inline]
    fn add_assign(&mut self, rhs: IVec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for IVec3 {
    type Output = IVec3;
    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for IVec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: IVec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<IVec3> for (i32, i32, i32) {
    fn from(value: IVec3) -> Self {
        (value.x, value.y, value.z)
    }
}

/// Axis faces. Indices: 0=+Y,1=-Y,2=+X,3=-X,4=+Z,5=-Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// The four faces that leave a column sideways.
    pub const HORIZONTAL: [Face; 4] = [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ];

    #[inline]
    pub const fn offset(self) -> IVec3 {
        match self {
            Face::PosY => IVec3::new(0, 1, 0),
            Face::NegY => IVec3::new(0, -1, 0),
            Face::PosX => IVec3::new(1, 0, 0),
            Face::NegX => IVec3::new(-1, 0, 0),
            Face::PosZ => IVec3::new(0, 0, 1),
            Face::NegZ => IVec3::new(0, 0, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Face {
        match self {
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::PosX => Face::NegX,
            Face::NegX => Face::PosX,
            Face::PosZ => Face::NegZ,
            Face::NegZ => Face::PosZ,
        }
    }
}

/// Axis-aligned box of voxels; both corners are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VoxelBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl VoxelBox {
    /// Builds a box from two corners without reordering them. Use
    /// [`VoxelBox::is_valid`] to check the result.
    #[inline]
    pub const fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn point(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing both corners, whatever their order.
    #[inline]
    pub fn spanning(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// min <= max on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.all_le(self.max)
    }

    #[inline]
    pub fn contains(&self, p: IVec3) -> bool {
        self.min.all_le(p) && p.all_le(self.max)
    }

    /// Extent per axis. Zero on any axis of an invalid box.
    #[inline]
    pub fn size(&self) -> (usize, usize, usize) {
        let ext = |lo: i32, hi: i32| if hi < lo { 0 } else { (hi as i64 - lo as i64) as usize + 1 };
        (
            ext(self.min.x, self.max.x),
            ext(self.min.y, self.max.y),
            ext(self.min.z, self.max.z),
        )
    }

    #[inline]
    pub fn volume(&self) -> usize {
        let (sx, sy, sz) = self.size();
        sx * sy * sz
    }

    /// Grows the box by `by` on every side, stopping at the coordinate range.
    #[inline]
    pub fn expanded(&self, by: i32) -> VoxelBox {
        VoxelBox {
            min: self.min.saturating_sub(IVec3::splat(by)),
            max: self.max.saturating_add(IVec3::splat(by)),
        }
    }

    pub fn intersect(&self, other: &VoxelBox) -> Option<VoxelBox> {
        let b = VoxelBox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        };
        b.is_valid().then_some(b)
    }

    /// Restricts the Y range to `lo..=hi`, or `None` if nothing is left.
    pub fn clamp_y(&self, lo: i32, hi: i32) -> Option<VoxelBox> {
        let b = VoxelBox {
            min: IVec3::new(self.min.x, self.min.y.max(lo), self.min.z),
            max: IVec3::new(self.max.x, self.max.y.min(hi), self.max.z),
        };
        b.is_valid().then_some(b)
    }

    /// Iterates Y-major, then Z, then X (same order as chunk storage).
    pub fn iter(self) -> impl Iterator<Item = IVec3> {
        let b = self;
        let ys = b.min.y..=b.max.y;
        ys.flat_map(move |y| {
            (b.min.z..=b.max.z)
                .flat_map(move |z| (b.min.x..=b.max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}
