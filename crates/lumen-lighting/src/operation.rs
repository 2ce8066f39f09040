use lumen_geom::{IVec3, VoxelBox};

use crate::{LightChannel, LightingError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// Blocks inside the box changed: darken, then brighten.
    Edit,
    /// Light inside the box is settled but may not have reached chunks
    /// that were loaded before it. Brighten outward only.
    Spread,
}

/// Request to settle one light channel inside a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightOperation {
    pub bounds: VoxelBox,
    pub channel: LightChannel,
    pub kind: OperationKind,
}

impl LightOperation {
    pub fn new(bounds: VoxelBox, channel: LightChannel) -> Result<Self, LightingError> {
        if !bounds.is_valid() {
            return Err(LightingError::InvalidBounds {
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self {
            bounds,
            channel,
            kind: OperationKind::Edit,
        })
    }

    pub fn point(pos: IVec3, channel: LightChannel) -> Self {
        Self {
            bounds: VoxelBox::point(pos),
            channel,
            kind: OperationKind::Edit,
        }
    }

    pub(crate) fn spread(bounds: VoxelBox, channel: LightChannel) -> Self {
        Self {
            bounds,
            channel,
            kind: OperationKind::Spread,
        }
    }
}
