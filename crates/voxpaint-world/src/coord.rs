use serde::{Deserialize, Serialize};

/// Integer grid cell address. One unit is one voxel edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring cell, or `None` past the edge of the grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// Cell containing the world-space point, for cubes of edge `unit`.
    #[inline]
    pub fn containing(px: f32, py: f32, pz: f32, unit: f32) -> Self {
        Self::new(
            (px / unit).floor() as i32,
            (py / unit).floor() as i32,
            (pz / unit).floor() as i32,
        )
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<VoxelCoord> for (i32, i32, i32) {
    fn from(value: VoxelCoord) -> Self {
        (value.x, value.y, value.z)
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
