use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::params::SceneParameters;

/// On-disk save layout. `blocks`, `camera` and `textures` are required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub blocks: Vec<BlockEntry>,
    pub camera: CameraEntry,
    /// Texture name to PNG data URL.
    pub textures: BTreeMap<String, String>,
    #[serde(default)]
    pub parameters: SceneParameters,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEntry {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub texture_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraEntry {
    pub position: [f32; 3],
    pub rotation: Rotation,
}

/// Euler angles in radians, `[x, y, z]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rotation {
    /// Implicit `YXZ` order: `[pitch, yaw, roll]`.
    Euler([f32; 3]),
    /// Angles followed by an explicit order name such as `"XYZ"`.
    Ordered(f32, f32, f32, String),
}
