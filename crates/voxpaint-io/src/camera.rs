use voxpaint_geom::Vec3;

use crate::document::{CameraEntry, Rotation};
use crate::error::CodecError;

/// Persisted camera transform. Orientation is yaw about +Y then pitch about
/// the local X axis; there is no roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(150.0, 150.0, 300.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraState {
    pub fn to_entry(&self) -> CameraEntry {
        CameraEntry {
            position: self.position.to_array(),
            rotation: Rotation::Euler([self.pitch, self.yaw, 0.0]),
        }
    }

    pub fn from_entry(entry: &CameraEntry) -> Result<Self, CodecError> {
        let position = Vec3::from(entry.position);
        let (yaw, pitch) = match &entry.rotation {
            Rotation::Euler([x, y, _]) => (*y, *x),
            Rotation::Ordered(x, y, _, order) if order == "YXZ" => (*y, *x),
            Rotation::Ordered(x, y, z, order) if order == "XYZ" => yaw_pitch_from_xyz(*x, *y, *z),
            Rotation::Ordered(_, _, _, order) => {
                return Err(CodecError::CorruptDocument(format!(
                    "unsupported camera rotation order '{order}'"
                )));
            }
        };
        if !position.is_finite() || !yaw.is_finite() || !pitch.is_finite() {
            return Err(CodecError::CorruptDocument("camera transform is not finite".into()));
        }
        Ok(Self { position, yaw, pitch })
    }
}

/// Re-express an `XYZ` Euler rotation as yaw/pitch (`YXZ`), dropping roll.
pub fn yaw_pitch_from_xyz(x: f32, y: f32, z: f32) -> (f32, f32) {
    let (b, a) = x.sin_cos();
    let (d, c) = y.sin_cos();
    let (f, e) = z.sin_cos();

    // Rotation matrix entries for Rx * Ry * Rz
    let m11 = c * e;
    let m13 = d;
    let m23 = -b * c;
    let m31 = b * f - a * e * d;
    let m33 = a * c;

    let pitch = (-m23.clamp(-1.0, 1.0)).asin();
    let yaw = if m23.abs() < 0.999_999_9 {
        m13.atan2(m33)
    } else {
        (-m31).atan2(m11)
    };
    (yaw, pitch)
}
