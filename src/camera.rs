use voxpaint_geom::{Ray, Vec3};
use voxpaint_io::CameraState;

use crate::config::CameraConfig;

/// Keys held during a movement update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveInput {
    pub fn is_idle(&self) -> bool {
        *self == MoveInput::default()
    }
}

/// Turns a pointer position into a world-space ray.
pub trait PointerRay {
    fn ray_from_pointer(&self, sx: f32, sy: f32, width: f32, height: f32) -> Option<Ray>;
}

/// Free-fly camera. Yaw turns about +Y, pitch about the camera's X axis;
/// yaw 0 / pitch 0 looks down -Z.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,   // radians
    pub pitch: f32, // radians
    pub fov_deg: f32,
    pub move_speed: f32,
    pub vertical_speed: f32,
    pub mouse_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self::with_config(position, &CameraConfig::default())
    }

    pub fn with_config(position: Vec3, cfg: &CameraConfig) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_deg: cfg.fov_deg,
            move_speed: cfg.move_speed,
            vertical_speed: cfg.vertical_speed,
            mouse_sensitivity: cfg.mouse_sensitivity,
        }
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    pub fn set_state(&mut self, state: &CameraState) {
        self.position = state.position;
        self.yaw = state.yaw;
        self.pitch = state.pitch.clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    pub fn up(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * sp, cp, cy * sp)
    }

    /// Mouse-look by a pointer delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    /// Horizontal movement follows the view direction flattened onto XZ;
    /// vertical movement is along world +Y at its own speed.
    pub fn update(&mut self, input: &MoveInput, dt: f32) {
        if input.is_idle() || !(dt > 0.0) {
            return;
        }
        let mut wish = Vec3::ZERO;
        if input.forward {
            wish.z -= 1.0;
        }
        if input.back {
            wish.z += 1.0;
        }
        if input.left {
            wish.x -= 1.0;
        }
        if input.right {
            wish.x += 1.0;
        }
        let wish = wish.normalized();
        let mut vertical = 0.0;
        if input.up {
            vertical += 1.0;
        }
        if input.down {
            vertical -= 1.0;
        }

        let mut flat = self.forward();
        flat.y = 0.0;
        let flat = flat.normalized();
        let step = self.right() * (wish.x * self.move_speed * dt)
            + flat * (-wish.z * self.move_speed * dt)
            + Vec3::UP * (vertical * self.vertical_speed * dt);
        self.position += step;
    }
}

impl PointerRay for FlyCamera {
    /// Perspective ray through pixel (`sx`, `sy`) of a `width`×`height` viewport.
    fn ray_from_pointer(&self, sx: f32, sy: f32, width: f32, height: f32) -> Option<Ray> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        let ndc_x = sx / width * 2.0 - 1.0;
        let ndc_y = -(sy / height) * 2.0 + 1.0;
        let tan_half = (self.fov_deg.to_radians() * 0.5).tan();
        let aspect = width / height;
        let dir = self.forward()
            + self.right() * (ndc_x * tan_half * aspect)
            + self.up() * (ndc_y * tan_half);
        Ray::new(self.position, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let cam = FlyCamera::new(Vec3::ZERO);
        assert!(close(cam.forward(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(close(cam.right(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(cam.up(), Vec3::UP));
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.look(310.0, -120.0);
        let (f, r, u) = (cam.forward(), cam.right(), cam.up());
        assert!(f.dot(r).abs() < 1e-5 && f.dot(u).abs() < 1e-5 && r.dot(u).abs() < 1e-5);
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!(close(r.cross(u), -f));
    }

    #[test]
    fn look_clamps_pitch() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.look(0.0, -10_000.0);
        assert_eq!(cam.pitch, std::f32::consts::FRAC_PI_2);
        cam.look(0.0, 20_000.0);
        assert_eq!(cam.pitch, -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn look_sensitivity_is_radians_per_pixel() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.look(100.0, 50.0);
        assert!((cam.yaw + 0.2).abs() < 1e-6);
        assert!((cam.pitch + 0.1).abs() < 1e-6);
    }

    #[test]
    fn forward_movement_ignores_pitch() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        cam.pitch = -0.8;
        let input = MoveInput {
            forward: true,
            ..Default::default()
        };
        cam.update(&input, 0.5);
        assert!(close(cam.position, Vec3::new(0.0, 0.0, -100.0)));
    }

    #[test]
    fn vertical_and_strafe_speeds() {
        let mut cam = FlyCamera::new(Vec3::ZERO);
        let input = MoveInput {
            right: true,
            up: true,
            ..Default::default()
        };
        cam.update(&input, 1.0);
        assert!(close(cam.position, Vec3::new(200.0, 100.0, 0.0)));
    }

    #[test]
    fn centre_pixel_ray_is_forward() {
        let mut cam = FlyCamera::new(Vec3::new(1.0, 2.0, 3.0));
        cam.look(40.0, 25.0);
        let ray = cam.ray_from_pointer(400.0, 300.0, 800.0, 600.0).unwrap();
        assert!(close(ray.dir, cam.forward()));
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn top_edge_ray_tilts_by_half_fov() {
        let cam = FlyCamera::new(Vec3::ZERO);
        let ray = cam.ray_from_pointer(400.0, 0.0, 800.0, 600.0).unwrap();
        let angle = ray.dir.y.atan2(-ray.dir.z).to_degrees();
        assert!((angle - cam.fov_deg * 0.5).abs() < 1e-3);
        assert!(cam.ray_from_pointer(0.0, 0.0, 0.0, 600.0).is_none());
    }

    #[test]
    fn state_round_trip() {
        let mut cam = FlyCamera::new(Vec3::new(5.0, 6.0, 7.0));
        cam.look(12.0, -3.0);
        let mut other = FlyCamera::new(Vec3::ZERO);
        other.set_state(&cam.state());
        assert_eq!(other.state(), cam.state());
    }
}
