//! Ray picking against the voxel grid and the ground plane.
//!
//! The resolver is pure geometry: callers supply the ray, an occupancy
//! predicate, and the intent (place or remove). Which intent a click maps to
//! is decided one level up.
#![forbid(unsafe_code)]

pub mod raycast;

use voxpaint_geom::{Aabb, Face, Ray, Vec3};
use voxpaint_world::{VoxelCoord, World};

/// Default world-space edge length of one voxel.
pub const DEFAULT_GRID_UNIT: f32 = 50.0;
/// Default pick range in world units.
pub const DEFAULT_MAX_DISTANCE: f32 = 12_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Place,
    Remove,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Voxel(VoxelCoord),
    /// The infinite plane y = 0, seen from above.
    Ground,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub surface: Surface,
    /// Outward normal of the surface that was hit.
    pub face: Face,
    pub point: Vec3,
    pub distance: f32,
}

impl PickHit {
    /// Cell the given intent acts on: the neighbour across the hit face for
    /// placement, the hit voxel itself for removal. The ground cannot be removed.
    pub fn target(&self, intent: Intent, grid_unit: f32) -> Option<VoxelCoord> {
        match (self.surface, intent) {
            (Surface::Voxel(c), Intent::Place) => {
                let (nx, ny, nz) = self.face.normal();
                c.offset(nx, ny, nz)
            }
            (Surface::Voxel(c), Intent::Remove) => Some(c),
            (Surface::Ground, Intent::Place) => {
                let c = VoxelCoord::containing(self.point.x, 0.0, self.point.z, grid_unit);
                Some(VoxelCoord::new(c.x, 0, c.z))
            }
            (Surface::Ground, Intent::Remove) => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Picker {
    pub grid_unit: f32,
    pub max_distance: f32,
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl Picker {
    /// Non-positive or non-finite settings fall back to the defaults.
    pub fn new(grid_unit: f32, max_distance: f32) -> Self {
        Self {
            grid_unit: if grid_unit.is_finite() && grid_unit > 0.0 {
                grid_unit
            } else {
                DEFAULT_GRID_UNIT
            },
            max_distance: if max_distance.is_finite() && max_distance >= 0.0 {
                max_distance
            } else {
                DEFAULT_MAX_DISTANCE
            },
        }
    }

    /// Nearest voxel face or ground hit along `ray`. On an exact distance tie
    /// the voxel wins. A ray starting too far out for its cells to be
    /// addressed hits nothing.
    pub fn pick<F>(&self, ray: &Ray, mut is_occupied: F) -> Option<PickHit>
    where
        F: FnMut(VoxelCoord) -> bool,
    {
        let unit = self.grid_unit;
        if !raycast::within_grid(ray.origin / unit, self.max_distance / unit) {
            return None;
        }
        let voxel = raycast::raycast_first_hit(
            ray.origin / unit,
            ray.dir,
            self.max_distance / unit,
            |x, y, z| is_occupied(VoxelCoord::new(x, y, z)),
        )
        .map(|gh| {
            let coord = VoxelCoord::from(gh.cell);
            let min = Vec3::new(coord.x as f32, coord.y as f32, coord.z as f32) * unit;
            // Refine against the actual cube; the traversal distance is the fallback
            // for rays that graze an edge.
            let (distance, face) = Aabb::cube(min, unit)
                .ray_hit(ray)
                .unwrap_or((gh.t * unit, gh.face));
            PickHit {
                surface: Surface::Voxel(coord),
                face,
                point: ray.at(distance),
                distance,
            }
        });

        let ground = if ray.origin.y > 0.0 && ray.dir.y < 0.0 {
            ray.hit_plane_y(0.0)
                .filter(|t| *t <= self.max_distance)
                .map(|t| PickHit {
                    surface: Surface::Ground,
                    face: Face::PosY,
                    point: ray.at(t),
                    distance: t,
                })
        } else {
            None
        };

        match (voxel, ground) {
            (Some(v), Some(g)) => Some(if v.distance <= g.distance { v } else { g }),
            (v, g) => v.or(g),
        }
    }

    /// Pick against a world's occupancy and resolve the target cell for `intent`.
    pub fn target_in(&self, world: &World, ray: &Ray, intent: Intent) -> Option<VoxelCoord> {
        self.pick(ray, |c| world.contains(c))
            .and_then(|hit| hit.target(intent, self.grid_unit))
    }
}
