use voxpaint_geom::{Face, Vec3};

/// First occupied cell met by a grid-space ray.
#[derive(Clone, Copy, Debug)]
pub struct GridHit {
    pub cell: (i32, i32, i32),
    /// Face the ray entered through.
    pub face: Face,
    /// Entry distance in grid units.
    pub t: f32,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether every cell a ray of length `reach` from `origin` can visit has
/// an `i32` address.
pub fn within_grid(origin: Vec3, reach: f32) -> bool {
    if !reach.is_finite() {
        return false;
    }
    let limit = f64::from(i32::MAX) - f64::from(reach.max(0.0)) - 2.0;
    [origin.x, origin.y, origin.z]
        .iter()
        .all(|c| c.is_finite() && f64::from(*c).abs() < limit)
}

/// Amanatides–Woo traversal over unit cells. `dir` must be normalized.
/// The cell containing `origin` is never reported. Rays that could leave the
/// addressable grid, or have no finite length, hit nothing.
pub fn raycast_first_hit<F>(origin: Vec3, dir: Vec3, max_dist: f32, mut is_solid: F) -> Option<GridHit>
where
    F: FnMut(i32, i32, i32) -> bool,
{
    if !within_grid(origin, max_dist) {
        return None;
    }
    let mut vx = origin.x.floor() as i32;
    let mut vy = origin.y.floor() as i32;
    let mut vz = origin.z.floor() as i32;

    let stepx = step_of(dir.x);
    let stepy = step_of(dir.y);
    let stepz = step_of(dir.z);

    let invx = inv_or_max(dir.x);
    let invy = inv_or_max(dir.y);
    let invz = inv_or_max(dir.z);
    let tdx = if stepx == 0 { f32::MAX } else { invx };
    let tdy = if stepy == 0 { f32::MAX } else { invy };
    let tdz = if stepz == 0 { f32::MAX } else { invz };

    let fx = origin.x - origin.x.floor();
    let fy = origin.y - origin.y.floor();
    let fz = origin.z - origin.z.floor();
    let mut tmx = if stepx > 0 { (1.0 - fx) * invx } else if stepx < 0 { fx * invx } else { f32::MAX };
    let mut tmy = if stepy > 0 { (1.0 - fy) * invy } else if stepy < 0 { fy * invy } else { f32::MAX };
    let mut tmz = if stepz > 0 { (1.0 - fz) * invz } else if stepz < 0 { fz * invz } else { f32::MAX };

    // Each step crosses one cell boundary; bound by the boundaries a ray of
    // this length can cross on all three axes.
    let max_steps = (max_dist.max(0.0).ceil() as usize).saturating_mul(3).saturating_add(3);
    for _ in 0..max_steps {
        // Step through smallest tMax
        let (t, face) = if tmx < tmy && tmx < tmz {
            vx = vx.checked_add(stepx)?;
            let t = tmx;
            tmx += tdx;
            (t, Face::entered_from(0, stepx > 0))
        } else if tmy < tmz {
            vy = vy.checked_add(stepy)?;
            let t = tmy;
            tmy += tdy;
            (t, Face::entered_from(1, stepy > 0))
        } else {
            vz = vz.checked_add(stepz)?;
            let t = tmz;
            tmz += tdz;
            (t, Face::entered_from(2, stepz > 0))
        };
        if t > max_dist {
            break;
        }
        if is_solid(vx, vy, vz) {
            return Some(GridHit {
                cell: (vx, vy, vz),
                face,
                t,
            });
        }
    }
    None
}
