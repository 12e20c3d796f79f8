//! SDF-based collision detection
//!
//! Signed distances for the two body shapes, used by the built-in physics
//! world to push the ball out of walls.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box
pub fn sd_box(p: Vec2, center: Vec2, half_extents: Vec2) -> f32 {
    let d = (p - center).abs() - half_extents;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Compute SDF gradient (surface normal) using central differences
pub fn sdf_gradient<F>(p: Vec2, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let eps = 0.5;
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}

/// Result of SDF collision check
#[derive(Debug, Clone)]
pub struct SdfCollision {
    pub hit: bool,
    pub normal: Vec2,
    pub penetration: f32,
}

impl SdfCollision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between ball and an SDF shape
pub fn check_sdf_collision<F>(ball_pos: Vec2, ball_radius: f32, sdf: F) -> SdfCollision
where
    F: Fn(Vec2) -> f32,
{
    let dist = sdf(ball_pos);

    if dist < ball_radius {
        let normal = sdf_gradient(ball_pos, &sdf);
        SdfCollision {
            hit: true,
            normal,
            penetration: ball_radius - dist,
        }
    } else {
        SdfCollision::miss()
    }
}

/// Bounce velocity off a surface, keeping `restitution` of the normal part
#[inline]
pub fn bounce(vel: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let vn = vel.dot(normal);
    if vn >= 0.0 {
        return vel;
    }
    vel - (1.0 + restitution) * vn * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_box_inside_and_outside() {
        let c = Vec2::new(32.0, 32.0);
        let h = Vec2::splat(32.0);
        assert!((sd_box(Vec2::new(74.0, 32.0), c, h) - 10.0).abs() < 1e-4);
        assert!(sd_box(c, c, h) < 0.0);
        // Corner distance is diagonal
        let corner = sd_box(Vec2::new(67.0, 68.0), c, h);
        assert!((corner - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_box_collision_normal_points_out() {
        let c = Vec2::ZERO;
        let h = Vec2::splat(32.0);
        let hit = check_sdf_collision(Vec2::new(40.0, 0.0), 10.0, |p| sd_box(p, c, h));
        assert!(hit.hit);
        assert!((hit.penetration - 2.0).abs() < 1e-4);
        assert!(hit.normal.abs_diff_eq(Vec2::X, 1e-3));

        let miss = check_sdf_collision(Vec2::new(50.0, 0.0), 10.0, |p| sd_box(p, c, h));
        assert!(!miss.hit);
    }

    #[test]
    fn test_circle_distance() {
        assert!((sd_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 1.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce() {
        let v = bounce(Vec2::new(-100.0, 10.0), Vec2::X, 0.2);
        assert!(v.abs_diff_eq(Vec2::new(20.0, 10.0), 1e-3));
        // Moving away is untouched
        assert_eq!(bounce(Vec2::new(5.0, 0.0), Vec2::X, 0.2), Vec2::new(5.0, 0.0));
    }
}
