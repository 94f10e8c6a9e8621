//! Collision detection against level geometry
//!
//! Platforms are line segments and may slope, so the surface height is
//! interpolated across the segment's x-range. Everything else is
//! circle-vs-circle or a box test.

use glam::Vec2;

use super::level::{Ladder, Platform};

/// Surface height of a platform at `x`, extrapolating past the endpoints.
///
/// Returns `None` for a vertical segment where the slope is undefined.
pub fn surface_y_at(platform: &Platform, x: f32) -> Option<f32> {
    if platform.is_vertical() {
        return None;
    }
    let t = (x - platform.x1) / (platform.x2 - platform.x1);
    Some(platform.y1 + t * (platform.y2 - platform.y1))
}

/// Vertical probe used to land a body on a platform
#[derive(Debug, Clone, Copy)]
pub struct SurfaceProbe {
    /// Horizontal extent of the body
    pub left: f32,
    pub right: f32,
    /// Where along the segment the surface height is sampled
    pub sample_x: f32,
    /// Lowest point of the body
    pub bottom: f32,
    /// Point that must stay above the tolerance band
    pub top: f32,
    /// Depth below the surface that still counts as contact
    pub tolerance: f32,
}

/// Find the surface a body lands on this tick.
///
/// Contact only counts while falling or resting (`vy >= 0`). When more than
/// one platform qualifies the highest surface wins.
pub fn landing_surface(platforms: &[Platform], probe: &SurfaceProbe, vy: f32) -> Option<f32> {
    if vy < 0.0 {
        return None;
    }
    platforms
        .iter()
        .filter(|p| probe.right >= p.min_x() && probe.left <= p.max_x())
        .filter_map(|p| surface_y_at(p, probe.sample_x))
        .filter(|&surface| probe.bottom >= surface && probe.top <= surface + probe.tolerance)
        .reduce(f32::min)
}

/// Ladder the player is touching, if any.
///
/// Contact needs the player's center within `grab` of the ladder centerline
/// and a vertical overlap between the player box and the ladder span.
pub fn ladder_at(
    ladders: &[Ladder],
    center_x: f32,
    top: f32,
    bottom: f32,
    grab: f32,
) -> Option<&Ladder> {
    ladders
        .iter()
        .find(|l| (center_x - l.x).abs() < grab && bottom > l.y && top < l.bottom())
}

/// Strict circle overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Keep a circle inside the side walls, reflecting its horizontal velocity.
///
/// Returns true if a wall was hit.
pub fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> bool {
    if pos.x - radius < 0.0 {
        pos.x = radius;
        vel.x = vel.x.abs();
        true
    } else if pos.x + radius > width {
        pos.x = width - radius;
        vel.x = -vel.x.abs();
        true
    } else {
        false
    }
}

/// Whether a point is inside the stage grown by `margin` on every side
pub fn within_bounds(pos: Vec2, margin: f32, width: f32, height: f32) -> bool {
    pos.x >= -margin && pos.x <= width + margin && pos.y >= -margin && pos.y <= height + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn girder(x1: f32, y1: f32, x2: f32, y2: f32) -> Platform {
        Platform { x1, y1, x2, y2 }
    }

    fn probe_at(x: f32, bottom: f32) -> SurfaceProbe {
        SurfaceProbe {
            left: x - 10.0,
            right: x + 10.0,
            sample_x: x,
            bottom,
            top: bottom,
            tolerance: 15.0,
        }
    }

    #[test]
    fn test_surface_interpolates_slope() {
        let p = girder(0.0, 500.0, 700.0, 480.0);
        assert_eq!(surface_y_at(&p, 0.0), Some(500.0));
        assert_eq!(surface_y_at(&p, 700.0), Some(480.0));
        assert!((surface_y_at(&p, 350.0).unwrap() - 490.0).abs() < 1e-4);
    }

    #[test]
    fn test_surface_handles_reversed_endpoints() {
        let p = girder(700.0, 480.0, 0.0, 500.0);
        assert!((surface_y_at(&p, 350.0).unwrap() - 490.0).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_platform_is_skipped() {
        let wall = girder(200.0, 100.0, 200.0, 300.0);
        assert_eq!(surface_y_at(&wall, 200.0), None);
        assert_eq!(landing_surface(&[wall], &probe_at(200.0, 150.0), 1.0), None);
    }

    #[test]
    fn test_landing_within_band() {
        let floor = [girder(0.0, 580.0, 800.0, 580.0)];
        assert_eq!(landing_surface(&floor, &probe_at(100.0, 585.0), 2.0), Some(580.0));
        // Above the surface
        assert_eq!(landing_surface(&floor, &probe_at(100.0, 575.0), 2.0), None);
        // Sunk past the band
        assert_eq!(landing_surface(&floor, &probe_at(100.0, 600.0), 2.0), None);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let floor = [girder(0.0, 580.0, 800.0, 580.0)];
        assert_eq!(landing_surface(&floor, &probe_at(100.0, 585.0), -3.0), None);
    }

    #[test]
    fn test_landing_needs_horizontal_overlap() {
        let ledge = [girder(300.0, 400.0, 500.0, 400.0)];
        assert_eq!(landing_surface(&ledge, &probe_at(100.0, 405.0), 1.0), None);
        assert_eq!(landing_surface(&ledge, &probe_at(305.0, 405.0), 1.0), Some(400.0));
    }

    #[test]
    fn test_highest_surface_wins() {
        let stacked = [girder(0.0, 590.0, 800.0, 590.0), girder(0.0, 580.0, 800.0, 580.0)];
        assert_eq!(landing_surface(&stacked, &probe_at(100.0, 591.0), 1.0), Some(580.0));
    }

    #[test]
    fn test_ladder_contact() {
        let ladders = [Ladder {
            x: 650.0,
            y: 490.0,
            height: 90.0,
        }];
        assert!(ladder_at(&ladders, 660.0, 510.0, 545.0, 20.0).is_some());
        // Too far from the centerline
        assert!(ladder_at(&ladders, 675.0, 510.0, 545.0, 20.0).is_none());
        // Entirely above the ladder
        assert!(ladder_at(&ladders, 650.0, 440.0, 475.0, 20.0).is_none());
    }

    #[test]
    fn test_wall_bounce_reflects() {
        let mut pos = Vec2::new(5.0, 100.0);
        let mut vel = Vec2::new(-3.0, 0.0);
        assert!(bounce_off_walls(&mut pos, &mut vel, 12.0, 800.0));
        assert_eq!(pos.x, 12.0);
        assert_eq!(vel.x, 3.0);

        let mut pos = Vec2::new(795.0, 100.0);
        let mut vel = Vec2::new(3.0, 0.0);
        assert!(bounce_off_walls(&mut pos, &mut vel, 12.0, 800.0));
        assert_eq!(pos.x, 788.0);
        assert_eq!(vel.x, -3.0);
    }

    #[test]
    fn test_bounds_margin() {
        assert!(within_bounds(Vec2::new(-50.0, 300.0), 100.0, 800.0, 600.0));
        assert!(!within_bounds(Vec2::new(-150.0, 300.0), 100.0, 800.0, 600.0));
        assert!(!within_bounds(Vec2::new(400.0, 701.0), 100.0, 800.0, 600.0));
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }
}
