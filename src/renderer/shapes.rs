//! Shape generation for 2D primitives

use glam::Vec2;

/// Corners of a `width` x `height` rectangle whose top-left corner sits at
/// `offset` in local space, rotated by `theta` around `center`
pub fn rotated_rect(center: Vec2, offset: Vec2, width: f32, height: f32, theta: f32) -> [Vec2; 4] {
    let rot = Vec2::from_angle(theta);
    [
        offset,
        offset + Vec2::new(width, 0.0),
        offset + Vec2::new(width, height),
        offset + Vec2::new(0.0, height),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// The two thin crossed bars that make up a trail star
pub fn star_cross(center: Vec2, size: f32, theta: f32) -> [[Vec2; 4]; 2] {
    let half = size / 2.0;
    [
        // Vertical bar
        rotated_rect(center, Vec2::new(0.0, -half), 1.0, size, theta),
        // Horizontal bar
        rotated_rect(center, Vec2::new(-half, 0.0), size, 1.0, theta),
    ]
}
