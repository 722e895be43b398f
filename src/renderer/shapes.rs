//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Filled axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle border of `thickness`, centered on the rectangle's edges
pub fn rect_outline(min: Vec2, max: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = thickness / 2.0;
    let mut vertices = Vec::with_capacity(24);
    // Top and bottom span the full outer width; sides fill between them
    vertices.extend(rect(
        Vec2::new(min.x - h, min.y - h),
        Vec2::new(max.x + h, min.y + h),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x - h, max.y - h),
        Vec2::new(max.x + h, max.y + h),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x - h, min.y + h),
        Vec2::new(min.x + h, max.y - h),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(max.x - h, min.y + h),
        Vec2::new(max.x + h, max.y - h),
        color,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(10.0, 20.0);
        let vertices = circle(center, 5.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 48);
        for (i, v) in vertices.iter().enumerate() {
            let d = Vec2::from(v.position).distance(center);
            if i % 3 == 0 {
                assert!(d < 1e-4);
            } else {
                assert!((d - 5.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_ring_stays_in_band() {
        let vertices = ring(Vec2::ZERO, 9.0, 11.0, [1.0; 4], 8);
        assert_eq!(vertices.len(), 48);
        for v in &vertices {
            let d = Vec2::from(v.position).length();
            assert!(d > 8.99 && d < 11.01);
        }
    }

    #[test]
    fn test_rect_outline_covers_border() {
        let vertices = rect_outline(Vec2::ZERO, Vec2::new(100.0, 20.0), 4.0, [1.0; 4]);
        assert_eq!(vertices.len(), 24);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -2.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 102.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 22.0);
    }
}
