/// Fixed debug geometry: world axis frame and ground grid
///
/// Static line-segment data with no algorithmic content; drawn under
/// the loaded mesh every frame.
use crossterm::style::Color;
use nalgebra::Point3;

/// A world-space line segment with a display color.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
    pub color: Color,
}

impl LineSegment {
    fn new(start: Point3<f32>, end: Point3<f32>, color: Color) -> Self {
        Self { start, end, color }
    }
}

/// Length of each world axis line.
const AXIS_LENGTH: f32 = 10.0;

/// Half-extent of the ground grid in the y = 0 plane.
const GRID_HALF_EXTENT: f32 = 5.0;
/// Spacing between grid lines.
const GRID_STEP: f32 = 0.5;

/// Reference frame: +X red, +Y green, +Z blue, from the origin.
pub fn axis_frame() -> Vec<LineSegment> {
    let o = Point3::origin();
    vec![
        LineSegment::new(o, Point3::new(AXIS_LENGTH, 0.0, 0.0), Color::Red),
        LineSegment::new(o, Point3::new(0.0, AXIS_LENGTH, 0.0), Color::Green),
        LineSegment::new(o, Point3::new(0.0, 0.0, AXIS_LENGTH), Color::Blue),
    ]
}

/// Ground-plane grid: evenly spaced lines parallel to the X and Z axes.
pub fn ground_grid() -> Vec<LineSegment> {
    let mut lines = Vec::new();
    let steps = (2.0 * GRID_HALF_EXTENT / GRID_STEP) as i32;
    for i in 0..=steps {
        let t = -GRID_HALF_EXTENT + i as f32 * GRID_STEP;
        lines.push(LineSegment::new(
            Point3::new(t, 0.0, -GRID_HALF_EXTENT),
            Point3::new(t, 0.0, GRID_HALF_EXTENT),
            Color::DarkGrey,
        ));
        lines.push(LineSegment::new(
            Point3::new(-GRID_HALF_EXTENT, 0.0, t),
            Point3::new(GRID_HALF_EXTENT, 0.0, t),
            Color::DarkGrey,
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lies_in_ground_plane() {
        let grid = ground_grid();
        assert!(!grid.is_empty());
        for line in &grid {
            assert_eq!(line.start.y, 0.0);
            assert_eq!(line.end.y, 0.0);
        }
    }

    #[test]
    fn test_axis_frame_has_three_axes() {
        assert_eq!(axis_frame().len(), 3);
    }
}
