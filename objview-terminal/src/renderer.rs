/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use objview_core::MeshBuffers;
use std::io::Write;

use crate::scene::LineSegment;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts 3D geometry to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let size = width * height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![Color::Reset; size];
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    /// Rasterize the flat per-corner streams of a loaded mesh. Shading
    /// uses the normal stream when the source provided one, otherwise
    /// the face normal is recomputed from the corner positions.
    pub fn render_mesh(&mut self, mesh: &MeshBuffers, mvp: &Matrix4<f32>) {
        for (tri, corners) in mesh.positions.chunks_exact(3).enumerate() {
            let normal = if mesh.has_normals() {
                mesh.normals[tri * 3]
            } else {
                face_normal(&corners[0], &corners[1], &corners[2])
            };
            self.render_triangle(corners, &normal, mvp);
        }
    }

    fn render_triangle(
        &mut self,
        corners: &[Point3<f32>],
        normal: &Vector3<f32>,
        mvp: &Matrix4<f32>,
    ) {
        // Project vertices to screen space
        let mut screen_coords = Vec::new();
        for corner in corners {
            if let Some(coord) =
                project_to_screen(mvp, corner, self.width as u32, self.height as u32, true)
            {
                screen_coords.push(coord);
            } else {
                return; // Triangle is clipped
            }
        }

        if screen_coords.len() != 3 {
            return;
        }

        // Map brightness to character
        let light_dir = Vector3::new(0.0, 0.0, 1.0);
        let brightness = normal.normalize().dot(&light_dir).abs();
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        let color = color_for_char(character);
                        self.plot(x as usize, y as usize, depth, character, color);
                    }
                }
            }
        }
    }

    /// Rasterize colored line segments (axis frame, ground grid).
    /// Segments reaching past the viewport are clipped per cell.
    pub fn render_lines(&mut self, lines: &[LineSegment], mvp: &Matrix4<f32>) {
        for line in lines {
            let start =
                project_to_screen(mvp, &line.start, self.width as u32, self.height as u32, false);
            let end =
                project_to_screen(mvp, &line.end, self.width as u32, self.height as u32, false);
            if let (Some(a), Some(b)) = (start, end) {
                self.rasterize_line(a, b, line.color);
            }
        }
    }

    fn rasterize_line(&mut self, a: (f32, f32, f32), b: (f32, f32, f32), color: Color) {
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps == 0 {
            return;
        }

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + dx * t;
            let y = a.1 + dy * t;
            let depth = a.2 + (b.2 - a.2) * t;

            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }
            self.plot(x as usize, y as usize, depth, '.', color);
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, character: char, color: Color) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Project a world-space point through an MVP matrix to screen space.
///
/// Returns `(x, y, depth)` in character cells, or `None` when the
/// point is unprojectable (w near zero) or, with `reject_offscreen`,
/// outside the NDC cube.
fn project_to_screen(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
    reject_offscreen: bool,
) -> Option<(f32, f32, f32)> {
    let clip = mvp * point.to_homogeneous();

    // Prevent division by near-zero homogeneous coordinates
    if clip.w.abs() < 1e-6 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let depth = clip.z / clip.w;

    if reject_offscreen
        && (!(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth))
    {
        return None;
    }

    // Convert to screen space
    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, depth))
}

fn face_normal(v0: &Point3<f32>, v1: &Point3<f32>, v2: &Point3<f32>) -> Vector3<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let n = edge1.cross(&edge2);
    if n.norm() < 1e-12 {
        // Degenerate triangle; any unit vector shades it flat.
        Vector3::new(0.0, 0.0, 1.0)
    } else {
        n.normalize()
    }
}

fn color_for_char(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::projection_matrix;
    use objview_core::{OrbitCamera, ProjectionMode};

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = OrbitCamera::new();
        let mvp = projection_matrix(ProjectionMode::Perspective, 1.0) * camera.view_matrix();
        let (x, y, _) =
            project_to_screen(&mvp, &Point3::origin(), 80, 40, true).expect("origin visible");
        assert!((x - 40.0).abs() < 1.0);
        assert!((y - 20.0).abs() < 1.0);
    }

    #[test]
    fn test_cube_fills_some_cells() {
        let camera = OrbitCamera::new();
        let mvp = projection_matrix(ProjectionMode::Perspective, 1.0) * camera.view_matrix();

        let mut renderer = AsciiRenderer::new(80, 40);
        renderer.render_mesh(&MeshBuffers::cube(2.0), &mvp);

        let filled = renderer.char_buffer.iter().filter(|&&c| c != ' ').count();
        assert!(filled > 0);
    }

    #[test]
    fn test_barycentric_centroid() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).expect("non-degenerate");
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-5);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
    }
}
