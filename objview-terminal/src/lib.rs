/// Terminal-based interactive OBJ viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Matrix4;
use objview_core::{MeshBuffers, OrbitCamera, ProjectionMode};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod projection;
pub mod renderer;
pub mod scene;

pub use renderer::AsciiRenderer;

use projection::projection_matrix;
use scene::LineSegment;

/// Degrees of orbit per dragged character cell.
const ORBIT_SENSITIVITY: f32 = 2.0;
/// World units of pan per dragged character cell.
const PAN_SENSITIVITY: f32 = 0.05;
/// World units of zoom per scroll tick.
const ZOOM_SENSITIVITY: f32 = 0.25;

/// Which mouse button is currently held, tracked from press/release
/// events. Gates whether a drag orbits or pans; the camera itself
/// never sees button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum HeldButton {
    #[default]
    None,
    Left,
    Right,
}

/// Main application struct for the terminal viewer
pub struct ViewerApp {
    mesh: MeshBuffers,
    camera: OrbitCamera,
    renderer: AsciiRenderer,
    projection: Matrix4<f32>,
    aspect: f32,
    frame_lines: Vec<LineSegment>,
    grid_lines: Vec<LineSegment>,
    show_frame: bool,
    held: HeldButton,
    last_mouse: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    pub fn new(mesh: MeshBuffers) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let aspect = width as f32 / height as f32;
        let camera = OrbitCamera::new();
        let projection = projection_matrix(camera.mode(), aspect);

        Ok(Self {
            mesh,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            projection,
            aspect,
            frame_lines: scene::axis_frame(),
            grid_lines: scene::ground_grid(),
            show_frame: true,
            held: HeldButton::None,
            last_mouse: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input events
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.aspect = width as f32 / height as f32;
                self.projection = projection_matrix(self.camera.mode(), self.aspect);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('1') => self.camera.rotate_orbit(-10.0, 0.0),
            KeyCode::Char('2') => self.camera.rotate_orbit(10.0, 0.0),
            KeyCode::Char('3') => self.camera.rotate_orbit(0.0, -10.0),
            KeyCode::Char('4') => self.camera.rotate_orbit(0.0, 10.0),
            KeyCode::Char('v') => {
                // New mode means a new projection matrix.
                let mode = self.camera.toggle_projection_mode();
                self.projection = projection_matrix(mode, self.aspect);
            }
            KeyCode::Char('f') => {
                self.show_frame = !self.show_frame;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(button) => {
                self.held = match button {
                    MouseButton::Left => HeldButton::Left,
                    MouseButton::Right => HeldButton::Right,
                    MouseButton::Middle => HeldButton::None,
                };
                self.last_mouse = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(_) => {
                self.held = HeldButton::None;
                self.last_mouse = None;
            }
            MouseEventKind::Drag(_) => {
                let Some((last_x, last_y)) = self.last_mouse else {
                    return;
                };
                let dx = mouse.column as f32 - last_x as f32;
                let dy = mouse.row as f32 - last_y as f32;
                self.last_mouse = Some((mouse.column, mouse.row));

                match self.held {
                    HeldButton::Left => {
                        self.camera
                            .rotate_orbit(dx * ORBIT_SENSITIVITY, dy * ORBIT_SENSITIVITY);
                    }
                    HeldButton::Right => {
                        self.camera.pan(PAN_SENSITIVITY, dx, -dy);
                    }
                    HeldButton::None => {}
                }
            }
            MouseEventKind::ScrollUp => {
                self.camera.zoom(ZOOM_SENSITIVITY, 1.0);
            }
            MouseEventKind::ScrollDown => {
                self.camera.zoom(ZOOM_SENSITIVITY, -1.0);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // View matrix queried once per frame; model is identity.
        let mvp = self.projection * self.camera.view_matrix();

        self.renderer.clear();
        self.renderer.render_lines(&self.grid_lines, &mvp);
        if self.show_frame {
            self.renderer.render_lines(&self.frame_lines, &mvp);
        }
        self.renderer.render_mesh(&self.mesh, &mvp);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let mode = match self.camera.mode() {
            ProjectionMode::Orthographic => "ortho",
            ProjectionMode::Perspective => "persp",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "objview | FPS: {:.1} | {} | LMB=Orbit RMB=Pan Scroll=Zoom V=Projection F=Frame Q=Quit",
                self.fps, mode
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
