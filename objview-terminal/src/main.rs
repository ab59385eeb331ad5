/// objview Terminal Viewer
///
/// Renders an OBJ mesh (or a built-in cube) over a ground grid and a
/// world axis frame.
/// Controls:
///   - Left drag: Orbit | Right drag: Pan | Scroll: Zoom
///   - 1/2/3/4: Orbit by keyboard
///   - V: Toggle orthographic/perspective | F: Toggle axis frame
///   - Q/ESC: Quit

use objview_terminal::ViewerApp;
use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    // Exactly one mesh per session; reject extra paths before any
    // parsing begins.
    if args.len() > 1 {
        eprintln!("Usage: objview-terminal [obj-file]");
        eprintln!("err: drop only one file");
        return ExitCode::from(2);
    }

    let mesh = match args.first() {
        Some(path) => match objview_core::obj::load_obj(path) {
            Ok(mesh) => mesh,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            println!("No OBJ file provided, using built-in cube...");
            objview_core::MeshBuffers::cube(2.0)
        }
    };

    println!("Starting terminal viewer (press Q to quit)...");
    if let Err(e) = run(mesh) {
        eprintln!("Viewer error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(mesh: objview_core::MeshBuffers) -> io::Result<()> {
    let mut app = ViewerApp::new(mesh)?;
    app.run()
}
