/// Example: Load and view an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use objview_core::{obj, MeshBuffers};
use objview_terminal::ViewerApp;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        // Use default cube
        let cube = MeshBuffers::cube(2.0);
        let mut app = ViewerApp::new(cube)?;
        return app.run();
    }

    let obj_path = &args[1];

    println!("Loading OBJ file: {}", obj_path);

    let mesh = obj::load_obj(obj_path).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load OBJ: {}", e))
    })?;

    println!("Loaded {} triangles", mesh.triangle_count());
    println!("Starting terminal viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the viewer
    let mut app = ViewerApp::new(mesh)?;
    app.run()?;

    Ok(())
}
