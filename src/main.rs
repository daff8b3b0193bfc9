//! # Voxel Sculpt Command-Line Entry Point
//!
//! Calls into the library's `run()`, which loads or builds a scene, meshes it and
//! logs statistics.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- castle.json out/
//! ```

fn main() {
    if let Err(err) = voxel_sculpt::run() {
        log::error!("{err}");
        eprintln!("voxel-sculpt: {err}");
        std::process::exit(1);
    }
}
