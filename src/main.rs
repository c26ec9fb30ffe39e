//! # Blockworld Headless Runner
//!
//! Streams a world for a fixed number of frames and logs what was built.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

use std::path::PathBuf;

fn main() {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    if let Err(err) = blockworld::run(config_path.as_deref()) {
        eprintln!("blockworld: {err}");
        std::process::exit(1);
    }
}
