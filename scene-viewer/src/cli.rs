// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-viewer")]
#[command(about = "Interactive 3D model viewer", long_about = None)]
pub struct Cli {
    /// Path to the glTF/GLB model to display
    #[arg(long = "model", default_value = "./model.glb")]
    pub model: PathBuf,
}
