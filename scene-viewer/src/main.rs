use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use scene_viewer::app::ViewerApp;
use scene_viewer::cli::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(cli.model);

    log::info!("Scene Viewer - drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
