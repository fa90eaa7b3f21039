use clap::Parser;

/// An interactive particle field background
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Seed for particle placement
    ///
    /// the same seed and pointer movement replay the same field
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cap the framerate
    ///
    /// if unset frames follow the display refresh
    #[arg(short, long)]
    pub framerate: Option<u32>,

    /// Show a window with frame and field statistics
    #[arg(long)]
    pub overlay: bool,

    /// Initial window width, in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height, in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}
