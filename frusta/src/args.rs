use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build an RTPQ over synthetic layer pairs and drain it, logging each
    /// pick. Exists to exercise the scheduler end to end without a real
    /// compositor.
    Demo(DemoArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DemoArgs {
    /// Number of synthetic layer pairs to build.
    #[arg(long, env = "RTPQ_DEMO_PAIRS", default_value_t = 4)]
    pub pairs: u32,

    /// Tree priority policy: smoothness, new-content, or same.
    #[arg(long, env = "RTPQ_DEMO_POLICY", default_value = "smoothness")]
    pub policy: String,

    /// Device pixel ratio used to compute the ideal mip level.
    #[arg(long, env = "RTPQ_DEMO_DPI", default_value_t = 96.0)]
    pub dpi: f32,
}
