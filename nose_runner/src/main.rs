//! nose_runner — interactive entry point.

use anyhow::Context;
use clap::Parser;

use nose_runner::app::run;
use nose_runner::config::{AppConfig, EmitterKind, LandmarkSourceKind, LoggingConfig};
use nose_runner::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "nose_runner",
    about = "Control a runner game with your nose: lean to steer, rise to jump, duck to slide",
    version
)]
struct Cli {
    /// Starting jump line, as a fraction of frame height (0.1–0.9)
    #[arg(long, default_value_t = 0.4)]
    jump_line: f32,

    /// Starting slide line, as a fraction of frame height (0.1–0.9)
    #[arg(long, default_value_t = 0.6)]
    slide_line: f32,

    /// Frame width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Where the nose position comes from
    #[arg(long, value_enum, default_value_t = LandmarkSourceKind::Sim)]
    source: LandmarkSourceKind,

    /// Flip incoming landmarks horizontally
    #[arg(long)]
    mirror: bool,

    /// Where key presses go
    #[arg(long, value_enum, default_value_t = EmitterKind::Log)]
    emit: EmitterKind,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            jump_line:  self.jump_line,
            slide_line: self.slide_line,
            width:      self.width,
            height:     self.height,
            source:     self.source,
            mirror:     self.mirror,
            emitter:    self.emit,
            logging:    LoggingConfig {
                level: if self.verbose { "debug" } else { "info" }.to_string(),
                json:  self.json_logs,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let print_config = cli.print_config;
    let cfg = cli.into_config();

    if print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    init_logging(&cfg.logging);

    println!();
    println!("  Nose Runner — hands-free game controller");
    match cfg.source {
        LandmarkSourceKind::Sim  => println!("  Source: keyboard simulation (W/A/S/D, H hides face)"),
        LandmarkSourceKind::Feed => println!("  Source: landmark feed on stdin"),
    }
    println!("  Drag the yellow/red lines to adjust; press Q to quit.");
    println!();

    run(cfg).context("controller failed")?;
    Ok(())
}
