use std::fs::File;
use std::str::FromStr;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use waypoint::core::config::{self, Overrides};
use waypoint::tui;

#[derive(Parser)]
#[command(name = "waypoint", about = "Screen-navigation tracking playground")]
struct Args {
    /// Milliseconds between a navigation command and its lifecycle events
    #[arg(long)]
    transition_ms: Option<u64>,
    /// Log level for waypoint.log (error|warn|info|debug|trace)
    #[arg(long)]
    log_level: Option<String>,
    /// Screen presented as the initial root
    #[arg(long)]
    root: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = config::load().unwrap_or_else(|e| {
        eprintln!("waypoint: {e}; continuing with defaults");
        config::WaypointConfig::default()
    });
    let resolved = config::resolve(
        file_config,
        Overrides {
            transition_ms: args.transition_ms,
            log_level: args.log_level,
            root_screen: args.root,
        },
    );

    // File logger - the TUI owns the terminal, so logs go to waypoint.log
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = LevelFilter::from_str(&resolved.log_level).unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("waypoint.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!(
        "waypoint starting; transition {:?}, root '{}'",
        resolved.transition,
        resolved.root_screen
    );

    tui::run(resolved)
}
