use clap::Parser;
use postlist::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "postlist", about = "Browse posts and their comments in the terminal")]
struct Args {
    /// API base URL, e.g. https://gorest.co.in/public/v2
    #[arg(long)]
    base_url: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logger isn't up yet; everything loading finds is reported once it is
    let loaded = config::load_config();
    let cli = CliOverrides {
        base_url: args.base_url,
        log_level: args.log_level,
        log_file: args.log_file,
    };
    let resolved = match &loaded {
        Ok(loaded) => config::resolve(&loaded.config, &cli),
        Err(_) => config::resolve(&Default::default(), &cli),
    };

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    match &loaded {
        Ok(loaded) => loaded.source.log(),
        Err(e) => log::warn!("Ignoring config file: {}", e),
    }
    if let Some(level) = &resolved.rejected_log_level {
        log::warn!("Unknown log level '{}', using {}", level, resolved.log_level);
    }
    log::debug!("Config: {:?}", resolved);
    log::info!("PostList starting up against {}", resolved.base_url);

    postlist::tui::run(resolved)
}
