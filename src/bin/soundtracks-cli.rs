use std::io::Write;

use clap::{ArgAction, Parser};
use soundtracks::error::Result;
use soundtracks::{ScraperConfig, SoundtrackService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "soundtracks-cli")]
#[command(about = "Print the soundtrack credits of an IMDb title as JSON", long_about = None)]
struct Cli {
    /// IMDb id of the film or TV series, with or without the "tt" prefix
    title_id: String,

    /// Site root to scrape (can also be set via IMDB_BASE_URL env var)
    #[arg(long, env = "IMDB_BASE_URL", default_value = soundtracks::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Skip the portrait lookup for linked artists
    #[arg(long)]
    no_images: bool,

    /// Keep soundtrack entries that have no title
    #[arg(long)]
    keep_untitled: bool,

    /// Print the JSON on a single line
    #[arg(long)]
    compact: bool,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("soundtracks={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScraperConfig::new()
        .with_base_url(cli.base_url)
        .with_images(!cli.no_images)
        .with_untitled(cli.keep_untitled);
    let service = SoundtrackService::new(config)?;

    let soundtracks = service.soundtracks(&cli.title_id).await?;

    let json = if cli.compact {
        serde_json::to_string(&soundtracks)?
    } else {
        serde_json::to_string_pretty(&soundtracks)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run(cli).await?;
    Ok(())
}
