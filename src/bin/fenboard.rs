use std::io::Write as _;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Render a FEN piece placement onto the board background and write a PNG to stdout.
#[derive(Parser, Debug)]
#[command(name = "fenboard", version, about)]
struct Cli {
    /// Piece-placement field of a FEN string.
    #[arg(long, default_value = fenboard::START_PLACEMENT)]
    fen: String,

    /// Overlay the board boundary and cell outlines, for calibrating the geometry.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = fenboard::RenderConfig {
        debug: cli.debug,
        ..Default::default()
    };
    let assets = fenboard::DirSource::new(".");

    let png = fenboard::render_png(&cli.fen, &cfg, &assets)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&png).context("write png to stdout")?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
