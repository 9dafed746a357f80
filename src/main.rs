//! HousePaint - painting contractor site server
//!
//! Serves the marketing site and its house color visualizer, and offers a
//! couple of offline helpers for the illustration data.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (127.0.0.1:3000, ~/.config/HousePaint/config.toml)
//! housepaint
//!
//! # Specify port and config file
//! housepaint serve --port 8080 --config ./housepaint.toml
//!
//! # Write the Desert Modern preset as an SVG
//! housepaint render --preset "Desert Modern" -o house.svg
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use housepaint::branding::{APP_DISPLAY_NAME, TAGLINE};
use housepaint::config::Config;
use housepaint::models::{HouseVariant, Section, VariantCatalog};
use housepaint::visualizer::{ColorVisualizer, OsRandom};
use housepaint::{render, web};

/// HousePaint - painting contractor site with a house color visualizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the web server (default)
    Serve(ServeArgs),
    /// Render a house illustration as SVG
    Render(RenderArgs),
    /// List the sections, swatches and presets of the illustrations
    Palettes(PalettesArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Host to bind to (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Config file. Defaults to the platform-specific location:
    /// - Linux: ~/.config/HousePaint/config.toml
    /// - macOS: ~/Library/Application Support/HousePaint/config.toml
    /// - Windows: %APPDATA%\HousePaint\config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Illustration variant (southwest, cottage)
    #[arg(long, default_value = "southwest")]
    variant: HouseVariant,

    /// Start from a named preset instead of the defaults
    #[arg(long)]
    preset: Option<String>,

    /// Section to outline; none when omitted
    #[arg(long)]
    active: Option<Section>,

    /// Pick a random swatch for every section
    #[arg(long)]
    random: bool,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PalettesArgs {
    /// Only list this variant
    #[arg(long)]
    variant: Option<HouseVariant>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("Invalid server settings")?;

    info!("{} - {}", APP_DISPLAY_NAME, TAGLINE);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    web::run_server(config, addr).await
}

fn render_svg(args: &RenderArgs) -> anyhow::Result<()> {
    let catalog = VariantCatalog::load(args.variant)?;
    let mut visualizer = ColorVisualizer::new(&catalog);

    if let Some(name) = &args.preset {
        visualizer
            .apply_preset_named(name)
            .context(format!("Cannot apply preset to {}", args.variant))?;
    }
    if args.random {
        visualizer.randomize_colors(&mut OsRandom);
    }
    if let Some(section) = args.active {
        visualizer
            .select_section(section)
            .context(format!("Cannot outline section on {}", args.variant))?;
    }

    let svg = render::render_house(args.variant, visualizer.applied(), args.active);
    match &args.output {
        Some(path) => fs::write(path, svg)
            .context(format!("Failed to write SVG: {}", path.display()))?,
        None => print!("{svg}"),
    }
    Ok(())
}

fn list_palettes(args: &PalettesArgs) -> anyhow::Result<()> {
    let variants = match args.variant {
        Some(variant) => vec![variant],
        None => HouseVariant::ALL.to_vec(),
    };

    for variant in variants {
        let catalog = VariantCatalog::load(variant)?;
        println!("{} ({})", variant.display_name(), variant.id());
        for swatches in &catalog.sections {
            let default = catalog
                .defaults
                .get(swatches.section)
                .map(|c| c.to_hex())
                .unwrap_or_default();
            println!("  {} [{}] default {}", swatches.label, swatches.section.id(), default);
            for option in &swatches.options {
                println!("    {}  {}", option.color.to_hex(), option.name);
            }
        }
        println!("  Presets:");
        for preset in &catalog.presets {
            println!("    {}", preset.name);
        }
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => serve(ServeArgs::default()).await,
        Some(Command::Serve(args)) => serve(args).await,
        Some(Command::Render(args)) => render_svg(&args),
        Some(Command::Palettes(args)) => list_palettes(&args),
    }
}
