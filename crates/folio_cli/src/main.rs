//! Folio CLI
//!
//! Simulate, inspect and initialize portfolio pages.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod render;
mod simulate;

use folio_layout::{RevealTrigger, Threshold};
use folio_site::{ContactSubmission, Page, SectionComposer, SiteConfig, CONFIG_FILE};
use simulate::SimulationOptions;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio portfolio page toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the page, scroll it top to bottom and print every reveal event
    Simulate {
        /// Directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: String,

        /// Scroll speed in px per second
        #[arg(short, long, default_value = "600")]
        scroll_speed: f32,

        /// Frames per second
        #[arg(short, long, default_value = "60")]
        fps: u32,

        /// Keep ticking this long after the page end is reached (ms)
        #[arg(long, default_value = "1000")]
        hold_ms: u64,
    },

    /// Print the composed reveal groups
    Content {
        /// Directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: String,
    },

    /// Render the mail handoff of a contact form submission
    Contact {
        /// Directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: String,

        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Write a default folio.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Show version and default motion settings
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            scroll_speed,
            fps,
            hold_ms,
        } => cmd_simulate(
            &config,
            SimulationOptions {
                scroll_speed,
                fps,
                hold_ms,
            },
        ),

        Commands::Content { config } => cmd_content(&config),

        Commands::Contact {
            config,
            name,
            email,
            message,
        } => cmd_contact(
            &config,
            ContactSubmission {
                name,
                email,
                message,
            },
        ),

        Commands::Init { dir } => cmd_init(&dir),

        Commands::Info => cmd_info(),
    }
}

fn load_config(dir: &str) -> Result<SiteConfig> {
    let path = PathBuf::from(dir);
    let config = SiteConfig::load_from_dir(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    for link in config.content().dangling_anchors() {
        warn!("Link '{}' points at unknown section {}", link.label, link.href);
    }
    Ok(config)
}

fn cmd_simulate(dir: &str, options: SimulationOptions) -> Result<()> {
    if options.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    if !options.scroll_speed.is_finite() || options.scroll_speed < 0.0 {
        anyhow::bail!("--scroll-speed must be a non-negative number");
    }

    let config = load_config(dir)?;
    let mut page = Page::new(config);
    info!(
        "Simulating {}px page at {}px/s, {} fps",
        page.page_height(),
        options.scroll_speed,
        options.fps
    );

    let report = simulate::run(&mut page, &options);

    for page_event in &report.events {
        let item = page_event.event.item();
        println!(
            "{:>7}ms  {:<14} {:<5} {:<10} {}",
            page_event.event.at_ms(),
            page_event.group.name(),
            item.to_string(),
            simulate::event_label(&page_event.event),
            simulate::describe_item(&page, item)
        );
    }
    println!();

    if report.settled {
        info!(
            "All items settled after {}ms ({} frames)",
            report.duration_ms, report.frames
        );
    } else {
        warn!(
            "Stopped after {}ms ({} frames) with items still pending",
            report.duration_ms, report.frames
        );
    }
    Ok(())
}

fn cmd_content(dir: &str) -> Result<()> {
    let config = load_config(dir)?;
    let content = config.content();
    let groups = SectionComposer::new().compose(&content, &config.motion);

    for group in &groups {
        let trigger = match group.config.trigger {
            RevealTrigger::OnMount => "on mount".to_string(),
            RevealTrigger::InView(threshold) => format!("in view at {}", threshold.value()),
        };
        println!(
            "{} ({} item(s), {}, {}ms)",
            group.kind,
            group.items.len(),
            trigger,
            group.config.transition.duration_ms
        );

        if group.is_empty() {
            println!("  (empty, not wired)");
            continue;
        }
        for (item, offset) in group.items.iter().zip(group.offsets()) {
            println!("  {:<5} +{:<5}ms  {}", item.id().to_string(), offset, item.payload());
        }
    }

    println!();
    for line in render::page_chrome(&content, chrono::Local::now().year()) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_contact(dir: &str, submission: ContactSubmission) -> Result<()> {
    let config = load_config(dir)?;
    let content = config.content();

    if content.contact.recipient().is_none() {
        warn!("Contact action '{}' is not a mailto: address", content.contact.action);
    }

    println!("{}", render::handoff(&submission.handoff(&content.contact)));
    Ok(())
}

fn cmd_init(dir: &str) -> Result<()> {
    let path = PathBuf::from(dir);
    let config_path = path.join(CONFIG_FILE);

    // Check if already initialized
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    SiteConfig::default().save(&path)?;

    info!("Wrote {}", config_path.display());
    info!("Run `folio simulate` to preview the reveal timeline");

    Ok(())
}

fn cmd_info() -> Result<()> {
    let config = SiteConfig::default();
    let motion = &config.motion;

    println!("Folio");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Default motion:");
    println!(
        "  - hero characters: {}ms apart, {}ms spring (bounce {})",
        motion.char_step_ms, motion.char_duration_ms, motion.char_bounce
    );
    println!("  - subtitle: fade after {}ms", motion.subtitle_delay_ms);
    println!(
        "  - project cards: {}ms apart, {}ms rise of {}px",
        motion.card_step_ms, motion.card_duration_ms, motion.card_rise_px
    );
    println!("  - skill tags: {}ms apart", motion.skill_step_ms);
    println!(
        "  - in-view threshold: {}",
        Threshold::from_option(motion.threshold).value()
    );
    println!();
    println!("Viewport: {}x{}", config.viewport.width, config.viewport.height);

    Ok(())
}
