use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use panelctl::commands::{self, Screenshot};
use panelctl::config::Config;
use panelweb_app::ports::Method;
use panelweb_app::services::FormScope;
use panelweb_domain::about::{AboutLayout, AboutPanel};
use panelweb_domain::info::DEFAULT_INFO_URI;
use panelweb_domain::live_view::PageAction;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panelctl", version)]
#[command(about = "Drive a panel's web configuration pages from the command line")]
struct Cli {
    /// Configuration file (default: `panelctl.toml` when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Device base address, e.g. `http://192.168.1.50/`
    #[arg(short, long, global = true, value_name = "URL")]
    device: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Navigate, wait for the device, and save the screen as a bitmap
    Screenshot {
        /// Page action: `prev`, `next`, `back`, or empty to refresh
        #[arg(short, long, default_value = "")]
        action: PageAction,

        #[arg(short, long, default_value = "screenshot.bmp")]
        out: PathBuf,

        /// Keep refreshing until this many frames were saved
        #[arg(short, long, default_value_t = 1)]
        frames: usize,
    },
    /// Print the device status report as an HTML table
    Info {
        #[arg(short, long, default_value = DEFAULT_INFO_URI)]
        uri: String,
    },
    /// Print the about and license panel
    About {
        /// Render both blocks into one document container
        #[arg(long)]
        single: bool,

        /// Credit `LovyanGFX` as the graphics driver
        #[arg(long)]
        lovyangfx: bool,
    },
    /// Populate a page description from a configuration endpoint
    Fill {
        /// Page description (TOML)
        #[arg(short, long)]
        page: PathBuf,

        /// Configuration section, e.g. `wifi` or `mqtt`
        #[arg(short, long, conflicts_with = "uri", required_unless_present = "uri")]
        section: Option<String>,

        #[arg(short, long)]
        uri: Option<String>,

        #[arg(short, long, default_value = "GET")]
        method: Method,

        /// Only populate the first form
        #[arg(long)]
        first: bool,
    },
    /// Flatten a form of a page description and submit it
    Submit {
        /// Page description (TOML)
        #[arg(short, long)]
        page: PathBuf,

        #[arg(short, long, default_value_t = 0)]
        form: usize,

        /// POST the submission here instead of only logging it
        #[arg(short, long)]
        uri: Option<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("cannot load configuration")?;
    if let Some(device) = &cli.device {
        config.device.base_url.clone_from(device);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Screenshot {
            action,
            out,
            frames,
        } => {
            let save = |shot: &Screenshot| -> anyhow::Result<()> {
                std::fs::write(&out, &shot.bitmap)
                    .with_context(|| format!("cannot write {}", out.display()))?;
                tracing::info!(ts = shot.ts, bytes = shot.bitmap.len(), path = %out.display(), "screenshot saved");
                Ok(())
            };
            if frames == 1 {
                save(&commands::screenshot(&config, action).await?)?;
            } else if commands::watch(&config, action, frames, save).await? == 0 {
                anyhow::bail!("no screenshot received from {}", config.device.base_url);
            }
        }
        Command::Info { uri } => {
            writeln!(stdout, "{}", commands::info(&config, &uri).await?)?;
        }
        Command::About { single, lovyangfx } => {
            let layout = if single {
                AboutLayout::Single
            } else {
                config.about.layout
            };
            let panel = AboutPanel::new(layout, lovyangfx || config.about.lovyangfx);
            for (container, html) in commands::about(panel)? {
                writeln!(stdout, "<!-- {container} -->\n{html}")?;
            }
        }
        Command::Fill {
            page,
            section,
            uri,
            method,
            first,
        } => {
            let uri = match (uri, section) {
                (Some(uri), _) => uri,
                (None, Some(section)) => commands::section_uri(&section),
                (None, None) => anyhow::bail!("either --section or --uri is required"),
            };
            let scope = if first { FormScope::First } else { FormScope::All };
            let (page, reports) = commands::fill(&config, &page, method, &uri, scope).await?;
            for (index, report) in reports.iter().enumerate() {
                tracing::info!(form = index, bound = ?report.bound, skipped = ?report.skipped, "form populated");
            }
            write!(stdout, "{}", page.to_toml()?)?;
        }
        Command::Submit { page, form, uri } => {
            let submission = commands::submit(&config, &page, form, uri.as_deref()).await?;
            writeln!(stdout, "{}", submission.to_json())?;
        }
    }
    Ok(())
}
