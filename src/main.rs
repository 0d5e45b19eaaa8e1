use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracemark::Config;
use tracemark::input::Tool;
use tracemark::overlay::Overlay;
use tracemark::script::Script;

#[derive(Parser, Debug)]
#[command(name = "tracemark")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TRACEMARK_GIT_HASH"), ")"),
    about = "Resolution-independent annotation surface with undo/redo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input script headlessly and save the surface as PNG
    Render {
        /// TOML script with a [page] table and [[events]] list
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Where to write the rendered PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,

        /// Config file to use instead of ~/.config/tracemark/config.toml
        #[arg(long, short = 'c', value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// List palette tools with their shortcuts and capabilities
    Tools {
        /// Config file to read brush settings from
        #[arg(long, short = 'c', value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            script,
            output,
            config,
        } => render(&script, &output, load_config(config.as_deref())?),
        Command::Tools { config } => {
            list_tools(&load_config(config.as_deref())?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn render(script_path: &Path, output: &Path, config: Config) -> Result<()> {
    let script = Script::load(script_path)?;

    let mut overlay = Overlay::new(config);
    overlay.mount(script.host())?;
    let summary = script.run(&mut overlay);

    let canvas = overlay
        .canvas()
        .context("Overlay lost its canvas while running the script")?;
    if !canvas.is_initialized() {
        anyhow::bail!(
            "Page {}x{} has no drawable area",
            script.page.width,
            script.page.height
        );
    }

    let (width, height) = canvas
        .surface()
        .backing_size()
        .context("Surface has no backing store")?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    canvas
        .surface()
        .write_png(&mut writer)
        .with_context(|| format!("Failed to write PNG to {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    println!(
        "rendered {}x{} px, {} strokes, undo={} redo={}",
        width,
        height,
        summary.strokes,
        canvas.history().undo_len(),
        canvas.history().redo_len()
    );
    Ok(())
}

fn list_tools(config: &Config) {
    let default_tool = config.default_tool();
    for tool in Tool::ALL {
        let caps = tool.capabilities(&config.brush);
        let brush = match caps.brush() {
            Some(brush) => format!("{:?} {:.0}px", brush.kind, brush.width),
            None => "none".to_string(),
        };
        let marker = if tool == default_tool { " (default)" } else { "" };
        println!(
            "{}  {:<7} drawing={:<5} selection={:<5} brush={}{}",
            tool.shortcut(),
            tool.name(),
            caps.drawing_mode_enabled,
            caps.selection_enabled,
            brush,
            marker
        );
    }
}
