use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use markstudio::{
    Config,
    batch::ImageBatch,
    editor::Editor,
    export::save_png,
    layout::Layout,
    loader::collect_inputs,
    startup_checks,
    watermark::{FontBook, RenderJob, Renderer, ScaleLevel},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Overrides `app.log_level` from the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watermark every input image and export them as PNG
    Apply {
        /// Layout file describing the watermarks
        #[arg(short, long)]
        layout: PathBuf,

        /// Folder that receives the PyMark output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Overrides the scale from the layout
        #[arg(short, long, value_enum)]
        scale: Option<ScaleLevel>,

        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Render a single preview image
    Preview {
        #[arg(short, long)]
        layout: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum)]
        scale: Option<ScaleLevel>,
    },

    /// Save the composed edit canvas
    Canvas {
        #[arg(short, long)]
        layout: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run the startup checks and exit
    Check {
        /// Export folder to check as well
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    // Set up logging before any real work
    let log_level = cli.log_level.as_deref().unwrap_or(&config.app.log_level);
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting {}", config.app.name);
    info!("Configuration loaded from: {:?}", cli.config);

    match cli.command {
        Commands::Apply {
            layout,
            output,
            scale,
            inputs,
        } => run_apply(&config, &layout, &output, scale, &inputs),
        Commands::Preview {
            layout,
            input,
            output,
            scale,
        } => run_preview(&config, &layout, &input, &output, scale),
        Commands::Canvas { layout, output } => run_canvas(&config, &layout, &output),
        Commands::Check { output } => run_checks(&config, output.as_deref()),
    }
}

fn run_checks(config: &Config, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match startup_checks::perform_startup_checks(config, output) {
        Ok(()) => Ok(()),
        Err(errors) => {
            for error in &errors {
                tracing::error!("Startup check failed: {}", error);
            }

            if errors.iter().any(|e| e.is_critical()) {
                tracing::error!("Critical startup check failed, exiting");
                Err("Critical startup check failed".into())
            } else {
                warn!("Non-critical startup checks failed, continuing");
                Ok(())
            }
        }
    }
}

/// Loads the fonts and replays `layout_path` into a fresh editor
fn prepare(
    config: &Config,
    layout_path: &Path,
) -> Result<(Editor, Layout, FontBook), Box<dyn std::error::Error>> {
    let fonts = FontBook::load_dir(&config.fonts.directory)?;
    if fonts.is_empty() {
        warn!(
            "No fonts loaded from {:?}, text watermarks will be skipped",
            config.fonts.directory
        );
    }

    let layout = Layout::load(layout_path)?;
    let base_dir = layout_path.parent().unwrap_or_else(|| Path::new("."));
    let mut editor = Editor::new(&config.canvas, &config.render, &config.fonts.default);
    layout.apply(&mut editor, base_dir, &config.fonts.default)?;
    info!(
        "Layout {:?} placed {} watermarks",
        layout_path,
        editor.objects().len()
    );

    Ok((editor, layout, fonts))
}

fn run_apply(
    config: &Config,
    layout_path: &Path,
    output: &Path,
    scale: Option<ScaleLevel>,
    inputs: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    run_checks(config, Some(output))?;
    let (editor, layout, fonts) = prepare(config, layout_path)?;

    let mut batch = ImageBatch::new();
    let failures = batch.load_paths(&collect_inputs(inputs));
    for (path, error) in &failures {
        warn!("Could not load {:?}: {}", path, error);
    }

    let renderer = Renderer::new(config.render.clone());
    let job = RenderJob {
        objects: editor.objects(),
        edit_canvas: editor.canvas_size(),
        scale: scale.or(layout.scale).unwrap_or_default(),
        fonts: &fonts,
    };

    let report = batch.export(output, &config.export, &renderer, &job)?;
    println!(
        "Saved {} images to {}",
        report.files.len(),
        report.dir.display()
    );
    Ok(())
}

fn run_preview(
    config: &Config,
    layout_path: &Path,
    input: &Path,
    output: &Path,
    scale: Option<ScaleLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, layout, fonts) = prepare(config, layout_path)?;

    let mut batch = ImageBatch::new();
    if let Some((path, error)) = batch.load_paths(&[input.to_path_buf()]).into_iter().next() {
        return Err(format!("Failed to load {}: {}", path.display(), error).into());
    }

    let renderer = Renderer::new(config.render.clone());
    let job = RenderJob {
        objects: editor.objects(),
        edit_canvas: editor.canvas_size(),
        scale: scale.or(layout.scale).unwrap_or_default(),
        fonts: &fonts,
    };

    let preview = batch.preview(0, config.canvas.preview.size(), &renderer, &job);
    save_png(&preview, output)?;
    println!("Saved preview to {}", output.display());
    Ok(())
}

fn run_canvas(
    config: &Config,
    layout_path: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, _, fonts) = prepare(config, layout_path)?;
    let frame = editor.frame(&fonts);
    save_png(&frame, output)?;
    println!("Saved edit canvas to {}", output.display());
    Ok(())
}
