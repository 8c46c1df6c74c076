//! # Boxmark CLI
//!
//! Command-line interface for carton artwork generation.
//!
//! ## Usage
//!
//! ```bash
//! # List available styles
//! boxmark styles
//!
//! # Render a job to PDF using real artwork
//! boxmark render job.json --assets ./assets --out carton.pdf
//!
//! # Proof the layout with placeholder artwork and region outlines
//! boxmark render job.json --draft --debug-borders --preview proof.png
//!
//! # Print the region map of a job as JSON
//! boxmark layout job.json --style simple
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use boxmark::{
    BoxConfig, BoxmarkError, Job, RenderOptions,
    assets::{AssetSource, DirSource, DraftSource},
    config::ColorMode,
    export, registry, render,
};

/// Boxmark - Carton box-mark artwork generator
#[derive(Parser, Debug)]
#[command(name = "boxmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered styles
    Styles {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a job file to a print-ready PDF
    Render {
        /// Job JSON file
        job: PathBuf,

        /// Style name (overrides the job's `style`)
        #[arg(long)]
        style: Option<String>,

        /// Resolution in pixels per inch (overrides the job's `ppi`)
        #[arg(long)]
        ppi: Option<u32>,

        /// Asset directory, one subdirectory per style
        #[arg(long, value_name = "DIR", default_value = "assets", conflicts_with = "draft")]
        assets: PathBuf,

        /// Use placeholder artwork and the built-in font
        #[arg(long)]
        draft: bool,

        /// Output PDF (defaults to `<sku_name>.pdf`)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write a downscaled PNG preview
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        /// Preview width cap in pixels
        #[arg(long, default_value_t = export::PREVIEW_MAX_WIDTH)]
        preview_width: u32,

        /// Outline every die-line region
        #[arg(long)]
        debug_borders: bool,
    },

    /// Print a job's die-line regions as JSON
    Layout {
        /// Job JSON file
        job: PathBuf,

        /// Style name (overrides the job's `style`)
        #[arg(long)]
        style: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BoxmarkError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Styles { json } => {
            let styles = registry().list();
            if json {
                println!("{}", serde_json::to_string_pretty(&styles)?);
                return Ok(());
            }
            println!("Available styles:");
            for info in styles {
                println!("  {:<26} {}", info.name, info.description);
                println!("  {:<26} requires: {}", "", info.required_params.join(", "));
            }
            Ok(())
        }

        Commands::Render {
            job,
            style,
            ppi,
            assets,
            draft,
            out,
            preview,
            preview_width,
            debug_borders,
        } => {
            let mut job = Job::load(&job)?;
            if let Some(ppi) = ppi {
                job.spec.ppi = ppi;
            }
            let style_name = resolve_style(style, &job)?;
            let cfg = BoxConfig::from_spec(job.spec)?;

            let source: Box<dyn AssetSource> = if draft {
                Box::new(DraftSource)
            } else {
                Box::new(DirSource::new(assets))
            };
            log::info!("loading '{}' from {}", style_name, source.describe());
            let style = registry().get(&style_name, source.as_ref())?;

            let options = RenderOptions { debug_borders };
            let composition = render(style.as_ref(), &cfg, &options)?;
            for warning in &composition.warnings {
                println!("warning: {}", warning);
            }

            let (w_cm, h_cm) = composition.size_cm(cfg.dpi());
            let canvas = match cfg.color_mode() {
                ColorMode::Cmyk => export::print_round_trip(&composition.canvas),
                ColorMode::Rgb => composition.canvas,
            };

            let out = out.unwrap_or_else(|| default_output(cfg.sku_name()));
            let pdf = export::write_pdf(&canvas, cfg.ppi(), cfg.color_mode())?;
            std::fs::write(&out, &pdf)?;

            println!(
                "{}: {}x{}px ({:.1}x{:.1}cm at {}ppi) -> {}",
                style_name,
                canvas.width(),
                canvas.height(),
                w_cm,
                h_cm,
                cfg.ppi(),
                out.display()
            );

            if let Some(path) = preview {
                let small = export::preview(&canvas, preview_width);
                std::fs::write(&path, export::encode_png(&small)?)?;
                println!("preview {}x{}px -> {}", small.width(), small.height(), path.display());
            }
            Ok(())
        }

        Commands::Layout { job, style } => {
            let job = Job::load(&job)?;
            let style_name = resolve_style(style, &job)?;
            let cfg = BoxConfig::from_spec(job.spec)?;
            let style = registry().get(&style_name, &DraftSource)?;
            let layout = style.layout(&cfg);
            println!("{}", serde_json::to_string_pretty(&layout)?);
            Ok(())
        }
    }
}

/// CLI flag first, then the job's own `style` field.
fn resolve_style(flag: Option<String>, job: &Job) -> Result<String, BoxmarkError> {
    flag.or_else(|| job.style.clone()).ok_or_else(|| {
        BoxmarkError::InvalidConfig(format!(
            "no style given; pass --style or set \"style\" in the job (available: {})",
            registry().names().join(", ")
        ))
    })
}

/// `<sku>.pdf` with path separators replaced.
fn default_output(sku: &str) -> PathBuf {
    let name: String = sku
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    PathBuf::from(format!("{}.pdf", name))
}
