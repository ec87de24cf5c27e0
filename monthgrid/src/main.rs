use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use monthgrid_rs::error::ExportError;
use monthgrid_rs::export::{self, render_overview};
use monthgrid_rs::i18n::available_languages;
use monthgrid_rs::month_input::{format_month_input, parse_month_input};
use monthgrid_rs::settings;
use monthgrid_rs::{AppConfig, AppContext, RenderOutcome, StyleSettings};
use std::path::{Path, PathBuf};

/// monthgrid: Render customizable month calendars to PNG images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Path to a JSON config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the key-value store holding the saved language
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a single month to a PNG file
    Render {
        /// Month as YYYY-MM (digits only also work, e.g. 202409)
        #[arg(short, long)]
        month: String,

        /// Settings JSON file as produced by `settings defaults`
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Device pixel ratio (defaults to the configured value)
        #[arg(long)]
        scale: Option<f32>,

        /// Path to the PNG file to be created
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render all twelve months of a year into one ZIP archive
    Export {
        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Export width in pixels (defaults to the configured export width)
        #[arg(long)]
        width: Option<String>,

        /// Export height in pixels (defaults to the width at the settings' aspect ratio)
        #[arg(long)]
        height: Option<String>,

        /// Directory the archive is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Write year overview thumbnails (85% of the base size) as twelve PNG files
    Overview {
        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        settings: Option<PathBuf>,

        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Inspect settings files
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Show or change the interface language
    Language {
        #[command(subcommand)]
        command: LanguageCommand,
    },
    /// List selectable font families
    Fonts {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Print the default settings as JSON
    Defaults {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a settings file
    Check { file: PathBuf },
}

#[derive(Debug, Subcommand)]
enum LanguageCommand {
    /// Print the active language code
    Show,
    /// Persist a new language choice
    Set { code: String },
    /// List available languages
    List,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.init();
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&path)?;
    if let Some(store) = &args.store {
        config.store_path = Some(store.clone());
    }
    Ok(config)
}

fn load_settings(ctx: &AppContext, path: Option<&Path>) -> Result<StyleSettings> {
    let Some(path) = path else {
        return Ok(StyleSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    settings::deserialize(&text).map_err(|err| {
        anyhow!(
            "{} ({}: {})",
            ctx.language.translation().messages.invalid_settings,
            path.display(),
            err
        )
    })
}

fn parse_month(ctx: &AppContext, text: &str) -> Result<(i32, u32)> {
    parse_month_input(&format_month_input(text)).ok_or_else(|| {
        anyhow!(
            "Invalid month {:?}. {}",
            text,
            ctx.language.translation().month_input_helper
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let ctx = AppContext::new(config);
    let t = ctx.language.translation();

    match args.command {
        Command::Render {
            month,
            settings,
            scale,
            output,
        } => {
            let (year, month_index) = parse_month(&ctx, &month)?;
            let settings = load_settings(&ctx, settings.as_deref())?;

            let mut config = ctx.config.clone();
            if let Some(scale) = scale {
                config.device_pixel_ratio = scale;
            }
            let calendar = monthgrid_rs::CalendarCanvas::new(
                &ctx.fonts,
                config.font_timeout(),
                config.device_pixel_ratio(),
            )?;
            match calendar.render(year, month_index, settings, t).await? {
                RenderOutcome::Committed => {}
                RenderOutcome::Stale => bail!("Render request was superseded"),
            }
            let png = calendar.to_png()?;
            std::fs::write(&output, png)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("{}", output.display());
        }
        Command::Export {
            year,
            settings,
            width,
            height,
            output_dir,
        } => {
            let settings = load_settings(&ctx, settings.as_deref())?;
            let width = width.unwrap_or_else(|| ctx.config.default_export_width.to_string());
            let height = match height {
                Some(height) => height,
                None => match width.trim().parse::<u32>() {
                    Ok(w) => export::export_height_for_width(w, settings.width, settings.height)
                        .to_string(),
                    Err(_) => String::new(),
                },
            };

            let exporter = ctx.exporter();
            eprintln!("{}", t.messages.generating_images);
            let result = exporter
                .export_year(
                    year,
                    &width,
                    &height,
                    &settings,
                    t,
                    &output_dir,
                    |done, total| eprintln!("{}", t.progress(done, total)),
                )
                .await;
            match result {
                Ok(path) => {
                    eprintln!("{}", t.messages.export_complete);
                    println!("{}", path.display());
                }
                Err(err @ ExportError::InvalidDimensions { .. }) => {
                    bail!("{} ({})", t.messages.valid_dimensions, err)
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Overview {
            year,
            settings,
            output_dir,
        } => {
            let settings = load_settings(&ctx, settings.as_deref())?;
            let pages =
                render_overview(&ctx.fonts, &settings, t, year, ctx.config.font_timeout()).await?;
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            eprintln!("{} {}", year, t.year_overview);
            for (name, png) in pages {
                let path = output_dir.join(name);
                std::fs::write(&path, png)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", path.display());
            }
        }
        Command::Settings { command } => match command {
            SettingsCommand::Defaults { output } => {
                let text = settings::serialize(&StyleSettings::default())
                    .context("Failed to serialize default settings")?;
                match output {
                    Some(path) => std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?,
                    None => println!("{text}"),
                }
            }
            SettingsCommand::Check { file } => {
                load_settings(&ctx, Some(file.as_path()))?;
                println!("{}", t.messages.settings_imported);
            }
        },
        Command::Language { command } => match command {
            LanguageCommand::Show => println!("{}", ctx.language.language()),
            LanguageCommand::Set { code } => {
                if !ctx.language.set_language(&code)? {
                    let codes: Vec<&str> = available_languages().iter().map(|l| l.code).collect();
                    bail!(
                        "Unknown language {:?}. Available: {}",
                        code,
                        codes.join(", ")
                    );
                }
                println!("{}", ctx.language.translation().controls.language);
            }
            LanguageCommand::List => {
                for language in available_languages() {
                    let marker = if language.code == ctx.language.language() {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{} {}  {} ({})",
                        marker, language.code, language.native_name, language.name
                    );
                }
            }
        },
        Command::Fonts { json } => {
            let catalogue = ctx.fonts.catalogue();
            if json {
                let entries: Vec<serde_json::Value> = catalogue
                    .iter()
                    .map(|font| {
                        serde_json::json!({
                            "name": font.name,
                            "family": font.family,
                            "source": font.source.as_str(),
                            "loaded": ctx.fonts.is_loaded(&font.family),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for font in &catalogue {
                    println!("{:<20} {}", font.name, font.source.as_str());
                }
            }
        }
    }
    Ok(())
}
