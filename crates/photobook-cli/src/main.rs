use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use photobook_core::wizard::{SmartWizardOptions, ThemeMode, run_basic_wizard, run_smart_wizard};
use photobook_core::{
    ExportFormat, PageSize, PageSizePreset, PhotobookConfig, Project, RenderContext,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pbk", about = "Photo book composition CLI", version)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the wizards' random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project with one empty page
    New {
        /// Output project file
        #[arg(short, long)]
        output: PathBuf,

        /// Photo slots on the first page
        #[arg(long, default_value = "4")]
        slots: usize,

        /// Page size preset
        #[arg(long, value_enum)]
        page_size: Option<PageSizeArg>,

        /// Custom page width in pixels (with --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Custom page height in pixels (with --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },

    /// Lay out a folder of photos automatically
    Wizard {
        /// Folder with the photos
        #[arg(short, long)]
        input: PathBuf,

        /// Output project file
        #[arg(short, long)]
        output: PathBuf,

        /// Wizard to run
        #[arg(long, default_value = "smart", value_enum)]
        mode: WizardArg,

        /// Theme of the smart wizard
        #[arg(long, default_value = "color", value_enum)]
        theme: ThemeArg,

        /// Theme folders for the image theme (defaults to assets/themes)
        #[arg(long)]
        themes_dir: Option<PathBuf>,

        /// One group per subfolder, each with a title
        #[arg(long)]
        group: bool,

        /// Shuffle photos before matching layouts
        #[arg(long)]
        shuffle: bool,

        /// Page size preset
        #[arg(long, value_enum)]
        page_size: Option<PageSizeArg>,
    },

    /// Replace the layout of one page
    Relayout {
        /// Project file, rewritten in place
        project: PathBuf,

        /// Page number, starting at 1
        #[arg(long)]
        page: usize,

        /// Photo slots of the new layout
        #[arg(long)]
        slots: usize,

        /// Drop photos that do not fit the new layout
        #[arg(long)]
        force: bool,
    },

    /// Show project statistics
    Info {
        /// Project file
        project: PathBuf,
    },

    /// Render a small preview of one page
    Preview {
        /// Project file
        project: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Longer edge in pixels
        #[arg(long, default_value = "600")]
        max_side: u32,
    },

    /// Export pages to PDF or images
    Export {
        /// Project file
        project: PathBuf,

        /// Output file; image exports add _N per page
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// JPEG quality, 1-100
        #[arg(long)]
        quality: Option<u8>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A4,
    A4Landscape,
    A5,
    Letter,
    Square,
}

#[derive(Clone, Copy, ValueEnum)]
enum WizardArg {
    Basic,
    Smart,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Color,
    Image,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Png,
    Jpeg,
}

impl From<PageSizeArg> for PageSizePreset {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => Self::A4Portrait,
            PageSizeArg::A4Landscape => Self::A4Landscape,
            PageSizeArg::A5 => Self::A5Portrait,
            PageSizeArg::Letter => Self::LetterPortrait,
            PageSizeArg::Square => Self::Square20,
        }
    }
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Png => Self::Png,
            FormatArg::Jpeg => Self::Jpeg,
        }
    }
}

fn page_size(config: &PhotobookConfig, preset: Option<PageSizeArg>) -> PageSize {
    preset
        .map(|p| PageSizePreset::from(p).size())
        .unwrap_or(config.default_page_size)
}

fn print_statistics(project: &Project) -> Result<()> {
    let stats = photobook_core::calculate_statistics(project)?;
    println!("Project Statistics:");
    println!("  Pages: {}", stats.pages);
    println!("  Photo slots: {}", stats.slots);
    println!("  Filled: {}", stats.filled);
    println!("  Empty: {}", stats.empty);
    println!("  Customized photos: {}", stats.customized);
    println!("  Text boxes: {}", stats.texts);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PhotobookConfig::load(path).await?,
        None => PhotobookConfig::default(),
    };
    let ctx = RenderContext::from_config(&config);

    match cli.command {
        Commands::New {
            output,
            slots,
            page_size: preset,
            width,
            height,
        } => {
            let size = match (width, height) {
                (Some(w), Some(h)) => PageSize::custom(w, h)?,
                _ => page_size(&config, preset),
            };
            let project = Project::new(slots, size);
            photobook_core::save_project(&project, &output).await?;
            println!(
                "Created project with {} slot(s) on a {}x{} page → {}",
                slots,
                size.width,
                size.height,
                output.display()
            );
        }

        Commands::Wizard {
            input,
            output,
            mode,
            theme,
            themes_dir,
            group,
            shuffle,
            page_size: preset,
        } => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            log::info!("Wizard seed: {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let size = page_size(&config, preset);

            let (project, report) = match mode {
                WizardArg::Basic => run_basic_wizard(&input, size, &mut rng)?,
                WizardArg::Smart => {
                    let theme = match theme {
                        ThemeArg::Color => ThemeMode::Color,
                        ThemeArg::Image => ThemeMode::Image {
                            themes_dir: themes_dir.unwrap_or_else(|| config.themes_dir()),
                        },
                    };
                    let options = SmartWizardOptions {
                        theme,
                        group_by_folder: group,
                        shuffle,
                        page_size: size,
                    };
                    run_smart_wizard(&input, &options, &mut rng)?
                }
            };

            photobook_core::save_project(&project, &output).await?;
            println!("{} → {}", report.summary(), output.display());
            for path in &report.skipped {
                println!("  Skipped: {}", path.display());
            }
        }

        Commands::Relayout {
            project: path,
            page,
            slots,
            force,
        } => {
            if page == 0 {
                bail!("Page numbers start at 1");
            }
            let mut project = photobook_core::load_project(&path).await?;
            let applied = project.regenerate_layout(page - 1, slots, |lost| {
                if !force {
                    eprintln!(
                        "{} photo(s) would be removed from page {}; pass --force to continue",
                        lost, page
                    );
                }
                force
            })?;
            if !applied {
                bail!("Relayout cancelled");
            }
            photobook_core::save_project(&project, &path).await?;
            println!("Page {} now has {} slot(s) → {}", page, slots, path.display());
        }

        Commands::Info { project } => {
            let project = photobook_core::load_project(&project).await?;
            print_statistics(&project)?;
        }

        Commands::Preview {
            project,
            output,
            page,
            max_side,
        } => {
            if page == 0 {
                bail!("Page numbers start at 1");
            }
            let project = photobook_core::load_project(&project).await?;
            let image = photobook_core::generate_preview(&project, page - 1, max_side, &ctx)?;
            let bytes = photobook_core::export::encode_page(&image, ExportFormat::Png, 100)?;
            tokio::fs::write(&output, bytes).await?;
            println!("Preview of page {} → {}", page, output.display());
        }

        Commands::Export {
            project,
            output,
            format,
            quality,
        } => {
            let project = photobook_core::load_project(&project).await?;
            let format = format.map(ExportFormat::from).unwrap_or(config.export.format);
            let quality = quality.unwrap_or(config.export.jpeg_quality);

            match format {
                ExportFormat::Pdf => {
                    photobook_core::export_pdf(&project, &output, &ctx).await?;
                    println!(
                        "Exported {} page(s) → {}",
                        project.page_count(),
                        output.display()
                    );
                }
                ExportFormat::Png | ExportFormat::Jpeg => {
                    let written =
                        photobook_core::export_images(&project, &output, format, quality, &ctx)
                            .await?;
                    for path in &written {
                        println!("Exported → {}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}
