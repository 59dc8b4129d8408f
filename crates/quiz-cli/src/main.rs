mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use logger::CliLogger;
use quiz_layout::constants::pt_to_mm;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qpdf", about = "Quiz sheet PDF builder", version)]
struct Cli {
    /// Show per-page planning decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the questions of a pool per topic and difficulty
    Scan {
        /// Pool folder laid out as <topic>/<difficulty>/<image>
        root: PathBuf,
    },

    /// Plan pages and print where every question goes
    Plan {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the page map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the quiz PDF
    Build {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Title printed on every page
        #[arg(long, default_value = "Quiz")]
        title: String,

        /// Append answer-key pages
        #[arg(long)]
        answer_key: bool,

        /// Also export the answer key as CSV
        #[arg(long)]
        answer_csv: Option<PathBuf>,

        /// Save the resolved options as JSON
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// Question images or pool folders
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Options file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet template
    #[arg(long, value_enum)]
    template: Option<TemplateArg>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page margin in mm (uniform on all sides)
    #[arg(long)]
    margin: Option<f32>,

    /// Weight units per page
    #[arg(long)]
    capacity: Option<f32>,

    /// Only questions from this topic folder
    #[arg(long)]
    topic: Option<String>,

    /// Only questions from this difficulty folder
    #[arg(long)]
    difficulty: Option<String>,

    /// Number of questions to draw
    #[arg(long)]
    count: Option<usize>,

    /// Seed for reproducible question draws
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateArg {
    Test,
    Yazili,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl From<TemplateArg> for quiz_layout::Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Test => Self::Test,
            TemplateArg::Yazili => Self::Yazili,
        }
    }
}

impl From<PaperArg> for quiz_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl SelectionArgs {
    /// Options from the config file (if any) with flags applied on top
    async fn options(&self) -> Result<quiz_layout::PlanOptions> {
        let mut options = match &self.config {
            Some(path) => quiz_layout::PlanOptions::load(path)
                .await
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => quiz_layout::PlanOptions::default(),
        };

        if let Some(template) = self.template {
            options.template = template.into();
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(margin) = self.margin {
            options.margins = quiz_layout::PageMargins::uniform(margin);
        }
        if self.capacity.is_some() {
            options.page_capacity = self.capacity;
        }
        if self.topic.is_some() {
            options.selection.topic = self.topic.clone();
        }
        if self.difficulty.is_some() {
            options.selection.difficulty = self.difficulty.clone();
        }
        if self.count.is_some() {
            options.selection.count = self.count;
        }

        options.validate()?;
        Ok(options)
    }

    /// Resolve inputs to the question images to plan, in planning order.
    ///
    /// Plain image files are used as given. Folders are scanned as pools
    /// and questions are drawn from them at random.
    async fn questions(&self, options: &quiz_layout::PlanOptions) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut scanned = false;

        for input in &self.inputs {
            if input.is_dir() {
                files.extend(quiz_layout::scan_pool(input).await?);
                scanned = true;
            } else {
                files.push(quiz_layout::QuestionFile {
                    path: input.clone(),
                    topic: None,
                    difficulty: None,
                });
            }
        }

        if !scanned && options.selection == quiz_layout::SelectionRequest::default() {
            return Ok(files.into_iter().map(|f| f.path).collect());
        }

        let used = quiz_layout::UsedPool::new();
        let picked = match self.seed {
            Some(seed) => quiz_layout::select_questions(
                &files,
                &options.selection,
                &used,
                &mut StdRng::seed_from_u64(seed),
            )?,
            None => {
                quiz_layout::select_questions(&files, &options.selection, &used, &mut rand::rng())?
            }
        };

        Ok(picked)
    }

    async fn plan(&self) -> Result<(quiz_layout::PlanOptions, quiz_layout::PageMap)> {
        let options = self.options().await?;
        let questions = self.questions(&options).await?;
        let records = quiz_layout::load_images(&questions).await?;

        let mut session = quiz_layout::PlanningSession::new(options.layout_config());
        let map = session.replan(&records).clone();

        Ok((options, map))
    }
}

fn print_statistics(map: &quiz_layout::PageMap) {
    let stats = quiz_layout::calculate_statistics(map);
    println!("Plan Statistics:");
    println!("  Questions: {}", stats.images);
    println!("  Pages: {}", stats.pages);
    println!(
        "  Layouts: {} grid, {} single column, {} hybrid",
        stats.grid_pages, stats.single_column_pages, stats.hybrid_pages
    );
    println!("  Total weight: {}", stats.total_weight);
    if stats.fallback_images > 0 {
        println!("  Unreadable images: {}", stats.fallback_images);
    }
    if stats.oversized_pages > 0 {
        println!("  Oversized pages: {}", stats.oversized_pages);
    }
}

fn print_plan(map: &quiz_layout::PageMap) {
    for page in &map.pages {
        println!(
            "Page {} ({}, weight {})",
            page.index + 1,
            page.layout_kind.name(),
            page.total_weight
        );
        for slot in page.slots() {
            let area = slot.placement;
            println!(
                "  {:>3}. {:<6} col {}  at ({:.1}, {:.1}) mm  {:.1}x{:.1} mm  {}{}",
                slot.number,
                slot.category.name(),
                slot.column,
                pt_to_mm(area.x),
                pt_to_mm(area.y),
                pt_to_mm(area.width),
                pt_to_mm(area.height),
                slot.path.display(),
                if slot.fallback { "  (unreadable)" } else { "" }
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = CliLogger::new(200, level);
    logger.init()?;

    match cli.command {
        Commands::Scan { root } => {
            let files = quiz_layout::scan_pool(&root).await?;
            let summary = quiz_layout::PoolSummary::from_files(&files);

            println!("Pool {}:", root.display());
            for ((topic, difficulty), count) in &summary.counts {
                println!("  {:<20} {:<12} {}", topic, difficulty, count);
            }
            println!("  Total: {}", summary.total());
        }

        Commands::Plan { selection, json } => {
            let (_, map) = selection.plan().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                print_plan(&map);
                print_statistics(&map);
            }
        }

        Commands::Build {
            selection,
            output,
            title,
            answer_key,
            answer_csv,
            save_config,
        } => {
            let (options, map) = selection.plan().await?;
            if map.is_empty() {
                anyhow::bail!("Nothing to render: no questions were selected");
            }

            let key = if answer_key || answer_csv.is_some() {
                let book = quiz_layout::AnswerBook::load_for(&map).await?;
                quiz_layout::answer_key(&map, &book)
            } else {
                Vec::new()
            };

            let render_options = quiz_render::RenderOptions {
                title,
                answer_key,
                ..Default::default()
            };
            quiz_render::generate_pdf(&map, &key, &render_options, &output).await?;
            print_statistics(&map);
            println!("Built {} questions → {}", map.slot_count(), output.display());

            if let Some(path) = answer_csv {
                quiz_render::write_answer_key_csv(&key, &path).await?;
                println!("Answer key → {}", path.display());
            }

            if let Some(path) = save_config {
                options.save(&path).await?;
                println!("Options → {}", path.display());
            }
        }
    }

    if logger.warning_count() > 0 {
        eprintln!(
            "Finished with {} warning(s); last: {}",
            logger.warning_count(),
            logger.latest_warning().unwrap_or_default()
        );
    }

    Ok(())
}
