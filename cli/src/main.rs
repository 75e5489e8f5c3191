//! sectionize CLI - labeled section extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sectionize::render::{self, JsonFormat, JsonView, RenderOptions};
use sectionize::{
    detect_input_kind_from_path, load_outline, ExtractOptions, InputKind, LayoutDocument,
    Outline, SectionExtractor,
};

#[derive(Parser)]
#[command(name = "sectionize")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split laid-out documents into labeled sections", long_about = None)]
struct Cli {
    /// Input layout or outline JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the outline as JSON, Markdown and a tree
    Convert {
        /// Input layout or outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Extract sections to JSON
    Extract {
        /// Input layout or outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Which part of the outline to write
        #[arg(long, value_enum, default_value = "full")]
        view: View,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Render sections as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input layout or outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Leave section bodies out
        #[arg(long)]
        no_body: bool,

        /// Deepest level to render
        #[arg(long)]
        max_depth: Option<usize>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print the section hierarchy as an indented tree
    Tree {
        /// Input layout or outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show the style catalog of a layout document
    Styles {
        /// Input layout JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of styles to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Output the full catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input layout or outline JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum View {
    /// The whole outline (default)
    Full,
    /// Heading, breadcrumb, summary, classification and page per section
    Digest,
    /// Breadcrumb and classification per section
    Entries,
}

impl From<View> for JsonView {
    fn from(view: View) -> Self {
        match view {
            View::Full => JsonView::Full,
            View::Digest => JsonView::Digest,
            View::Entries => JsonView::Entries,
        }
    }
}

/// Extraction flags shared by every command that reads layout input.
#[derive(Args, Clone, Default)]
struct ExtractArgs {
    /// Breadcrumb separator
    #[arg(long, value_name = "SEP")]
    separator: Option<String>,

    /// Distinct pages a heading style must appear on
    #[arg(long, value_name = "N")]
    min_pages: Option<usize>,

    /// Occurrences a heading style must have
    #[arg(long, value_name = "N")]
    min_occurrences: Option<usize>,

    /// Extra exact title always accepted as a heading (repeatable)
    #[arg(long = "title", value_name = "TITLE")]
    titles: Vec<String>,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        let defaults = ExtractOptions::default();
        let mut options = defaults.clone().with_heading_repetition(
            self.min_pages.unwrap_or(defaults.min_heading_pages),
            self.min_occurrences.unwrap_or(defaults.min_heading_occurrences),
        );
        if let Some(ref separator) = self.separator {
            options = options.with_separator(separator.clone());
        }
        for title in &self.titles {
            options = options.with_override_title(title.clone());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            extract,
        }) => cmd_convert(&input, output.as_deref(), &extract),
        Some(Commands::Extract {
            input,
            output,
            compact,
            view,
            extract,
        }) => cmd_extract(&input, output.as_deref(), compact, view, &extract),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            no_body,
            max_depth,
            extract,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            no_body,
            max_depth,
            &extract,
        ),
        Some(Commands::Tree { input, extract }) => cmd_tree(&input, &extract),
        Some(Commands::Styles { input, limit, json }) => cmd_styles(&input, limit, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &ExtractArgs::default())
            } else {
                println!("{}", "Usage: sectionize <FILE> [OUTPUT]".yellow());
                println!("       sectionize --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_sections", stem))
    });

    fs::create_dir_all(&output_dir)?;
    log::debug!("writing outputs to {}", output_dir.display());

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Extracting sections...");
    let outline = load_outline(input, &extract.options())?;
    log::info!("{}: {} sections", input.display(), outline.len());
    pb.inc(1);

    pb.set_message("Writing JSON...");
    outline.save(output_dir.join("outline.json"))?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let options = RenderOptions::new().with_frontmatter(true);
    fs::write(output_dir.join("sections.md"), render::to_markdown(&outline, &options)?)?;
    pb.inc(1);

    pb.set_message("Generating tree...");
    fs::write(output_dir.join("tree.txt"), render::to_tree(&outline))?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{} ({} sections)", "Output files:".green().bold(), outline.len());
    println!("  {} outline.json", "├─".dimmed());
    println!("  {} sections.md", "├─".dimmed());
    println!("  {} tree.txt", "└─".dimmed());

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    view: View,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load_outline(input, &extract.options())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    log::debug!("rendering {:?} view of {} sections", view, outline.len());
    let json = render::to_json_view(&outline, view.into(), format)?;
    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    no_body: bool,
    max_depth: Option<usize>,
    extract: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load_outline(input, &extract.options())?;

    let mut options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_body(!no_body);
    if let Some(depth) = max_depth {
        options = options.with_max_depth(depth);
    }

    let markdown = render::to_markdown(&outline, &options)?;
    write_or_print(output, &markdown)
}

fn cmd_tree(input: &Path, extract: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load_outline(input, &extract.options())?;
    print!("{}", render::to_tree(&outline));
    Ok(())
}

fn cmd_styles(input: &Path, limit: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = LayoutDocument::open(input)?;
    let extractor = SectionExtractor::new(&doc, ExtractOptions::default());
    let catalog = extractor.catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    println!("{}", "Style Catalog".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());

    let margins = catalog.margins();
    println!(
        "{}: {:.1} .. {:.1}",
        "Margins".bold(),
        margins.left,
        margins.right
    );
    if let Some(size) = catalog.normal_size() {
        println!("{}: {}", "Body size".bold(), size);
    }
    println!();

    for (rank, entry) in catalog.entries().iter().take(limit).enumerate() {
        println!(
            "{:>3}. {}  {} x{} on {} pages",
            rank + 1,
            entry.style.to_string().bold(),
            "·".dimmed(),
            entry.stats.count,
            entry.page_count()
        );
        if let Some(sample) = entry.stats.samples.first() {
            println!("     {}", sample.as_str().dimmed());
        }
    }

    if catalog.len() > limit {
        println!("{}", format!("... {} more", catalog.len() - limit).as_str().dimmed());
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_input_kind_from_path(input)?;
    log::debug!("{} detected as {}", input.display(), kind);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), kind);

    let outline: Outline = match kind {
        InputKind::Layout => {
            let doc = LayoutDocument::open(input)?;
            println!("{}: {}", "Pages".bold(), doc.page_count());
            println!("{}: {}", "Spans".bold(), doc.spans().count());
            SectionExtractor::new(&doc, ExtractOptions::default()).extract()?
        }
        InputKind::Outline => load_outline(input, &ExtractOptions::default())?,
    };

    if let Some(ref title) = outline.title {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Section Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = outline
        .sections
        .iter()
        .map(|s| s.body.split_whitespace().count())
        .sum();
    let depth = outline.sections.iter().map(|s| s.depth()).max().unwrap_or(0);
    let enriched = outline.sections.iter().filter(|s| s.is_enriched()).count();

    println!("{}: {}", "Sections".bold(), outline.len());
    println!("{}: {}", "Top-level".bold(), outline.roots().count());
    println!("{}: {}", "Max depth".bold(), depth);
    println!("{}: {}", "Body words".bold(), words);
    println!("{}: {}", "Enriched".bold(), enriched);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "sectionize".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Labeled section extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/sectionize".dimmed());
    println!("License: MIT");
}
