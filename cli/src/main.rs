//! unscrap CLI - Scrapbox page conversion tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use unscrap::url::Url;
use unscrap::{JsonFormat, PageParser, ParseOptions, RenderOptions};

#[derive(Parser)]
#[command(name = "unscrap")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert captured Scrapbox pages to Markdown and JSON", long_about = None)]
struct Cli {
    /// Input HTML snapshot ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory for {title}.md
    #[arg(value_name = "DIR", default_value = "scrapbox_md")]
    output: PathBuf,

    /// Base URL for resolving relative links
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Fail on heading spans with a malformed level class
    #[arg(long)]
    strict_headings: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a snapshot to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input HTML snapshot ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base URL for resolving relative links
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Fail on heading spans with a malformed level class
        #[arg(long)]
        strict_headings: bool,

        /// Spaces per list nesting level
        #[arg(long, default_value = "4")]
        indent_width: usize,
    },

    /// Convert a snapshot to JSON
    Json {
        /// Input HTML snapshot ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page information
    Info {
        /// Input HTML snapshot ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            base_url,
            strict_headings,
            indent_width,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            base_url.as_deref(),
            strict_headings,
            indent_width,
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert and save if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    &cli.output,
                    cli.base_url.as_deref(),
                    cli.strict_headings,
                )
            } else {
                println!("{}", "Usage: unscrap <FILE> [DIR]".yellow());
                println!("       unscrap --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(
    base_url: Option<&str>,
    strict_headings: bool,
) -> Result<ParseOptions, Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new();
    if let Some(base) = base_url {
        let base = Url::parse(base).map_err(|e| format!("invalid base URL {base:?}: {e}"))?;
        options = options.with_base_url(base);
    }
    if strict_headings {
        options = options.strict_headings();
    }
    Ok(options)
}

fn read_snapshot(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if input == Path::new("-") {
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn cmd_convert(
    input: &Path,
    output_dir: &Path,
    base_url: Option<&str>,
    strict_headings: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(base_url, strict_headings)?;
    let html = read_snapshot(input)?;
    let page = PageParser::with_options(options).parse(&html)?;
    log::debug!("parsed {} body lines", page.line_count());

    let markdown = unscrap::render::to_markdown(&page, &RenderOptions::default());
    let path = unscrap::save_markdown(&markdown, output_dir)?;

    println!("{} {}", "Generated".green(), path.display());
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    base_url: Option<&str>,
    strict_headings: bool,
    indent_width: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(base_url, strict_headings)?;
    let html = read_snapshot(input)?;
    let page = PageParser::with_options(options).parse(&html)?;

    let render_options = RenderOptions::new().with_indent_width(indent_width);
    let markdown = unscrap::render::to_markdown(&page, &render_options);

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_snapshot(input)?;
    let page = PageParser::new().parse(&html)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = unscrap::render::to_json(&page, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_snapshot(input)?;
    let page = PageParser::new().parse(&html)?;

    println!("{}", "Page Information".green().bold());
    println!("  {} {}", "Title:".dimmed(), page.title);
    println!("  {} {}", "Lines:".dimmed(), page.line_count());
    println!("  {} {}", "List items:".dimmed(), page.list_item_count());
    println!("  {} {}", "Headings:".dimmed(), page.heading_count());
    println!("  {} {}", "Links:".dimmed(), page.link_count());

    Ok(())
}

fn cmd_version() {
    println!("unscrap {}", env!("CARGO_PKG_VERSION"));
}
