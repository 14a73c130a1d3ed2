//! groffdown - Markdown to man page converter

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use groffdown::{ManOptions, ManService, Result};

#[derive(Parser)]
#[command(name = "groffdown")]
#[command(version, about = "Convert Markdown to groff man pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    groffdown ls.md -o ls.1          Convert a file
    cat ls.md | groffdown --title    Read stdin, use `# ls(1) -- ...` as the page title
    groffdown -w 72 README.md        Wrap long lines at 72 columns")]
struct Cli {
    /// Markdown input file; stdin when absent or `-`
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file; stdout when absent
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Wrap lines at this column (0 keeps source line breaks)
    #[arg(short, long, default_value_t = 0)]
    width: usize,

    /// Render soft line breaks as hard line breaks
    #[arg(long, conflicts_with = "nobreaks")]
    hardbreaks: bool,

    /// Join soft line breaks with spaces and never wrap
    #[arg(long)]
    nobreaks: bool,

    /// Convert straight quotes and dashes to typographic ones
    #[arg(long)]
    smart: bool,

    /// Turn a leading `# name(section) -- description` heading into a .TH header
    #[arg(long)]
    title: bool,

    /// Date field of the .TH header
    #[arg(long, requires = "title")]
    date: Option<String>,

    /// Source field of the .TH header
    #[arg(long, requires = "title")]
    source: Option<String>,

    /// Manual field of the .TH header
    #[arg(long, requires = "title")]
    manual: Option<String>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let markdown = read_input(cli.input.as_deref())?;
    debug!(bytes = markdown.len(), "read input");

    let service = ManService::with_options(ManOptions {
        width: cli.width,
        hardbreaks: cli.hardbreaks,
        nobreaks: cli.nobreaks,
        smart_punctuation: cli.smart,
        detect_title: cli.title,
        date: cli.date.clone(),
        source: cli.source.clone(),
        manual: cli.manual.clone(),
    });
    let man = service.render(&markdown)?;

    match cli.output.as_deref() {
        Some(path) => {
            fs::write(path, &man)?;
            debug!(path, "wrote man page");
        }
        None => io::stdout().lock().write_all(man.as_bytes())?,
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut markdown = String::new();
            io::stdin().lock().read_to_string(&mut markdown)?;
            Ok(markdown)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}
