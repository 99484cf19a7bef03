use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use taskboard_docs::{generate, DocumentKind, GenerateOptions};

/// Renders the TaskBoard documentation PDFs.
///
/// Fonts are looked up in `--fonts-dir`, then `TASKBOARD_DOCS_FONTS_DIR`, then `assets/fonts`
/// next to the binary or the library crate.
#[derive(Parser)]
#[command(author, version, about = "Generate the TaskBoard documentation PDFs")]
struct Cli {
    /// Document to render.
    #[arg(long, short, value_enum, default_value_t = Selection::Whitepaper)]
    document: Selection,

    /// Output path; only valid when rendering a single document.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Directory holding the Roboto and RobotoMono font files.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Embed section bookmarks into the generated PDF.
    #[cfg(feature = "bookmarks")]
    #[arg(long)]
    bookmarks: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Selection {
    Whitepaper,
    Guide,
    All,
}

impl Selection {
    fn kinds(self) -> Vec<DocumentKind> {
        match self {
            Selection::Whitepaper => vec![DocumentKind::Whitepaper],
            Selection::Guide => vec![DocumentKind::Guide],
            Selection::All => DocumentKind::ALL.to_vec(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.output.is_some() && cli.document == Selection::All {
        return Err("--output cannot be combined with --document all".into());
    }

    let options = GenerateOptions {
        font_dir: cli.fonts_dir.clone(),
        #[cfg(feature = "bookmarks")]
        bookmarks: cli.bookmarks,
    };

    for kind in cli.document.kinds() {
        let (path, report) = generate(kind, cli.output.as_deref(), &options)?;
        println!(
            "PDF generated: {} ({} pages)",
            path.display(),
            report.page_count
        );
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
