use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use syllabus_core::config_file::{self, ConfigFile};
use syllabus_core::{load_document, save_document};
use syllabus_pdf_mupdf::MupdfBackend;
use syllabus_query::{Answer, GeminiGenerator, QueryContext, TextGenerator};

mod chat;
mod output;

use output::ColorMode;

/// College syllabus extractor and question-answering assistant
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a syllabus PDF into structured JSON
    Extract {
        /// Syllabus PDF (default: [data] pdf_path from config)
        pdf: Option<PathBuf>,

        /// Output JSON path (default: SYLLABUS_JSON, config, then syllabus_final_structure.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Answer one question from the extracted JSON, without the HTTP service
    Ask {
        /// The question to answer
        question: String,

        /// Extracted syllabus JSON
        #[arg(long)]
        data: Option<PathBuf>,

        /// Never call the model, even when an API key is configured
        #[arg(long)]
        offline: bool,
    },

    /// List semesters and their courses
    Show {
        /// Extracted syllabus JSON
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Interactive chat against a running syllabus-web service
    Chat {
        /// Service endpoint
        #[arg(long, default_value = chat::DEFAULT_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = ColorMode(!cli.no_color);
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config = config_file::load_config().with_env_overrides();

    match cli.command {
        Command::Extract { pdf, output } => extract(&config, pdf, output, color),
        Command::Ask {
            question,
            data,
            offline,
        } => ask(&config, &question, data, offline, color).await,
        Command::Show { data } => show(&config, data, color),
        Command::Chat { url } => chat::run(&url, color).await,
    }
}

fn extract(
    config: &ConfigFile,
    pdf: Option<PathBuf>,
    output: Option<PathBuf>,
    color: ColorMode,
) -> anyhow::Result<()> {
    let Some(pdf) = pdf.or_else(|| config.pdf_path()) else {
        anyhow::bail!("No PDF given. Pass a path or set [data] pdf_path in .syllabus.toml");
    };
    if !pdf.exists() {
        anyhow::bail!("File not found: {}", pdf.display());
    }
    let output = output.unwrap_or_else(|| config.json_path());

    let mut stdout = std::io::stdout();
    writeln!(stdout, "Extracting syllabus from {}...", pdf.display())?;

    let document = syllabus_parsing::extract_syllabus(&pdf, &MupdfBackend::new())
        .map_err(|e| anyhow::anyhow!("Extraction failed: {}", e))?;
    tracing::info!(
        semesters = document.semesters.len(),
        courses = document.courses().count(),
        "extraction finished"
    );
    save_document(&output, &document)?;

    output::print_summary(&mut stdout, &document, color)?;
    writeln!(stdout)?;
    output::print_saved(&mut stdout, &output, color)?;
    Ok(())
}

async fn ask(
    config: &ConfigFile,
    question: &str,
    data: Option<PathBuf>,
    offline: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let data = data.unwrap_or_else(|| config.json_path());
    let generator: Option<Arc<dyn TextGenerator>> = if offline {
        None
    } else {
        GeminiGenerator::from_config(&config.assistant())
            .map(|g| Arc::new(g) as Arc<dyn TextGenerator>)
    };

    let context = QueryContext::load(&data, generator);
    let answer = context.answer(question).await;

    let mut stdout = std::io::stdout();
    output::print_message(&mut stdout, "assistant", answer.text(), color)?;
    if answer == Answer::Unavailable {
        anyhow::bail!("Could not load syllabus data from {}", data.display());
    }
    Ok(())
}

fn show(config: &ConfigFile, data: Option<PathBuf>, color: ColorMode) -> anyhow::Result<()> {
    let data = data.unwrap_or_else(|| config.json_path());
    let document = load_document(&data)
        .map_err(|e| anyhow::anyhow!("Could not load {}: {}", data.display(), e))?;

    let mut stdout = std::io::stdout();
    output::print_courses(&mut stdout, &document, color)?;
    output::print_summary(&mut stdout, &document, color)?;
    Ok(())
}
