use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grcdoc::config::load_theme_or_default;
use grcdoc::reports::{BusinessContinuityPlan, RiskReport};
use grcdoc::{package, DocumentBuilder, DocumentOptions, DocumentService, LabelPolicy};

#[derive(Parser)]
#[command(name = "grcdoc")]
#[command(about = "Turn markdown-ish text and GRC records into Word documents")]
struct Cli {
    /// TOML theme file (colors, fonts, sizes)
    #[arg(long, global = true)]
    theme: Option<PathBuf>,

    /// Keep colon-terminated bullets as bullets
    #[arg(long, global = true)]
    no_labels: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markdown-ish text file to .docx
    Render {
        input: PathBuf,

        /// Output file (defaults to input name with .docx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title (defaults to the input file stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Generate a business-continuity plan from its JSON export
    Bcp {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a risk assessment report from its JSON export
    Risk {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed nodes of a text file as JSON
    Nodes {
        input: PathBuf,

        /// Skip label promotion
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let theme = load_theme_or_default(cli.theme.as_deref())
        .with_context(|| format!("failed to load theme {:?}", cli.theme))?;
    let mut options = DocumentOptions {
        theme,
        ..Default::default()
    };
    if cli.no_labels {
        options.label_policy = LabelPolicy::disabled();
    }
    let service = DocumentService::with_options(options);

    match cli.command {
        Command::Render {
            input,
            output,
            title,
        } => {
            let text = read_input(&input)?;
            let title = title.unwrap_or_else(|| file_stem(&input));
            let document = DocumentBuilder::new(&service, title)
                .text(Some(&text))
                .build();
            let bytes = package::to_docx(&document, service.theme())?;
            write_output(&input, output, &bytes)?;
        }
        Command::Bcp { input, output } => {
            let plan = BusinessContinuityPlan::from_json(&read_input(&input)?)
                .with_context(|| format!("invalid plan in {}", input.display()))?;
            write_output(&input, output, &plan.to_docx(&service)?)?;
        }
        Command::Risk { input, output } => {
            let report = RiskReport::from_json(&read_input(&input)?)
                .with_context(|| format!("invalid risk report in {}", input.display()))?;
            write_output(&input, output, &report.to_docx(&service)?)?;
        }
        Command::Nodes { input, raw } => {
            let text = read_input(&input)?;
            let nodes = if raw {
                service.classify(text.as_str())
            } else {
                service.parse(text.as_str())
            };
            println!("{}", serde_json::to_string_pretty(&nodes)?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string())
}

fn write_output(input: &Path, output: Option<PathBuf>, bytes: &[u8]) -> Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension("docx"));
    fs::write(&output, bytes).with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote {} bytes to {}", bytes.len(), output.display());
    println!("Created {}", output.display());
    Ok(())
}
