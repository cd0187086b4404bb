use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use outline::render::markdown;
use outline::{DocumentOutline, LayoutConfig};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args, Clone)]
pub struct ExtractOptions {
    /// Span dump to read (JSON array of spans or {"spans": [...]})
    #[clap(env = "DOCOUTLINE_INPUT")]
    pub path: PathBuf,

    /// Output format: indented, markdown, or json (default: indented)
    #[arg(long, env = "DOCOUTLINE_OUTPUT", default_value = "indented")]
    pub output: OutputFormat,

    /// Output as JSON (alias for --output json)
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON result to this file
    #[arg(short, long)]
    pub write: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented text format (2 spaces per level)
    Indented,
    /// Markdown document with the title as heading
    Markdown,
    /// JSON format with structured data
    Json,
}

pub async fn run(options: ExtractOptions, global: crate::Global) -> Result<()> {
    let config = global.layout_config()?;

    let document = tokio::task::spawn_blocking({
        let path = options.path.clone();
        move || extract_outline(&path, config)
    })
    .await??;

    if let Some(target) = &options.write {
        write_json(&document, target)?;
        log::info!("wrote {}", target.display());
    }

    // --json takes precedence over --output
    let format = if options.json {
        OutputFormat::Json
    } else {
        options.output.clone()
    };

    match format {
        OutputFormat::Json => println!("{}", format_output_json(&document)?),
        _ => output_formatted(&document, &format, &options.path),
    }

    Ok(())
}

/// Run the pipeline on one span dump.
pub fn extract_outline(path: &Path, config: LayoutConfig) -> Result<DocumentOutline> {
    outline::process_file(path, config)
        .with_context(|| format!("Failed to extract outline from {}", path.display()))
}

pub fn format_output_json(document: &DocumentOutline) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

pub fn write_json(document: &DocumentOutline, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(target, format_output_json(document)?)
        .with_context(|| format!("Failed to write {}", target.display()))
}

/// Plain rendering of the document in the chosen format.
fn format_content(document: &DocumentOutline, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Indented => {
            let outline = markdown::render_indented(&document.outline);
            if document.title.is_empty() {
                outline
            } else if outline.is_empty() {
                document.title.clone()
            } else {
                format!("{}\n\n{}", document.title, outline)
            }
        }
        OutputFormat::Markdown => markdown::render_document(document),
        OutputFormat::Json => unreachable!("JSON format handled separately"),
    }
}

/// Decorated header printed to stderr on a terminal.
fn format_metadata(document: &DocumentOutline, source: &Path) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", "DOCUMENT OUTLINE".bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "\n{}: {}\n",
        "Source".green(),
        source.display().to_string().cyan().underline()
    ));

    let title = if document.title.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        document.title.bright_white().bold().to_string()
    };
    result.push_str(&format!("{}: {}\n", "Title".green(), title));
    result.push_str(&format!(
        "{}: {}\n\n",
        "Headings".green(),
        document.outline.len().to_string().bright_yellow().bold()
    ));

    result
}

fn output_formatted(document: &DocumentOutline, format: &OutputFormat, source: &Path) {
    let content = format_content(document, format);

    if std::io::stdout().is_terminal() {
        // Terminal output: metadata to stderr, content to stdout
        eprintln!("{}", format_metadata(document, source));
        for line in content.lines() {
            println!("{}", line.white());
        }
    } else {
        println!("{}", content);
    }
}
