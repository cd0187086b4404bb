use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use outline::Extractor;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, clap::Args, Clone)]
pub struct BatchOptions {
    /// Directory holding span dumps (*.json)
    #[arg(short, long, env = "DOCOUTLINE_INPUT_DIR", default_value = "input")]
    pub input: PathBuf,

    /// Directory receiving one <name>.json result per input
    #[arg(short, long, env = "DOCOUTLINE_OUTPUT_DIR", default_value = "output")]
    pub output: PathBuf,

    /// Number of documents processed concurrently
    #[arg(short, long, env = "DOCOUTLINE_JOBS", default_value = "4")]
    pub jobs: usize,
}

/// Outcome of one document.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

pub async fn run(options: BatchOptions, global: crate::Global) -> Result<()> {
    let config = global.layout_config()?;
    let inputs = discover_inputs(&options.input)?;

    std::fs::create_dir_all(&options.output)
        .with_context(|| format!("Failed to create {}", options.output.display()))?;
    ensure_distinct_dirs(&options.input, &options.output)?;

    if inputs.is_empty() {
        eprintln!(
            "{} no span dumps in {}",
            "warning:".yellow().bold(),
            options.input.display()
        );
        return Ok(());
    }

    let extractor = Arc::new(Extractor::new(config));
    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| eyre!("Invalid progress template: {}", e))?,
    );

    let reports = process_all(extractor, inputs, &options.output, options.jobs, &progress).await;
    progress.finish_and_clear();

    let failed = print_reports(&reports);
    if failed > 0 {
        return Err(Error::BatchFailed {
            failed,
            total: reports.len(),
        }
        .into());
    }

    Ok(())
}

/// Refuse to write results into the directory holding the span dumps.
///
/// Both directories must exist.
pub fn ensure_distinct_dirs(input: &Path, output: &Path) -> Result<()> {
    let canonical_input = input
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", input.display()))?;
    let canonical_output = output
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", output.display()))?;

    if canonical_input == canonical_output {
        return Err(Error::OutputIsInput(output.display().to_string()).into());
    }
    Ok(())
}

/// Span dumps in `dir`, sorted by name.
///
/// Fails when two dumps share a stem (`a.json` and `a.JSON`), since both
/// results would land in the same `<stem>.json`.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.display().to_string()).into());
    }

    let mut inputs = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_span_dump(path))
        .collect::<Vec<_>>();
    inputs.sort();

    let mut stems: HashMap<OsString, &PathBuf> = HashMap::new();
    for input in &inputs {
        let Some(stem) = input.file_stem() else {
            continue;
        };
        if let Some(first) = stems.insert(stem.to_os_string(), input) {
            let mut output = PathBuf::from(stem);
            output.set_extension("json");
            return Err(Error::OutputCollision {
                first: first.display().to_string(),
                second: input.display().to_string(),
                output: output.display().to_string(),
            }
            .into());
        }
    }

    log::debug!("found {} span dumps in {}", inputs.len(), dir.display());
    Ok(inputs)
}

fn is_span_dump(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// `<out_dir>/<input stem>.json`
pub fn output_path(input: &Path, out_dir: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_eyre(format!("No file name in {}", input.display()))?;
    let mut path = out_dir.join(stem);
    path.set_extension("json");
    Ok(path)
}

/// Extract one document and write its result.
pub fn process_one(extractor: &Extractor, input: &Path, out_dir: &Path) -> Result<PathBuf> {
    let document = extractor
        .process_source(&outline::JsonSpanSource::new(input))
        .with_context(|| format!("Failed to extract outline from {}", input.display()))?;

    let target = output_path(input, out_dir)?;
    crate::extract::write_json(&document, &target)?;

    log::debug!(
        "{} -> {} ({} headings)",
        input.display(),
        target.display(),
        document.outline.len()
    );
    Ok(target)
}

/// Process every input with at most `jobs` documents in flight. A failing
/// document does not stop the others.
async fn process_all(
    extractor: Arc<Extractor>,
    inputs: Vec<PathBuf>,
    out_dir: &Path,
    jobs: usize,
    progress: &ProgressBar,
) -> Vec<FileReport> {
    let mut reports = futures::stream::iter(inputs)
        .map(|input| {
            let extractor = Arc::clone(&extractor);
            let out_dir = out_dir.to_path_buf();
            async move {
                let result = tokio::task::spawn_blocking({
                    let input = input.clone();
                    move || process_one(&extractor, &input, &out_dir)
                })
                .await
                .map_err(|e| eyre!("Worker failed: {}", e))
                .and_then(|r| r);
                FileReport { input, result }
            }
        })
        .buffer_unordered(jobs.max(1))
        .inspect(|report| {
            progress.inc(1);
            if let Some(name) = report.input.file_name() {
                progress.set_message(name.to_string_lossy().to_string());
            }
        })
        .collect::<Vec<_>>()
        .await;

    reports.sort_by(|a, b| a.input.cmp(&b.input));
    reports
}

/// Print one line per document; returns the number of failures.
fn print_reports(reports: &[FileReport]) -> usize {
    let mut failed = 0;

    for report in reports {
        match &report.result {
            Ok(target) => println!(
                "{} {} -> {}",
                "ok".green().bold(),
                report.input.display(),
                target.display()
            ),
            Err(e) => {
                failed += 1;
                eprintln!(
                    "{} {}: {:#}",
                    "failed".red().bold(),
                    report.input.display(),
                    e
                );
            }
        }
    }

    failed
}
