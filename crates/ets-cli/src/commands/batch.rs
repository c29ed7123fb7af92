//! Batch processing command for multiple work-order files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ets_core::{JobMapper, WorkOrderNormalizer};

use super::process::{load_config, process_text, read_document, Channel, ProcessedOrder};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Directory for per-file JSON output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Move successfully processed files here
    #[arg(long)]
    processed_dir: Option<PathBuf>,

    /// Move files that failed to process here
    #[arg(long)]
    failed_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Channel the documents arrived through
    #[arg(long, value_enum, default_value = "upload")]
    channel: Channel,

    /// Skip geocoding of site addresses
    #[arg(long)]
    no_geocode: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    processed: Option<ProcessedOrder>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_geocode {
        config.geocoder.enabled = false;
    }

    let files = collect_files(&args.input)?;

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    for dir in [&args.output_dir, &args.processed_dir, &args.failed_dir]
        .into_iter()
        .flatten()
    {
        fs::create_dir_all(dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let normalizer = WorkOrderNormalizer::from_config(&config);
    let mapper = JobMapper::new(config.job.clone()).with_channel(args.channel.into());

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_file(&path, &normalizer, &mapper).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(processed) => {
                if let Some(output_dir) = &args.output_dir {
                    let output_name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("work-order");
                    let output_path = unique_path(output_dir, &format!("{}.json", output_name));
                    fs::write(&output_path, serde_json::to_string_pretty(&processed)?)?;
                    debug!("Wrote output to {}", output_path.display());
                }

                if let Some(processed_dir) = &args.processed_dir {
                    move_into(&path, processed_dir)?;
                }

                results.push(ProcessResult {
                    path,
                    processed: Some(processed),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();

                if let Some(failed_dir) = &args.failed_dir {
                    move_into(&path, failed_dir)?;
                }

                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        processed: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.processed.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Work-order files matching the pattern, each listed once.
fn collect_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in glob(pattern)?.filter_map(|r| r.ok()) {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !matches!(ext.to_lowercase().as_str(), "pdf" | "txt") {
            continue;
        }

        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            files.push(path);
        } else {
            debug!("Skipping already queued file {}", path.display());
        }
    }

    Ok(files)
}

async fn process_file(
    path: &Path,
    normalizer: &WorkOrderNormalizer,
    mapper: &JobMapper,
) -> anyhow::Result<ProcessedOrder> {
    let text = read_document(path)?;
    process_text(&text, normalizer, mapper).await
}

/// Move a file into `dir`, keeping its name unless that name is taken.
fn move_into(path: &Path, dir: &Path) -> anyhow::Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;
    let target = unique_path(dir, file_name);

    if fs::rename(path, &target).is_err() {
        // Different filesystem
        fs::copy(path, &target)?;
        fs::remove_file(path)?;
    }

    debug!("Moved {} to {}", path.display(), target.display());
    Ok(target)
}

/// `dir/file_name`, or `dir/<stem>-N.<ext>` with the first free N.
fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{}-{}.{}", stem, n, ext)),
            None => dir.join(format!("{}-{}", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "order_number",
        "date",
        "site_address",
        "geocoded",
        "category",
        "priority",
        "estimated_value",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(processed) = &result.processed {
            let order = &processed.work_order;
            let record = &processed.job_record;
            wtr.write_record([
                filename,
                "success",
                &order.order_number,
                &order.date,
                &order.site_address,
                &record.geocoded.to_string(),
                &record.category_name,
                &record.job_priority,
                &order.estimated_value.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unique_path_keeps_free_name() {
        let dir = TempDir::new().unwrap();
        assert_eq!(unique_path(dir.path(), "order.txt"), dir.path().join("order.txt"));
    }

    #[test]
    fn test_unique_path_numbers_taken_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("order.txt"), "a").unwrap();
        fs::write(dir.path().join("order-1.txt"), "b").unwrap();

        assert_eq!(unique_path(dir.path(), "order.txt"), dir.path().join("order-2.txt"));
    }

    #[test]
    fn test_move_into_does_not_overwrite() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("order.txt"), "first").unwrap();
        let path = src.path().join("order.txt");
        fs::write(&path, "second").unwrap();

        let target = move_into(&path, dest.path()).unwrap();

        assert_eq!(target, dest.path().join("order-1.txt"));
        assert_eq!(fs::read_to_string(dest.path().join("order.txt")).unwrap(), "first");
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert!(!path.exists());
    }
}
