//! Process command - normalize a single work-order file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use ets_core::models::config::EtsConfig;
use ets_core::{
    format_job_description, EntryChannel, JobMapper, JobRecord, PdfTextExtractor, WorkOrder,
    WorkOrderNormalizer,
};

use super::config::default_config_path;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Channel the document arrived through
    #[arg(long, value_enum, default_value = "upload")]
    channel: Channel,

    /// Skip geocoding of the site address
    #[arg(long)]
    no_geocode: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Work order and job record as JSON
    Json,
    /// Formatted job description
    Text,
    /// Job record only, as JSON
    Record,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Channel {
    /// Manual upload
    Upload,
    /// Mailbox ingestion
    Email,
}

impl From<Channel> for EntryChannel {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Upload => EntryChannel::Upload,
            Channel::Email => EntryChannel::Email,
        }
    }
}

/// Work order together with the job record built from it.
#[derive(Serialize)]
pub struct ProcessedOrder {
    pub work_order: WorkOrder,
    pub job_record: JobRecord,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_geocode {
        config.geocoder.enabled = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    let normalizer = WorkOrderNormalizer::from_config(&config);
    let mapper = JobMapper::new(config.job.clone()).with_channel(args.channel.into());

    pb.set_message("Reading document...");
    let text = read_document(&args.input)?;

    pb.set_message("Extracting work order...");
    let processed = process_text(&text, &normalizer, &mapper).await?;

    pb.finish_and_clear();

    let output = format_output(&processed, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the configuration from an explicit path or the default location.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EtsConfig> {
    if let Some(path) = config_path {
        return Ok(EtsConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(EtsConfig::from_file(&default_path)?)
    } else {
        Ok(EtsConfig::default())
    }
}

/// Text of a work-order file; PDFs go through text extraction.
pub fn read_document(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(PdfTextExtractor::text_from_bytes(&data)?)
        }
        "txt" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub async fn process_text(
    text: &str,
    normalizer: &WorkOrderNormalizer,
    mapper: &JobMapper,
) -> anyhow::Result<ProcessedOrder> {
    let work_order = normalizer.normalize(text).await?;
    let job_record = mapper.to_job_record(&work_order);
    Ok(ProcessedOrder {
        work_order,
        job_record,
    })
}

pub fn format_output(processed: &ProcessedOrder, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(processed)?),
        OutputFormat::Text => Ok(format_job_description(&processed.work_order)),
        OutputFormat::Record => Ok(serde_json::to_string_pretty(&processed.job_record)?),
    }
}
