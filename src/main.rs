use clap::Parser;
use quittance::{
    AssetSource, ConfigError, FilesystemAssetSource, InMemoryAssetSource, LogoResolver, LogoStatus, ReceiptAssembler,
    ReceiptConfig, ReceiptError, ReceiptRecord,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record is not valid JSON: {0}")]
    Record(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

#[derive(Parser, Debug)]
#[command(version, about = "Build one receipt PDF from a JSON record")]
struct Args {
    /// Receipt record as JSON
    record: PathBuf,

    /// Where to write the PDF
    output: PathBuf,

    /// Logo image file; overrides the asset named in the config
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Receipt configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Picks the asset source for the logo: `--logo` wins over the config's asset,
/// which is looked up next to the config file.
fn logo_source(args: &Args, config: &mut ReceiptConfig) -> Arc<dyn AssetSource> {
    if let Some(logo) = &args.logo {
        let (source, name) = FilesystemAssetSource::for_file(logo);
        config.logo.asset = Some(name);
        return Arc::new(source);
    }
    match (&config.logo.asset, &args.config) {
        (Some(_), Some(config_path)) => {
            let dir = config_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            Arc::new(FilesystemAssetSource::new(dir))
        }
        (Some(_), None) => Arc::new(FilesystemAssetSource::new(".")),
        (None, _) => Arc::new(InMemoryAssetSource::new()),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => ReceiptConfig::from_file(path)?,
        None => ReceiptConfig::default(),
    };
    let source = logo_source(&args, &mut config);

    // Preparation may wait on the disk; it finishes before any build starts.
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let logo = runtime.block_on(LogoResolver::prepare_async(source, config.logo.clone()));
    drop(runtime);
    if let LogoStatus::Placeholder { reason: Some(reason) } = logo.status() {
        eprintln!("Using placeholder logo: {}", reason);
    }

    let record: ReceiptRecord = serde_json::from_str(&fs::read_to_string(&args.record)?)?;
    let assembler = ReceiptAssembler::new(config, Arc::new(logo));
    let artifact = assembler.build(&record)?;
    artifact.save(&args.output)?;

    println!(
        "Wrote receipt {} to {} ({} bytes)",
        artifact.receipt_id(),
        args.output.display(),
        artifact.len()
    );
    if let Some(truncation) = artifact.truncation() {
        println!(
            "Note: {} line item(s) hidden, clipped fields: {:?}",
            truncation.hidden_items, truncation.clipped_fields
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
