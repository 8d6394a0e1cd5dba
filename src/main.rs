//! Cfn Uploadr - Upload CloudFormation templates to S3
//!
//! Pushes the templates under `cloudformation/` to buckets across a set of
//! AWS regions, with existence checks and optional bucket creation.

use clap::Parser;

use cfn_uploadr::config::{Config, Partition};
use cfn_uploadr::region::{self, Ec2RegionSource, RegionSpec};
use cfn_uploadr::s3::AwsObjectStore;
use cfn_uploadr::upload::{UploadSummary, Uploader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Cfn Uploadr - Upload templates under cloudformation/ to S3
#[derive(Parser, Debug)]
#[command(name = "cfn-uploadr")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Partition to target
    #[arg(long, value_enum)]
    partition: Partition,

    /// Valid regions, "all" or a comma separated list
    #[arg(long)]
    regions: String,

    /// Template filenames, leave out ".cfn.json", comma separated list
    #[arg(long, required = true, value_delimiter = ',')]
    templates: Vec<String>,

    /// Buckets to upload to, defaults to [region]-aws-parallelcluster, comma separated list
    #[arg(long, value_delimiter = ',')]
    bucket: Option<Vec<String>>,

    /// Doesn't push anything to S3, just outputs
    #[arg(long)]
    dryrun: bool,

    /// If override is false, the file will not be pushed if it already exists in the bucket
    #[arg(long = "override")]
    override_existing: bool,

    /// Create the S3 bucket if it does not exist
    #[arg(long)]
    createifnobucket: bool,

    /// Unsupported regions, comma separated
    #[arg(long = "unsupportedregions", value_delimiter = ',')]
    unsupported_regions: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cfn-uploadr v{}", env!("CARGO_PKG_VERSION"));

    let config = Config {
        partition: args.partition,
        region_spec: RegionSpec::parse(&args.regions),
        templates: args.templates,
        buckets: args.bucket,
        unsupported_regions: args.unsupported_regions.into_iter().collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dryrun: args.dryrun,
        override_existing: args.override_existing,
        create_if_no_bucket: args.createifnobucket,
    };
    config.validate()?;

    let regions = region::resolve(
        &config.region_spec,
        config.partition.anchor_region(),
        &config.unsupported_regions,
        &Ec2RegionSource,
    )
    .await?;
    info!(?regions, "resolved target regions");

    let uploader = Uploader::new(&config);
    let mut summary = UploadSummary::default();

    for region_name in &regions {
        let store = AwsObjectStore::for_region(region_name).await;
        summary.merge(&uploader.upload_region(region_name, &store).await?);
    }

    info!(
        uploaded = summary.uploaded,
        skipped = summary.skipped,
        buckets_created = summary.buckets_created,
        "run complete"
    );

    Ok(())
}
