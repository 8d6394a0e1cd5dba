//! Cfn Uploadr Library
//!
//! Uploads CloudFormation templates from the local `cloudformation/`
//! directory to S3 buckets across a set of AWS regions.
//!
//! # Features
//!
//! - **Region Resolution**: Explicit region lists, or partition-wide
//!   discovery via EC2 DescribeRegions
//! - **Conditional Uploads**: Existence checks with `--override` and
//!   `--dryrun` control
//! - **Bucket Auto-Creation**: Optionally creates missing buckets with
//!   versioning enabled
//!
//! # Example
//!
//! ```no_run
//! use cfn_uploadr::config::Config;
//! use cfn_uploadr::region::{self, Ec2RegionSource};
//! use cfn_uploadr::s3::AwsObjectStore;
//! use cfn_uploadr::upload::Uploader;
//!
//! # async fn example(config: Config) -> anyhow::Result<()> {
//! let regions = region::resolve(
//!     &config.region_spec,
//!     config.partition.anchor_region(),
//!     &config.unsupported_regions,
//!     &Ec2RegionSource,
//! )
//! .await?;
//!
//! let uploader = Uploader::new(&config);
//! for region in &regions {
//!     let store = AwsObjectStore::for_region(region).await;
//!     uploader.upload_region(region, &store).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod region;
pub mod s3;
pub mod upload;

// Re-export commonly used types
pub use config::{Config, Partition};
pub use upload::Uploader;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
