//! Configuration module for Cfn Uploadr
//!
//! The invocation config is built once from CLI arguments and is immutable
//! for the rest of the run. All components take it by reference.

use std::collections::BTreeSet;

use clap::ValueEnum;
use thiserror::Error;

use crate::region::RegionSpec;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// AWS partition to target.
///
/// Partitions are distinct authentication/endpoint realms; each has a fixed
/// anchor region used to issue the region-discovery call. Any value outside
/// this enum is rejected at argument-parsing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Partition {
    Commercial,
    Govcloud,
    China,
}

impl Partition {
    /// The region used to issue the DescribeRegions call for this partition.
    pub fn anchor_region(&self) -> &'static str {
        match self {
            Partition::Commercial => "us-east-1",
            Partition::Govcloud => "us-gov-west-1",
            Partition::China => "cn-north-1",
        }
    }
}

/// Invocation configuration, immutable once parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Partition the target regions belong to
    pub partition: Partition,
    /// Target regions: everything in the partition, or an explicit list
    pub region_spec: RegionSpec,
    /// Template base names, without the `.cfn.json` extension
    pub templates: Vec<String>,
    /// Explicit destination buckets; `None` derives one default per region
    pub buckets: Option<Vec<String>>,
    /// Regions removed from the resolved set before uploading
    pub unsupported_regions: BTreeSet<String>,
    /// Version string embedded in every destination key
    pub version: String,
    /// Log upload decisions without pushing anything to S3
    pub dryrun: bool,
    /// Overwrite objects that already exist in the destination bucket
    pub override_existing: bool,
    /// Create the destination bucket when it does not exist
    pub create_if_no_bucket: bool,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one template must be given".into(),
            ));
        }

        if self.version.is_empty() {
            return Err(ConfigError::ValidationError(
                "Version string cannot be empty".into(),
            ));
        }

        if let Some(buckets) = &self.buckets {
            if buckets.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Explicit bucket list cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            partition: Partition::Commercial,
            region_spec: RegionSpec::List(vec!["us-east-1".into()]),
            templates: vec!["vpc".into()],
            buckets: None,
            unsupported_regions: BTreeSet::new(),
            version: "3.1.0".into(),
            dryrun: false,
            override_existing: false,
            create_if_no_bucket: false,
        }
    }

    #[test]
    fn test_anchor_regions() {
        assert_eq!(Partition::Commercial.anchor_region(), "us-east-1");
        assert_eq!(Partition::Govcloud.anchor_region(), "us-gov-west-1");
        assert_eq!(Partition::China.anchor_region(), "cn-north-1");
    }

    #[test]
    fn test_validate_ok() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_templates() {
        let mut config = base_config();
        config.templates.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_version() {
        let mut config = base_config();
        config.version = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_bucket_list() {
        let mut config = base_config();
        config.buckets = Some(vec![]);
        assert!(config.validate().is_err());
    }
}
