//! Region resolution module
//!
//! Turns the `--regions` argument into the final set of target regions:
//! either a literal comma-separated list, or every region in the partition
//! as reported by a discovery call issued against the partition's anchor
//! region. Caller-specified unsupported regions are always subtracted.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

mod ec2;

pub use ec2::Ec2RegionSource;

/// Region resolution errors
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Region discovery failed: {0}")]
    Discovery(String),
}

/// The `--regions` argument: the literal `all`, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSpec {
    /// Every region in the partition, per the discovery call
    All,
    /// An explicit list of region names
    List(Vec<String>),
}

impl RegionSpec {
    /// Parse the raw `--regions` value.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            RegionSpec::All
        } else {
            RegionSpec::List(
                raw.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        }
    }
}

/// Source of the partition-wide region list.
///
/// The production implementation queries EC2 DescribeRegions; tests swap in
/// a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionSource: Send + Sync {
    /// List every region visible from the given anchor region.
    async fn list_regions(&self, anchor: &str) -> Result<Vec<String>, RegionError>;
}

/// Resolve the final target region set.
///
/// `RegionSpec::All` queries `source` scoped to `anchor`; an explicit list is
/// taken as-is. Unsupported regions are subtracted either way, and the
/// result is sorted.
pub async fn resolve(
    spec: &RegionSpec,
    anchor: &str,
    unsupported: &BTreeSet<String>,
    source: &dyn RegionSource,
) -> Result<BTreeSet<String>, RegionError> {
    let regions: BTreeSet<String> = match spec {
        RegionSpec::All => source.list_regions(anchor).await?.into_iter().collect(),
        RegionSpec::List(list) => list.iter().cloned().collect(),
    };

    Ok(regions.difference(unsupported).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(RegionSpec::parse("all"), RegionSpec::All);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            RegionSpec::parse("us-east-1,us-west-2"),
            RegionSpec::List(vec!["us-east-1".into(), "us-west-2".into()])
        );
    }

    #[test]
    fn test_parse_skips_empty_entries() {
        assert_eq!(
            RegionSpec::parse("us-east-1,"),
            RegionSpec::List(vec!["us-east-1".into()])
        );
    }

    #[tokio::test]
    async fn test_resolve_explicit_list() {
        let mut source = MockRegionSource::new();
        source.expect_list_regions().never();

        let resolved = resolve(
            &RegionSpec::List(vec!["us-east-1".into(), "us-west-2".into()]),
            "us-east-1",
            &BTreeSet::new(),
            &source,
        )
        .await
        .unwrap();

        assert_eq!(resolved, set(&["us-east-1", "us-west-2"]));
    }

    #[tokio::test]
    async fn test_resolve_all_queries_anchor() {
        let mut source = MockRegionSource::new();
        source
            .expect_list_regions()
            .withf(|anchor| anchor == "us-east-1")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    "us-west-2".into(),
                    "eu-west-1".into(),
                    "us-east-1".into(),
                ])
            });

        let resolved = resolve(&RegionSpec::All, "us-east-1", &BTreeSet::new(), &source)
            .await
            .unwrap();

        assert_eq!(resolved, set(&["eu-west-1", "us-east-1", "us-west-2"]));
    }

    #[tokio::test]
    async fn test_resolve_subtracts_unsupported() {
        let mut source = MockRegionSource::new();
        source
            .expect_list_regions()
            .returning(|_| Ok(vec!["us-east-1".into(), "ap-east-1".into()]));

        let resolved = resolve(
            &RegionSpec::All,
            "us-east-1",
            &set(&["ap-east-1"]),
            &source,
        )
        .await
        .unwrap();

        assert_eq!(resolved, set(&["us-east-1"]));
    }

    #[tokio::test]
    async fn test_resolve_subtracts_unsupported_from_explicit_list() {
        let source = MockRegionSource::new();

        let resolved = resolve(
            &RegionSpec::List(vec!["us-east-1".into(), "us-west-2".into()]),
            "us-east-1",
            &set(&["us-west-2"]),
            &source,
        )
        .await
        .unwrap();

        assert_eq!(resolved, set(&["us-east-1"]));
    }

    #[tokio::test]
    async fn test_resolve_propagates_discovery_error() {
        let mut source = MockRegionSource::new();
        source
            .expect_list_regions()
            .returning(|_| Err(RegionError::Discovery("access denied".into())));

        let result = resolve(&RegionSpec::All, "us-east-1", &BTreeSet::new(), &source).await;
        assert!(result.is_err());
    }
}
