//! EC2-backed region discovery

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};

use super::{RegionError, RegionSource};

/// Region source backed by EC2 DescribeRegions.
///
/// Credentials come from the default provider chain; the client is scoped to
/// the partition's anchor region so the call stays inside the right realm.
pub struct Ec2RegionSource;

#[async_trait]
impl RegionSource for Ec2RegionSource {
    async fn list_regions(&self, anchor: &str) -> Result<Vec<String>, RegionError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(anchor.to_string()))
            .load()
            .await;
        let client = aws_sdk_ec2::Client::new(&sdk_config);

        let output = client
            .describe_regions()
            .send()
            .await
            .map_err(|e| RegionError::Discovery(e.to_string()))?;

        Ok(output
            .regions()
            .iter()
            .filter_map(|r| r.region_name().map(str::to_string))
            .collect())
    }
}
