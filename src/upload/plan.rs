//! Upload planning helpers
//!
//! Pure derivations shared by the orchestrator: source paths, destination
//! keys, per-region bucket lists, and the upload decision table.

use std::path::PathBuf;

use crate::config::Config;

/// Directory holding the template sources, relative to the working directory
pub const TEMPLATE_DIR: &str = "cloudformation";

/// Key prefix under which templates are stored in every bucket
pub const KEY_PREFIX: &str = "templates";

const DEFAULT_BUCKET_SUFFIX: &str = "aws-parallelcluster";

/// Local source path for a template base name.
pub fn source_path(template: &str) -> PathBuf {
    PathBuf::from(format!("{TEMPLATE_DIR}/{template}.cfn.json"))
}

/// Destination key for a template at a given tool version.
pub fn destination_key(template: &str, version: &str) -> String {
    format!("{KEY_PREFIX}/{template}-{version}.cfn.json")
}

/// Default bucket name for a region when no explicit bucket list is given.
pub fn default_bucket_name(region: &str) -> String {
    format!("{region}-{DEFAULT_BUCKET_SUFFIX}")
}

/// Destination buckets for one region: the explicit list, or the single
/// per-region default.
pub fn buckets_for(config: &Config, region: &str) -> Vec<String> {
    match &config.buckets {
        Some(buckets) => buckets.clone(),
        None => vec![default_bucket_name(region)],
    }
}

/// Why an upload was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DryRun,
    AlreadyExists,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DryRun => write!(f, "dryrun is set"),
            SkipReason::AlreadyExists => write!(f, "object exists and override is not set"),
        }
    }
}

/// Outcome of the upload decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Upload,
    Skip(SkipReason),
}

/// Decide whether to upload given the existence probe and flags.
///
/// | exists | override | dryrun | action |
/// |--------|----------|--------|--------|
/// | false  | any      | false  | upload |
/// | true   | true     | false  | upload |
/// | true   | false    | any    | skip   |
/// | any    | any      | true   | skip   |
pub fn decide(exists: bool, override_existing: bool, dryrun: bool) -> Decision {
    if dryrun {
        return Decision::Skip(SkipReason::DryRun);
    }

    if exists && !override_existing {
        return Decision::Skip(SkipReason::AlreadyExists);
    }

    Decision::Upload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path() {
        assert_eq!(
            source_path("vpc"),
            PathBuf::from("cloudformation/vpc.cfn.json")
        );
    }

    #[test]
    fn test_destination_key() {
        assert_eq!(
            destination_key("vpc", "3.1.0"),
            "templates/vpc-3.1.0.cfn.json"
        );
    }

    #[test]
    fn test_default_bucket_name() {
        assert_eq!(
            default_bucket_name("eu-west-1"),
            "eu-west-1-aws-parallelcluster"
        );
    }

    #[test]
    fn test_decision_table() {
        // (exists, override, dryrun) -> expected
        let cases = [
            (false, false, false, Decision::Upload),
            (false, true, false, Decision::Upload),
            (true, true, false, Decision::Upload),
            (true, false, false, Decision::Skip(SkipReason::AlreadyExists)),
            (true, false, true, Decision::Skip(SkipReason::DryRun)),
            (false, false, true, Decision::Skip(SkipReason::DryRun)),
            (false, true, true, Decision::Skip(SkipReason::DryRun)),
            (true, true, true, Decision::Skip(SkipReason::DryRun)),
        ];

        for (exists, override_existing, dryrun, expected) in cases {
            assert_eq!(
                decide(exists, override_existing, dryrun),
                expected,
                "exists={exists} override={override_existing} dryrun={dryrun}"
            );
        }
    }
}
