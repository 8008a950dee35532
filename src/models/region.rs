//! Game server regions.

use serde::{Deserialize, Serialize};

/// A geographic server cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Short display code, e.g. "EUW"
    pub code: String,

    /// Platform routing id, e.g. "euw1"
    pub platform: String,
}

impl Region {
    pub fn new(code: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            platform: platform.into(),
        }
    }
}

/// Known regions as `(code, platform)` pairs.
pub const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("NA", "na1"),
    ("EUW", "euw1"),
    ("EUNE", "eun1"),
    ("KR", "kr"),
    ("CN", "cn1"),
    ("JP", "jp1"),
    ("BR", "br1"),
    ("RU", "ru"),
    ("OCE", "oc1"),
    ("TR", "tr1"),
    ("LAN", "la1"),
    ("LAS", "la2"),
];

/// The default region catalogue, in display order.
pub fn default_regions() -> Vec<Region> {
    DEFAULT_REGIONS
        .iter()
        .map(|(code, platform)| Region::new(*code, *platform))
        .collect()
}
