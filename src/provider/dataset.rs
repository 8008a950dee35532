//! File-backed rate provider.
//!
//! Loads a JSON snapshot of regional rates once and serves it from memory:
//!
//! ```json
//! {
//!   "version": "13.24.1",
//!   "as_of": "2023-12-12",
//!   "regions": [{"code": "NA", "platform": "na1"}],
//!   "champions": {"Ahri": {"NA": {"winrate": 0.52, "pickrate": 0.08, "banrate": 0.05}}}
//! }
//! ```
//!
//! `regions` may be omitted, in which case the default catalogue is used.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ProviderError, RegionalRateProvider};
use crate::models::{default_regions, ChampionRates, Region, RegionRateTable};

const SAMPLE_DATASET: &str = include_str!("../../data/winrates.sample.json");

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    as_of: Option<NaiveDate>,

    #[serde(default = "default_regions")]
    regions: Vec<Region>,

    champions: BTreeMap<String, RegionRateTable>,
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub version: Option<String>,
    pub as_of: Option<NaiveDate>,
    pub region_count: usize,
    pub champion_count: usize,
}

/// Serves rates from an in-memory dataset snapshot.
#[derive(Debug, Clone)]
pub struct DatasetProvider {
    version: Option<String>,
    as_of: Option<NaiveDate>,
    regions: Vec<Region>,
    champions: Vec<ChampionRates>,
}

impl DatasetProvider {
    /// Load a dataset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path)?;
        let provider = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            champions = provider.champions.len(),
            regions = provider.regions.len(),
            "Loaded rate dataset"
        );
        Ok(provider)
    }

    /// Parse a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::from_dataset(file)
    }

    /// The bundled sample dataset.
    pub fn sample() -> Result<Self, ProviderError> {
        Self::from_json_str(SAMPLE_DATASET)
    }

    fn from_dataset(file: DatasetFile) -> Result<Self, ProviderError> {
        if file.regions.is_empty() {
            return Err(ProviderError::Malformed("dataset declares no regions".to_string()));
        }
        for (i, region) in file.regions.iter().enumerate() {
            if file.regions[..i].iter().any(|r| r.code == region.code) {
                return Err(ProviderError::Malformed(format!(
                    "region {} declared twice",
                    region.code
                )));
            }
        }

        let mut champions = Vec::with_capacity(file.champions.len());
        for (name, table) in file.champions {
            if let Some((code, _)) = table
                .iter()
                .find(|(code, _)| !file.regions.iter().any(|r| r.code == *code))
            {
                return Err(ProviderError::Malformed(format!(
                    "champion {} has rates for undeclared region {}",
                    name, code
                )));
            }

            // Re-key in declared region order
            let mut champion = ChampionRates::new(name);
            for region in &file.regions {
                if let Some(rates) = table.get(&region.code) {
                    champion.regions.insert(region.code.clone(), *rates);
                }
            }
            champions.push(champion);
        }

        Ok(Self {
            version: file.version,
            as_of: file.as_of,
            regions: file.regions,
            champions,
        })
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            version: self.version.clone(),
            as_of: self.as_of,
            region_count: self.regions.len(),
            champion_count: self.champions.len(),
        }
    }

    fn find_champion(&self, name: &str) -> Option<&ChampionRates> {
        self.champions
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[async_trait]
impl RegionalRateProvider for DatasetProvider {
    fn name(&self) -> &'static str {
        "dataset"
    }

    async fn list_regions(&self) -> Result<Vec<Region>, ProviderError> {
        Ok(self.regions.clone())
    }

    async fn list_champions(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.champions.iter().map(|c| c.name.clone()).collect())
    }

    async fn fetch_champion(&self, champion: &str) -> Result<ChampionRates, ProviderError> {
        debug!(champion, "Looking up champion rates");
        self.find_champion(champion)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownChampion(champion.to_string()))
    }

    async fn fetch_all(&self) -> Result<Vec<ChampionRates>, ProviderError> {
        Ok(self.champions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_dataset_loads() {
        let provider = DatasetProvider::sample().unwrap();
        let info = provider.info();

        assert_eq!(info.version.as_deref(), Some("13.24.1"));
        assert_eq!(info.as_of, NaiveDate::from_ymd_opt(2023, 12, 12));
        assert_eq!(info.region_count, 12);
        assert_eq!(info.champion_count, 3);
    }

    #[tokio::test]
    async fn test_fetch_is_case_insensitive_and_ordered() {
        let provider = DatasetProvider::sample().unwrap();
        let rates = provider.fetch("ahri").await.unwrap();

        let regions: Vec<_> = rates.regions().collect();
        assert_eq!(
            regions,
            vec!["NA", "EUW", "EUNE", "KR", "CN", "JP", "BR", "RU", "OCE", "TR", "LAN", "LAS"]
        );
        assert_eq!(rates.get("KR"), Some(0.54));
    }

    #[tokio::test]
    async fn test_unknown_champion() {
        let provider = DatasetProvider::sample().unwrap();
        let err = provider.fetch_champion("Teemo").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownChampion(ref n) if n == "Teemo"));
    }

    #[test]
    fn test_list_champions_sorted() {
        let provider = DatasetProvider::sample().unwrap();
        let names = tokio_test::block_on(provider.list_champions()).unwrap();
        assert_eq!(names, vec!["Ahri", "Kassadin", "Yasuo"]);
    }

    #[test]
    fn test_region_order_follows_declaration() {
        let json = r#"{
            "regions": [{"code": "KR", "platform": "kr"}, {"code": "NA", "platform": "na1"}],
            "champions": {"Zed": {
                "NA": {"winrate": 0.50, "pickrate": 0.1, "banrate": 0.2},
                "KR": {"winrate": 0.53, "pickrate": 0.1, "banrate": 0.2}
            }}
        }"#;
        let provider = DatasetProvider::from_json_str(json).unwrap();
        let zed = tokio_test::block_on(provider.fetch_champion("Zed")).unwrap();

        let order: Vec<_> = zed.regions.iter().map(|(code, _)| code).collect();
        assert_eq!(order, vec!["KR", "NA"]);
    }

    #[test]
    fn test_missing_regions_use_default_catalogue() {
        let json = r#"{"champions": {"Zed": {"EUW": {"winrate": 0.5, "pickrate": 0.1, "banrate": 0.1}}}}"#;
        let provider = DatasetProvider::from_json_str(json).unwrap();
        assert_eq!(provider.info().region_count, 12);
        assert_eq!(provider.info().version, None);
    }

    #[test]
    fn test_undeclared_region_is_malformed() {
        let json = r#"{
            "regions": [{"code": "NA", "platform": "na1"}],
            "champions": {"Zed": {"PBE": {"winrate": 0.5, "pickrate": 0.1, "banrate": 0.1}}}
        }"#;
        let err = DatasetProvider::from_json_str(json).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(ref m) if m.contains("PBE")));
    }

    #[test]
    fn test_duplicate_and_empty_regions_are_malformed() {
        let json = r#"{
            "regions": [{"code": "NA", "platform": "na1"}, {"code": "NA", "platform": "na2"}],
            "champions": {}
        }"#;
        assert!(matches!(
            DatasetProvider::from_json_str(json),
            Err(ProviderError::Malformed(_))
        ));

        let json = r#"{"regions": [], "champions": {}}"#;
        assert!(matches!(
            DatasetProvider::from_json_str(json),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = DatasetProvider::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ProviderError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DATASET.as_bytes()).unwrap();

        let provider = DatasetProvider::from_file(file.path()).unwrap();
        assert_eq!(provider.info().champion_count, 3);

        let missing = DatasetProvider::from_file(Path::new("/nonexistent/rates.json"));
        assert!(matches!(missing, Err(ProviderError::Io(_))));
    }
}
