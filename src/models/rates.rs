//! Per-region rate collections.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from region code to a rate.
///
/// Iteration order is insertion order. Analysis breaks max/min ties by
/// taking the first region encountered, so the order is part of the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateMap {
    entries: Vec<(String, f64)>,
}

impl RateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rate. An existing region keeps its position and gets the new value.
    pub fn insert(&mut self, region: impl Into<String>, rate: f64) {
        let region = region.into();
        match self.entries.iter_mut().find(|(code, _)| *code == region) {
            Some(entry) => entry.1 = rate,
            None => self.entries.push((region, rate)),
        }
    }

    pub fn get(&self, region: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(code, _)| code == region)
            .map(|(_, rate)| *rate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(region, rate)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, rate)| *rate)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = RateMap::new();
        for (region, rate) in iter {
            map.insert(region, rate);
        }
        map
    }
}

impl Serialize for RateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (region, rate) in &self.entries {
            map.serialize_entry(region, rate)?;
        }
        map.end()
    }
}

struct RateMapVisitor;

impl<'de> Visitor<'de> for RateMapVisitor {
    type Value = RateMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping region codes to rates")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RateMap, A::Error> {
        let mut entries: Vec<(String, f64)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((region, rate)) = access.next_entry::<String, f64>()? {
            if entries.iter().any(|(code, _)| *code == region) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate region code: {}",
                    region
                )));
            }
            entries.push((region, rate));
        }
        Ok(RateMap { entries })
    }
}

impl<'de> Deserialize<'de> for RateMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RateMapVisitor)
    }
}

/// Win, pick and ban rate for one champion in one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRates {
    pub winrate: f64,
    pub pickrate: f64,
    pub banrate: f64,
}

/// All regional rates known for a champion, in region order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionRates {
    pub name: String,
    pub regions: RegionRateTable,
}

impl ChampionRates {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regions: RegionRateTable::default(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>, rates: RegionRates) -> Self {
        self.regions.insert(region, rates);
        self
    }

    /// Project to the win-rate map consumed by the analyzer.
    pub fn win_rates(&self) -> RateMap {
        self.regions.iter().map(|(code, r)| (code, r.winrate)).collect()
    }
}

/// Ordered region → [`RegionRates`] table. Serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionRateTable {
    entries: Vec<(String, RegionRates)>,
}

impl RegionRateTable {
    pub fn insert(&mut self, region: impl Into<String>, rates: RegionRates) {
        let region = region.into();
        match self.entries.iter_mut().find(|(code, _)| *code == region) {
            Some(entry) => entry.1 = rates,
            None => self.entries.push((region, rates)),
        }
    }

    pub fn get(&self, region: &str) -> Option<&RegionRates> {
        self.entries
            .iter()
            .find(|(code, _)| code == region)
            .map(|(_, rates)| rates)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionRates)> + '_ {
        self.entries.iter().map(|(code, rates)| (code.as_str(), rates))
    }
}

impl Serialize for RegionRateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (region, rates) in &self.entries {
            map.serialize_entry(region, rates)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionRateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RegionRateTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping region codes to rate records")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<RegionRateTable, A::Error> {
                let mut table = RegionRateTable::default();
                while let Some((region, rates)) = access.next_entry::<String, RegionRates>()? {
                    if table.get(&region).is_some() {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate region code: {}",
                            region
                        )));
                    }
                    table.entries.push((region, rates));
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_map_preserves_insertion_order() {
        let map: RateMap = [("KR", 0.54), ("NA", 0.52), ("BR", 0.48)].into_iter().collect();
        let regions: Vec<_> = map.regions().collect();
        assert_eq!(regions, vec!["KR", "NA", "BR"]);
    }

    #[test]
    fn test_rate_map_insert_replaces_in_place() {
        let mut map = RateMap::new();
        map.insert("NA", 0.50);
        map.insert("EUW", 0.51);
        map.insert("NA", 0.55);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("NA"), Some(0.55));
        assert_eq!(map.regions().next(), Some("NA"));
    }

    #[test]
    fn test_rate_map_json_keeps_document_order() {
        let json = r#"{"TR": 0.49, "EUW": 0.51, "CN": 0.53}"#;
        let map: RateMap = serde_json::from_str(json).unwrap();
        let regions: Vec<_> = map.regions().collect();
        assert_eq!(regions, vec!["TR", "EUW", "CN"]);

        let out = serde_json::to_string(&map).unwrap();
        assert_eq!(out, r#"{"TR":0.49,"EUW":0.51,"CN":0.53}"#);
    }

    #[test]
    fn test_rate_map_rejects_duplicate_regions() {
        let json = r#"{"NA": 0.49, "NA": 0.51}"#;
        let err = serde_json::from_str::<RateMap>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate region code: NA"));
    }

    #[test]
    fn test_rate_map_rejects_non_numeric_rate() {
        assert!(serde_json::from_str::<RateMap>(r#"{"NA": "high"}"#).is_err());
        assert!(serde_json::from_str::<RateMap>("[0.5]").is_err());
    }

    #[test]
    fn test_champion_win_rates_projection() {
        let champ = ChampionRates::new("Ahri")
            .with_region(
                "NA",
                RegionRates {
                    winrate: 0.52,
                    pickrate: 0.08,
                    banrate: 0.05,
                },
            )
            .with_region(
                "KR",
                RegionRates {
                    winrate: 0.49,
                    pickrate: 0.11,
                    banrate: 0.02,
                },
            );

        let rates = champ.win_rates();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.get("NA"), Some(0.52));
        assert_eq!(rates.get("KR"), Some(0.49));
    }

    #[test]
    fn test_champion_rates_serialization_shape() {
        let champ = ChampionRates::new("Yasuo").with_region(
            "EUW",
            RegionRates {
                winrate: 0.48,
                pickrate: 0.12,
                banrate: 0.15,
            },
        );

        let value = serde_json::to_value(&champ).unwrap();
        assert_eq!(value["name"], "Yasuo");
        assert_eq!(value["regions"]["EUW"]["winrate"], 0.48);
        assert_eq!(value["regions"]["EUW"]["banrate"], 0.15);
    }
}
