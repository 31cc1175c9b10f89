use crate::data_structures::{UsageDataset, UsageRecord, UsageTotal};
use crate::error::{GraphError, Result};
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// The input shapes ccusage has emitted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageSchema {
    /// `{ "daily": [{ "date", "totalCost", "totalTokens", ... }] }`
    Current,
    /// `{ "usage": [{ "date", "cost", "tokens" }] }`
    Legacy,
}

impl UsageSchema {
    pub fn collection_key(&self) -> &'static str {
        match self {
            UsageSchema::Current => "daily",
            UsageSchema::Legacy => "usage",
        }
    }

    /// First schema whose collection is a non-empty array. `daily` wins over `usage`.
    pub fn detect(document: &Value) -> Option<(UsageSchema, &[Value])> {
        [UsageSchema::Current, UsageSchema::Legacy]
            .into_iter()
            .find_map(|schema| {
                document
                    .get(schema.collection_key())
                    .and_then(Value::as_array)
                    .filter(|entries| !entries.is_empty())
                    .map(|entries| (schema, entries.as_slice()))
            })
    }

    fn map_entries(&self, entries: &[Value]) -> Result<Vec<UsageRecord>> {
        match self {
            UsageSchema::Current => map_all::<DailyEntry>(entries),
            UsageSchema::Legacy => map_all::<LegacyEntry>(entries),
        }
    }
}

/// Field mapping from one schema's entry into the canonical record.
trait IntoUsageRecord {
    fn into_record(self) -> std::result::Result<UsageRecord, String>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyEntry {
    date: String,
    total_cost: f64,
    #[serde(default)]
    total_tokens: Option<u64>,
}

impl IntoUsageRecord for DailyEntry {
    fn into_record(self) -> std::result::Result<UsageRecord, String> {
        build_record(&self.date, self.total_cost, self.total_tokens)
    }
}

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    date: String,
    cost: f64,
    #[serde(default)]
    tokens: Option<u64>,
}

impl IntoUsageRecord for LegacyEntry {
    fn into_record(self) -> std::result::Result<UsageRecord, String> {
        build_record(&self.date, self.cost, self.tokens)
    }
}

fn map_all<E>(entries: &[Value]) -> Result<Vec<UsageRecord>>
where
    E: DeserializeOwned + IntoUsageRecord,
{
    entries
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            E::deserialize(raw)
                .map_err(|e| e.to_string())
                .and_then(E::into_record)
                .map_err(|reason| GraphError::InvalidRecord { index, reason })
        })
        .collect()
}

fn build_record(
    date: &str,
    cost: f64,
    tokens: Option<u64>,
) -> std::result::Result<UsageRecord, String> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(format!("cost must be a non-negative amount, got {}", cost));
    }

    Ok(UsageRecord::new(parse_date(date)?, cost, tokens))
}

/// Accepts a plain calendar date or an RFC 3339 timestamp.
fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| format!("unrecognised date '{}'", raw))
}

pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_str(&self, input: &str) -> Result<UsageDataset> {
        let document: Value = serde_json::from_str(input)?;
        self.normalize(&document)
    }

    pub fn normalize(&self, document: &Value) -> Result<UsageDataset> {
        let (schema, entries) = UsageSchema::detect(document).ok_or(GraphError::NoUsageData)?;
        debug!(
            schema = ?schema,
            entries = entries.len(),
            "detected usage collection '{}'",
            schema.collection_key()
        );

        let records = schema.map_entries(entries)?;
        Ok(UsageDataset::new(records, self.parse_total(document)))
    }

    fn parse_total(&self, document: &Value) -> Option<UsageTotal> {
        let raw = document.get("total").filter(|v| !v.is_null())?;
        match UsageTotal::deserialize(raw) {
            Ok(total) => Some(total),
            Err(e) => {
                warn!("ignoring malformed 'total' object: {}", e);
                None
            }
        }
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_format() {
        let loader = DataLoader::new();
        let input = r#"{"daily": [
            {"date": "2024-01-02", "totalCost": 25.0, "totalTokens": 2000, "modelsUsed": ["claude-sonnet-4-20250514"]},
            {"date": "2024-01-01", "totalCost": 5.0, "totalTokens": 1000}
        ]}"#;

        let dataset = loader.parse_str(input).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].date().to_string(), "2024-01-01");
        assert_eq!(dataset.records()[0].cost(), 5.0);
        assert_eq!(dataset.records()[0].tokens(), Some(1000));
        assert_eq!(dataset.records()[1].cost(), 25.0);
        assert!(dataset.total().is_none());
    }

    #[test]
    fn test_parse_legacy_format_with_total() {
        let loader = DataLoader::new();
        let input = r#"{
            "usage": [
                {"date": "2024-01-05", "model": "claude-3-opus-20240229", "cost": 1.5, "tokens": 300},
                {"date": "2024-01-04", "cost": 0.5}
            ],
            "total": {"cost": 2.0, "tokens": 300}
        }"#;

        let dataset = loader.parse_str(input).unwrap();
        assert_eq!(dataset.records()[0].tokens(), None);
        assert_eq!(dataset.records()[1].tokens(), Some(300));
        let total = dataset.total().unwrap();
        assert_eq!(total.cost(), 2.0);
        assert_eq!(total.tokens(), Some(300));
    }

    #[test]
    fn test_daily_preferred_over_usage() {
        let value: Value = serde_json::from_str(
            r#"{"daily": [{"date": "2024-01-01", "totalCost": 1.0}], "usage": [{"date": "2024-01-01", "cost": 9.0}]}"#,
        )
        .unwrap();

        let (schema, entries) = UsageSchema::detect(&value).unwrap();
        assert_eq!(schema, UsageSchema::Current);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_empty_daily_falls_back_to_usage() {
        let loader = DataLoader::new();
        let input = r#"{"daily": [], "usage": [{"date": "2024-02-01", "cost": 3.0}]}"#;

        let dataset = loader.parse_str(input).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].cost(), 3.0);
    }

    #[test]
    fn test_no_usage_data() {
        let loader = DataLoader::new();

        for input in [r#"{"daily": [], "usage": []}"#, r#"{}"#, r#"{"daily": "nope"}"#, "[]"] {
            let err = loader.parse_str(input).unwrap_err();
            assert!(matches!(err, GraphError::NoUsageData), "input {}", input);
        }
    }

    #[test]
    fn test_malformed_json_is_parse_failure() {
        let loader = DataLoader::new();
        assert!(matches!(
            loader.parse_str(r#"{"daily": [{"#),
            Err(GraphError::ParseFailure(_))
        ));
        assert!(matches!(loader.parse_str(""), Err(GraphError::ParseFailure(_))));
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let loader = DataLoader::new();

        let missing_cost = r#"{"daily": [{"date": "2024-01-01", "totalCost": 1.0}, {"date": "2024-01-02"}]}"#;
        match loader.parse_str(missing_cost) {
            Err(GraphError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }

        let bad_date = r#"{"usage": [{"date": "January 1st", "cost": 1.0}]}"#;
        assert!(matches!(
            loader.parse_str(bad_date),
            Err(GraphError::InvalidRecord { index: 0, .. })
        ));

        let negative = r#"{"usage": [{"date": "2024-01-01", "cost": -1.0}]}"#;
        assert!(matches!(
            loader.parse_str(negative),
            Err(GraphError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_timestamp_dates_are_accepted() {
        assert_eq!(
            parse_date("2024-03-09T23:15:00Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-03-09 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_malformed_total_is_ignored() {
        let loader = DataLoader::new();
        let input = r#"{"usage": [{"date": "2024-01-01", "cost": 1.0}], "total": {"tokens": 5}}"#;

        let dataset = loader.parse_str(input).unwrap();
        assert!(dataset.total().is_none());
    }
}
