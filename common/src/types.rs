//! Record types shared by the front end and the CLI
//!
//! - MeasurementType / MeasurementTemplate: the measurement catalog
//! - MeasurementRecord: a measurement row as rendered on the axe page
//! - StampResult / SearchResponse: payload of the stamp search endpoint

use serde::{Deserialize, Deserializer, Serialize};

/// A recognized kind of measurement with its canonical unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementType {
    pub name: String,
    pub unit: String,
}

impl MeasurementType {
    pub fn new(name: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Named preset list used by the batch form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementTemplate {
    pub name: String,
    #[serde(default)]
    pub measurements: Vec<MeasurementType>,
}

/// A measurement as shown in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub id: u32,
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

/// Why a stamp matched the query, as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Name,
    Description,
    Transcription,
    Symbol,
    Manufacturer,
}

impl MatchType {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "name" => Some(MatchType::Name),
            "description" => Some(MatchType::Description),
            "transcription" => Some(MatchType::Transcription),
            "symbol" => Some(MatchType::Symbol),
            "manufacturer" => Some(MatchType::Manufacturer),
            _ => None,
        }
    }
}

/// One stamp in a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampResult {
    pub id: u32,
    pub name: String,
    pub manufacturer: String,
    #[serde(rename = "type")]
    pub stamp_type: String,
    pub status: String,
    pub description: Option<String>,
    pub transcription: Option<String>,
    pub symbols: Vec<String>,
    pub symbol_ids: Vec<u32>,
    pub match_types: Vec<String>,
    pub url: Option<String>,
}

impl StampResult {
    /// Recognized server match tags, unknown tags dropped, duplicates removed
    pub fn match_types(&self) -> Vec<MatchType> {
        let mut out: Vec<MatchType> = Vec::new();
        for tag in &self.match_types {
            if let Some(m) = MatchType::parse(tag) {
                if !out.contains(&m) {
                    out.push(m);
                }
            }
        }
        out
    }

    pub fn has_server_match_types(&self) -> bool {
        !self.match_types.is_empty()
    }
}

/// `GET /stamplar/sok/` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<StampResult>,
}

/// Accepts `"12.5"` as well as `12.5` so decimal fields survive either encoding
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_record_value_as_string() {
        let json = r#"{"id": 3, "name": "Vikt", "value": "1250.00", "unit": "gram"}"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(record.value, "1250.00");
    }

    #[test]
    fn test_measurement_record_value_as_number() {
        let json = r#"{"id": 3, "name": "Bladlängd", "value": 152.5, "unit": "mm"}"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(record.value, "152.5");
        assert_eq!(record.unit, "mm");
    }

    #[test]
    fn test_measurement_record_rejects_object_value() {
        let json = r#"{"id": 3, "name": "Vikt", "value": {"x": 1}}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
    }

    #[test]
    fn test_stamp_result_deserialize_minimal() {
        let json = r#"{"id": 9, "name": "GRÄNSFORS", "manufacturer": "Gränsfors Bruk", "type": "Text", "status": "Känd"}"#;
        let stamp: StampResult = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(stamp.id, 9);
        assert_eq!(stamp.stamp_type, "Text");
        assert!(stamp.description.is_none());
        assert!(stamp.symbols.is_empty());
        assert!(!stamp.has_server_match_types());
    }

    #[test]
    fn test_stamp_result_match_types_filters_unknown() {
        let stamp = StampResult {
            match_types: vec![
                "name".to_string(),
                "fuzzy".to_string(),
                "name".to_string(),
                "symbol".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(stamp.match_types(), vec![MatchType::Name, MatchType::Symbol]);
    }

    #[test]
    fn test_search_response_missing_results() {
        let response: SearchResponse = serde_json::from_str("{}").expect("deserialize failed");
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_template_deserialize() {
        let json = r#"{"name": "Fällkniv", "measurements": [{"name": "Handtag", "unit": "mm"}]}"#;
        let template: MeasurementTemplate = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(template.measurements.len(), 1);
        assert_eq!(template.measurements[0], MeasurementType::new("Handtag", "mm"));
    }
}
