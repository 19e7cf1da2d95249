//! Page configuration
//!
//! Read once at start from data attributes on the `#measurement-app` host.

use axe_catalog_common::{Error, MeasurementCatalog, MeasurementRecord, Result};
use web_sys::Element;

use crate::api::measurements::{default_batch_action, default_single_action};

pub const MEASUREMENT_HOST_ID: &str = "measurement-app";

/// Everything the measurement components need to talk to the server
#[derive(Debug, Clone)]
pub struct PageContext {
    pub axe_id: u32,
    pub csrf_token: String,
    pub catalog: MeasurementCatalog,
    pub batch_action: String,
    pub single_action: String,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub context: PageContext,
    pub measurements: Vec<MeasurementRecord>,
}

impl PageConfig {
    pub fn from_element(host: &Element, csrf_token: String) -> Result<Self> {
        Self::from_attributes(|name| host.get_attribute(name), csrf_token)
    }

    /// Build from an attribute lookup. `data-axe-id` is required; the record
    /// list, catalog overrides and form actions are optional.
    pub fn from_attributes(
        attr: impl Fn(&str) -> Option<String>,
        csrf_token: String,
    ) -> Result<Self> {
        let axe_id = attr("data-axe-id")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| Error::Config("data-axe-id is missing or not a number".to_string()))?;

        let measurements = match non_empty(attr("data-measurements")) {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        let mut catalog = MeasurementCatalog::builtin();
        if let Some(json) = non_empty(attr("data-measurement-types")) {
            catalog = catalog.with_types_json(&json)?;
        }
        if let Some(json) = non_empty(attr("data-templates")) {
            catalog = catalog.with_templates_json(&json)?;
        }

        let context = PageContext {
            axe_id,
            csrf_token,
            catalog,
            batch_action: non_empty(attr("data-batch-action"))
                .unwrap_or_else(|| default_batch_action(axe_id)),
            single_action: non_empty(attr("data-single-action"))
                .unwrap_or_else(|| default_single_action(axe_id)),
        };

        Ok(Self { context, measurements })
    }

    pub fn into_parts(self) -> (PageContext, Vec<MeasurementRecord>) {
        (self.context, self.measurements)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PageConfig::from_attributes(lookup(&[("data-axe-id", "12")]), "tok".into()).unwrap();
        assert_eq!(config.context.axe_id, 12);
        assert_eq!(config.context.batch_action, "/yxor/12/matt/mall/");
        assert_eq!(config.context.single_action, "/yxor/12/matt/");
        assert!(config.measurements.is_empty());
        assert!(config.context.catalog.contains("Vikt"));
    }

    #[test]
    fn test_measurements_and_overrides() {
        let config = PageConfig::from_attributes(
            lookup(&[
                ("data-axe-id", "3"),
                ("data-measurements", r#"[{"id": 7, "name": "Vikt", "value": 1200, "unit": "gram"}]"#),
                ("data-measurement-types", r#"[{"name": "Egghöjd", "unit": "mm"}]"#),
                ("data-batch-action", "/custom/batch/"),
            ]),
            String::new(),
        )
        .unwrap();
        assert_eq!(config.measurements.len(), 1);
        assert_eq!(config.measurements[0].value, "1200");
        assert!(config.context.catalog.contains("Egghöjd"));
        assert!(!config.context.catalog.contains("Vikt"));
        assert_eq!(config.context.batch_action, "/custom/batch/");
    }

    #[test]
    fn test_missing_axe_id() {
        let err = PageConfig::from_attributes(lookup(&[]), String::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_measurement_json() {
        let err = PageConfig::from_attributes(
            lookup(&[("data-axe-id", "1"), ("data-measurements", "{oops")]),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
