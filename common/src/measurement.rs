//! Measurement entry state shared by the inline editor and the single form

use crate::catalog::{MeasurementCatalog, OTHER};
use crate::error::{Error, Result};
use crate::types::MeasurementRecord;

pub const MISSING_FIELDS: &str = "Fyll i måttyp, värde och enhet";

/// Editable fields of one measurement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementInput {
    /// Selected option in the type selector: a catalog name or [`OTHER`]
    pub type_choice: String,
    pub custom_name: String,
    pub value: String,
    pub unit: String,
}

/// A validated measurement ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementDraft {
    pub name: String,
    pub value: String,
    pub unit: String,
    /// Name came from the free-text field
    pub custom: bool,
}

impl MeasurementInput {
    /// Prefill from an existing record. Names outside the catalog open with
    /// `OTHER` selected and the name in the free-text field.
    pub fn from_record(record: &MeasurementRecord, catalog: &MeasurementCatalog) -> Self {
        let (type_choice, custom_name) = if catalog.contains(&record.name) {
            (record.name.clone(), String::new())
        } else {
            (OTHER.to_string(), record.name.clone())
        };
        Self {
            type_choice,
            custom_name,
            value: record.value.clone(),
            unit: record.unit.clone(),
        }
    }

    /// Apply a type selector change.
    ///
    /// `OTHER` clears the unit so the user has to supply one; a known type
    /// clears the free-text name and fills in the canonical unit.
    pub fn select_type(&mut self, choice: &str, catalog: &MeasurementCatalog) {
        self.type_choice = choice.to_string();
        if choice == OTHER {
            self.unit.clear();
        } else {
            self.custom_name.clear();
            if let Some(unit) = catalog.unit_for(choice) {
                self.unit = unit.to_string();
            }
        }
    }

    pub fn is_other(&self) -> bool {
        self.type_choice == OTHER
    }

    pub fn shows_custom_name(&self) -> bool {
        self.is_other()
    }

    pub fn resolved_name(&self) -> &str {
        if self.is_other() {
            self.custom_name.trim()
        } else {
            self.type_choice.trim()
        }
    }

    pub fn validate(&self) -> Result<MeasurementDraft> {
        let name = self.resolved_name();
        let value = self.value.trim();
        let unit = self.unit.trim();
        if name.is_empty() || value.is_empty() || unit.is_empty() {
            return Err(Error::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(MeasurementDraft {
            name: name.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
            custom: self.is_other(),
        })
    }
}

impl MeasurementDraft {
    /// Form body for the create and update endpoints
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(4);
        if self.custom {
            fields.push(("name".to_string(), OTHER.to_string()));
            fields.push(("custom_name".to_string(), self.name.clone()));
        } else {
            fields.push(("name".to_string(), self.name.clone()));
        }
        fields.push(("value".to_string(), self.value.clone()));
        fields.push(("unit".to_string(), self.unit.clone()));
        fields
    }

    pub fn into_record(self, id: u32) -> MeasurementRecord {
        MeasurementRecord {
            id,
            name: self.name,
            value: self.value,
            unit: self.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, value: &str, unit: &str) -> MeasurementRecord {
        MeasurementRecord {
            id: 1,
            name: name.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_from_record_known_type() {
        let catalog = MeasurementCatalog::builtin();
        let input = MeasurementInput::from_record(&record("Vikt", "1200", "gram"), &catalog);
        assert_eq!(input.type_choice, "Vikt");
        assert!(input.custom_name.is_empty());
        assert!(!input.shows_custom_name());
    }

    #[test]
    fn test_from_record_unknown_type_uses_other() {
        let catalog = MeasurementCatalog::builtin();
        let input = MeasurementInput::from_record(&record("Eggbredd", "98", "mm"), &catalog);
        assert_eq!(input.type_choice, OTHER);
        assert_eq!(input.custom_name, "Eggbredd");
        assert_eq!(input.resolved_name(), "Eggbredd");
    }

    #[test]
    fn test_select_other_clears_unit() {
        let catalog = MeasurementCatalog::builtin();
        let mut input = MeasurementInput::from_record(&record("Vikt", "1200", "gram"), &catalog);
        input.select_type(OTHER, &catalog);
        assert!(input.shows_custom_name());
        assert_eq!(input.unit, "");
    }

    #[test]
    fn test_select_known_type_fills_unit_and_hides_custom() {
        let catalog = MeasurementCatalog::builtin();
        let mut input = MeasurementInput::default();
        input.select_type(OTHER, &catalog);
        input.custom_name = "Eggbredd".to_string();
        input.select_type("Bladlängd", &catalog);
        assert_eq!(input.unit, "mm");
        assert!(input.custom_name.is_empty());
        assert!(!input.shows_custom_name());
    }

    #[test]
    fn test_validate_missing_value() {
        let input = MeasurementInput {
            type_choice: "Vikt".to_string(),
            value: "  ".to_string(),
            unit: "gram".to_string(),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_other_without_name() {
        let input = MeasurementInput {
            type_choice: OTHER.to_string(),
            value: "12".to_string(),
            unit: "mm".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_draft_form_fields_known() {
        let input = MeasurementInput {
            type_choice: "Vikt".to_string(),
            value: "120".to_string(),
            unit: "gram".to_string(),
            ..Default::default()
        };
        let fields = input.validate().unwrap().form_fields();
        assert_eq!(
            fields,
            vec![
                ("name".to_string(), "Vikt".to_string()),
                ("value".to_string(), "120".to_string()),
                ("unit".to_string(), "gram".to_string()),
            ]
        );
    }

    #[test]
    fn test_draft_form_fields_custom() {
        let input = MeasurementInput {
            type_choice: OTHER.to_string(),
            custom_name: " Eggbredd ".to_string(),
            value: "98".to_string(),
            unit: "mm".to_string(),
        };
        let fields = input.validate().unwrap().form_fields();
        assert_eq!(fields[0], ("name".to_string(), OTHER.to_string()));
        assert_eq!(fields[1], ("custom_name".to_string(), "Eggbredd".to_string()));
    }
}
