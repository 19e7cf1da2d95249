//! Measurement catalog
//!
//! Known measurement types with their canonical units and the named
//! templates the batch form is filled from.

use crate::error::{Error, Result};
use crate::types::{MeasurementTemplate, MeasurementType};
use serde::{Deserialize, Serialize};

/// Type selector value that asks for a free-text name
pub const OTHER: &str = "Övrigt";

/// Known types plus templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementCatalog {
    #[serde(default = "builtin_types")]
    pub types: Vec<MeasurementType>,
    #[serde(default = "builtin_templates")]
    pub templates: Vec<MeasurementTemplate>,
}

impl Default for MeasurementCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MeasurementCatalog {
    /// Built-in catalog
    pub fn builtin() -> Self {
        Self {
            types: builtin_types(),
            templates: builtin_templates(),
        }
    }

    /// Read from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Read from a JSON string; missing sections fall back to the built-ins
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// Replace the types with a list supplied by the page
    pub fn with_types_json(mut self, json: &str) -> Result<Self> {
        self.types = serde_json::from_str(json)?;
        Ok(self)
    }

    /// Replace the templates with a list supplied by the page
    pub fn with_templates_json(mut self, json: &str) -> Result<Self> {
        self.templates = serde_json::from_str(json)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }

    /// Canonical unit of a known type
    pub fn unit_for(&self, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.unit.as_str())
    }

    pub fn template(&self, name: &str) -> Option<&MeasurementTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Like [`template`](Self::template) but an unknown name is an error
    pub fn require_template(&self, name: &str) -> Result<&MeasurementTemplate> {
        self.template(name)
            .ok_or_else(|| Error::TemplateNotFound(name.to_string()))
    }

    /// Options for the type selector, `OTHER` last
    pub fn selector_options(&self) -> Vec<String> {
        self.types
            .iter()
            .map(|t| t.name.clone())
            .chain(std::iter::once(OTHER.to_string()))
            .collect()
    }
}

fn builtin_types() -> Vec<MeasurementType> {
    [
        ("Bladlängd", "mm"),
        ("Bladbredd", "mm"),
        ("Skaftlängd", "mm"),
        ("Skaftbredd", "mm"),
        ("Total längd", "mm"),
        ("Vikt", "gram"),
        ("Bladvikt", "gram"),
        ("Skaftvikt", "gram"),
        ("Handtag", "mm"),
        ("Bladtjocklek", "mm"),
        ("Öga", "mm"),
    ]
    .iter()
    .map(|(name, unit)| MeasurementType::new(name, unit))
    .collect()
}

fn builtin_templates() -> Vec<MeasurementTemplate> {
    let types = builtin_types();
    let pick = |names: &[&str]| -> Vec<MeasurementType> {
        names
            .iter()
            .filter_map(|n| types.iter().find(|t| t.name == *n).cloned())
            .collect()
    };

    vec![
        MeasurementTemplate {
            name: "Standard yxa".into(),
            measurements: pick(&["Bladlängd", "Bladbredd", "Skaftlängd", "Total längd", "Vikt"]),
        },
        MeasurementTemplate {
            name: "Fällkniv".into(),
            measurements: pick(&["Bladlängd", "Bladbredd", "Handtag", "Vikt"]),
        },
        MeasurementTemplate {
            name: "Köksyxa".into(),
            measurements: pick(&["Bladlängd", "Bladbredd", "Skaftlängd", "Vikt"]),
        },
        MeasurementTemplate {
            name: "Detaljerad yxa".into(),
            measurements: pick(&[
                "Bladlängd",
                "Bladbredd",
                "Bladtjocklek",
                "Skaftlängd",
                "Skaftbredd",
                "Total längd",
                "Vikt",
                "Bladvikt",
                "Skaftvikt",
                "Öga",
            ]),
        },
    ]
}
