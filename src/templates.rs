//! Measurement template listing

use crate::error::Result;
use axe_catalog_common::MeasurementCatalog;
use std::fmt::Write;
use std::path::Path;

pub fn load_catalog(file: Option<&Path>) -> Result<MeasurementCatalog> {
    match file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading catalog");
            Ok(MeasurementCatalog::from_file(path)?)
        }
        None => Ok(MeasurementCatalog::builtin()),
    }
}

pub fn render_templates(catalog: &MeasurementCatalog) -> String {
    let mut out = String::new();
    for template in &catalog.templates {
        let _ = writeln!(out, "{} ({} mått)", template.name, template.measurements.len());
        for m in &template.measurements {
            let _ = writeln!(out, "  - {} [{}]", m.name, m.unit);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_builtin() {
        let text = render_templates(&MeasurementCatalog::builtin());
        assert!(text.contains("Standard yxa (5 mått)"));
        assert!(text.contains("  - Vikt [gram]"));
    }
}
