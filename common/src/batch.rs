//! Batch measurement form
//!
//! Rows are indexed by position, so the `measurements[i][field]` names stay
//! contiguous from zero after any removal. Each row also carries a key that
//! never changes, for keyed rendering.

use crate::catalog::MeasurementCatalog;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub key: u64,
    pub name: String,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchField {
    Name,
    Value,
    Unit,
}

impl BatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchField::Name => "name",
            BatchField::Value => "value",
            BatchField::Unit => "unit",
        }
    }
}

/// `measurements[3][unit]`
pub fn field_name(index: usize, field: BatchField) -> String {
    format!("measurements[{}][{}]", index, field.as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchForm {
    rows: Vec<BatchRow>,
    next_key: u64,
    template: Option<String>,
}

impl BatchForm {
    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the template the rows came from
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Current index of a row, by key
    pub fn index_of(&self, key: u64) -> Option<usize> {
        self.rows.iter().position(|r| r.key == key)
    }

    pub fn row(&self, key: u64) -> Option<&BatchRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Replace all rows with the entries of `template_name`.
    ///
    /// An unknown name leaves the form as it was.
    pub fn load_template(&mut self, catalog: &MeasurementCatalog, template_name: &str) -> Result<usize> {
        let template = catalog.require_template(template_name)?;
        self.rows.clear();
        for m in &template.measurements {
            let key = self.next_key;
            self.next_key += 1;
            self.rows.push(BatchRow {
                key,
                name: m.name.clone(),
                value: String::new(),
                unit: m.unit.clone(),
            });
        }
        self.template = Some(template.name.clone());
        Ok(self.rows.len())
    }

    /// Remove the row at `index`; rows after it shift down by one.
    /// Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index < self.rows.len() {
            self.rows.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_value(&mut self, key: u64, value: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.value = value.to_string();
        }
    }

    pub fn set_unit(&mut self, key: u64, unit: &str) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.unit = unit.to_string();
        }
    }

    /// Form body, one triple per row in index order
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                [
                    (field_name(i, BatchField::Name), row.name.clone()),
                    (field_name(i, BatchField::Value), row.value.trim().to_string()),
                    (field_name(i, BatchField::Unit), row.unit.trim().to_string()),
                ]
            })
            .collect()
    }
}
