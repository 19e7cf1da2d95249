//! Inline row editing model
//!
//! Each measurement row is either viewed or edited. An edit keeps the values
//! captured when it started so cancel can put them back, and an
//! `is_updating` flag while the update request is in flight:
//!
//! ```text
//! Viewing --start_edit--> Editing --begin_confirm--> Saving
//!    ^                      |  ^                        |
//!    +------cancel_edit-----+  +-------fail_save--------+
//!    +-------------------complete_save------------------+
//! ```
//!
//! A delete request sets the row's `is_deleting` flag until it fails or the
//! row is removed.

use crate::catalog::MeasurementCatalog;
use crate::error::Result;
use crate::measurement::{MeasurementDraft, MeasurementInput};
use crate::types::MeasurementRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing,
    Saving,
}

/// Per-row edit state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub row_id: u32,
    pub original: MeasurementRecord,
    pub input: MeasurementInput,
    pub is_updating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRow {
    pub record: MeasurementRecord,
    pub session: Option<EditSession>,
    pub is_deleting: bool,
}

impl MeasurementRow {
    pub fn mode(&self) -> RowMode {
        match &self.session {
            None => RowMode::Viewing,
            Some(s) if s.is_updating => RowMode::Saving,
            Some(_) => RowMode::Editing,
        }
    }
}

/// Measurement rows of one axe, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|record| MeasurementRow {
                    record,
                    session: None,
                    is_deleting: false,
                })
                .collect(),
        }
    }

    pub fn ids(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&MeasurementRow> {
        self.rows.iter().find(|r| r.record.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut MeasurementRow> {
        self.rows.iter_mut().find(|r| r.record.id == id)
    }

    pub fn mode(&self, id: u32) -> Option<RowMode> {
        self.get(id).map(MeasurementRow::mode)
    }

    pub fn session(&self, id: u32) -> Option<&EditSession> {
        self.get(id).and_then(|r| r.session.as_ref())
    }

    /// Open an edit session. Returns false if the row is missing or already
    /// being edited.
    pub fn start_edit(&mut self, id: u32, catalog: &MeasurementCatalog) -> bool {
        let Some(row) = self.get_mut(id) else {
            return false;
        };
        if row.session.is_some() {
            return false;
        }
        row.session = Some(EditSession {
            row_id: id,
            original: row.record.clone(),
            input: MeasurementInput::from_record(&row.record, catalog),
            is_updating: false,
        });
        true
    }

    /// Change the editable fields. Ignored while the row is saving.
    pub fn update_input(&mut self, id: u32, f: impl FnOnce(&mut MeasurementInput)) -> bool {
        match self.get_mut(id).and_then(|r| r.session.as_mut()) {
            Some(session) if !session.is_updating => {
                f(&mut session.input);
                true
            }
            _ => false,
        }
    }

    /// Validate and mark the row as saving.
    ///
    /// `Ok(None)` means there is nothing to send: the row is not being
    /// edited, or an update is already in flight. A validation error leaves
    /// the session untouched.
    pub fn begin_confirm(&mut self, id: u32) -> Result<Option<MeasurementDraft>> {
        let Some(session) = self.get_mut(id).and_then(|r| r.session.as_mut()) else {
            return Ok(None);
        };
        if session.is_updating {
            return Ok(None);
        }
        let draft = session.input.validate()?;
        session.is_updating = true;
        Ok(Some(draft))
    }

    /// Server accepted the update: store the new values and leave edit mode
    pub fn complete_save(&mut self, id: u32, draft: MeasurementDraft) -> bool {
        let Some(row) = self.get_mut(id) else {
            return false;
        };
        row.record = draft.into_record(id);
        row.session = None;
        true
    }

    /// Update failed: stay in edit mode so the user can retry
    pub fn fail_save(&mut self, id: u32) {
        if let Some(session) = self.get_mut(id).and_then(|r| r.session.as_mut()) {
            session.is_updating = false;
        }
    }

    /// Discard edits and restore the values captured by `start_edit`
    pub fn cancel_edit(&mut self, id: u32) -> bool {
        let Some(row) = self.get_mut(id) else {
            return false;
        };
        match row.session.take() {
            Some(session) => {
                row.record = session.original;
                true
            }
            None => false,
        }
    }

    pub fn can_delete(&self, id: u32) -> bool {
        self.get(id)
            .is_some_and(|row| !row.is_deleting && row.mode() != RowMode::Saving)
    }

    /// Mark the row as being deleted. Returns false when a delete or save is
    /// already in flight, so only one request goes out.
    pub fn begin_delete(&mut self, id: u32) -> bool {
        if !self.can_delete(id) {
            return false;
        }
        match self.get_mut(id) {
            Some(row) => {
                row.is_deleting = true;
                true
            }
            None => false,
        }
    }

    /// Delete failed: the row stays and can be deleted again
    pub fn fail_delete(&mut self, id: u32) {
        if let Some(row) = self.get_mut(id) {
            row.is_deleting = false;
        }
    }

    pub fn is_deleting(&self, id: u32) -> bool {
        self.get(id).is_some_and(|row| row.is_deleting)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.record.id != id);
        self.rows.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OTHER;

    fn table() -> MeasurementTable {
        MeasurementTable::new(vec![
            MeasurementRecord {
                id: 7,
                name: "Vikt".into(),
                value: "1250".into(),
                unit: "gram".into(),
            },
            MeasurementRecord {
                id: 8,
                name: "Eggbredd".into(),
                value: "98".into(),
                unit: "mm".into(),
            },
        ])
    }

    #[test]
    fn test_start_then_cancel_restores_original() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        let before = t.get(7).cloned().unwrap();

        assert!(t.start_edit(7, &catalog));
        t.update_input(7, |i| {
            i.select_type(OTHER, &catalog);
            i.custom_name = "Något".into();
            i.value = "1".into();
        });
        assert!(t.cancel_edit(7));

        assert_eq!(t.get(7), Some(&before));
        assert_eq!(t.mode(7), Some(RowMode::Viewing));
    }

    #[test]
    fn test_single_session_per_row() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        assert!(t.start_edit(7, &catalog));
        t.update_input(7, |i| i.value = "1300".into());
        assert!(!t.start_edit(7, &catalog));
        assert_eq!(t.session(7).map(|s| s.input.value.as_str()), Some("1300"));
    }

    #[test]
    fn test_second_confirm_while_saving_is_noop() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);

        let first = t.begin_confirm(7).unwrap();
        let second = t.begin_confirm(7).unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(t.mode(7), Some(RowMode::Saving));
    }

    #[test]
    fn test_confirm_validation_failure_keeps_editing() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);
        t.update_input(7, |i| i.value.clear());

        assert!(t.begin_confirm(7).is_err());
        assert_eq!(t.mode(7), Some(RowMode::Editing));
    }

    #[test]
    fn test_complete_save_commits_values() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);
        t.update_input(7, |i| i.value = "1300".into());
        let draft = t.begin_confirm(7).unwrap().unwrap();

        assert!(t.complete_save(7, draft));
        let row = t.get(7).unwrap();
        assert_eq!(row.record.value, "1300");
        assert_eq!(row.mode(), RowMode::Viewing);
    }

    #[test]
    fn test_fail_save_stays_in_edit_mode() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);
        t.begin_confirm(7).unwrap();
        t.fail_save(7);

        assert_eq!(t.mode(7), Some(RowMode::Editing));
        assert!(t.begin_confirm(7).unwrap().is_some());
    }

    #[test]
    fn test_inputs_locked_while_saving() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);
        t.begin_confirm(7).unwrap();
        assert!(!t.update_input(7, |i| i.value = "9".into()));
    }

    #[test]
    fn test_cannot_delete_while_saving() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        assert!(t.can_delete(7));
        t.start_edit(7, &catalog);
        assert!(t.can_delete(7));
        t.begin_confirm(7).unwrap();
        assert!(!t.can_delete(7));
        assert!(!t.can_delete(99));
    }

    #[test]
    fn test_double_delete_sends_once() {
        let mut t = table();
        assert!(t.begin_delete(7));
        assert!(!t.begin_delete(7));
        assert!(!t.can_delete(7));
        assert!(t.is_deleting(7));
        assert!(t.can_delete(8));
    }

    #[test]
    fn test_fail_delete_allows_retry() {
        let mut t = table();
        assert!(t.begin_delete(7));
        t.fail_delete(7);
        assert!(!t.is_deleting(7));
        assert!(t.begin_delete(7));
        assert!(t.remove(7));
        assert!(!t.begin_delete(7));
    }

    #[test]
    fn test_no_delete_while_saving() {
        let catalog = MeasurementCatalog::builtin();
        let mut t = table();
        t.start_edit(7, &catalog);
        t.begin_confirm(7).unwrap();
        assert!(!t.begin_delete(7));
    }

    #[test]
    fn test_remove_updates_count() {
        let mut t = table();
        assert!(t.remove(7));
        assert_eq!(t.len(), 1);
        assert!(!t.remove(7));
        assert!(t.remove(8));
        assert!(t.is_empty());
    }

    #[test]
    fn test_confirm_without_session() {
        let mut t = table();
        assert!(t.begin_confirm(8).unwrap().is_none());
        assert!(t.begin_confirm(99).unwrap().is_none());
    }
}
