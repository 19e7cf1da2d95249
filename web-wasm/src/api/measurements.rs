//! Measurement endpoints

use axe_catalog_common::{MeasurementDraft, Result, ServerReply};

use super::client::post_form;

pub const UPDATE_FAILED: &str = "Fel vid uppdatering av mått";
pub const DELETE_FAILED: &str = "Fel vid borttagning av mått";

pub fn update_url(axe_id: u32, measurement_id: u32) -> String {
    format!("/yxor/{}/matt/{}/update/", axe_id, measurement_id)
}

pub fn delete_url(axe_id: u32, measurement_id: u32) -> String {
    format!("/yxor/{}/matt/{}/", axe_id, measurement_id)
}

pub fn default_batch_action(axe_id: u32) -> String {
    format!("/yxor/{}/matt/mall/", axe_id)
}

pub fn default_single_action(axe_id: u32) -> String {
    format!("/yxor/{}/matt/", axe_id)
}

pub async fn update_measurement(
    axe_id: u32,
    csrf_token: &str,
    measurement_id: u32,
    draft: &MeasurementDraft,
) -> Result<()> {
    post_form(&update_url(axe_id, measurement_id), csrf_token, &draft.form_fields())
        .await?
        .into_result(UPDATE_FAILED)
        .map(|_| ())
}

/// Delete is only treated as done on an explicit `success: true`
pub async fn delete_measurement(axe_id: u32, csrf_token: &str, measurement_id: u32) -> Result<()> {
    post_form(&delete_url(axe_id, measurement_id), csrf_token, &[])
        .await?
        .into_result(DELETE_FAILED)
        .map(|_| ())
}

/// Batch or single add form; the reply is read by `SubmitOutcome`
pub async fn submit_measurements(
    action: &str,
    csrf_token: &str,
    fields: &[(String, String)],
) -> Result<ServerReply> {
    post_form(action, csrf_token, fields).await
}
