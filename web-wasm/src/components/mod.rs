pub mod notification;
pub mod measurement_table;
pub mod batch_form;
pub mod measurement_form;
pub mod stamp_search;
