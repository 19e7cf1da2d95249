//! Axe Catalog Common Library
//!
//! Model and logic shared by the browser front end (WASM) and the CLI

pub mod types;
pub mod error;
pub mod catalog;
pub mod measurement;
pub mod edit;
pub mod batch;
pub mod reply;
pub mod search;
pub mod highlight;
pub mod crop;
pub mod notify;
pub mod timing;
pub mod submit;

pub use types::{MatchType, MeasurementRecord, MeasurementTemplate, MeasurementType, SearchResponse, StampResult};
pub use error::{Error, Result};
pub use catalog::{MeasurementCatalog, OTHER};
pub use measurement::{MeasurementDraft, MeasurementInput};
pub use edit::{EditSession, MeasurementRow, MeasurementTable, RowMode};
pub use batch::{BatchField, BatchForm, BatchRow};
pub use reply::ServerReply;
pub use search::{group_results, status_badge_class, Bucket, CombineMode, MatchMode, ResultGroup, SearchQuery};
pub use highlight::{escape_html, highlight};
pub use crop::{CropSpec, PixelRect, JPEG_QUALITY};
pub use notify::{Notification, NotificationKind};
pub use timing::{Debouncer, RequestSequencer};
pub use submit::SubmitOutcome;
