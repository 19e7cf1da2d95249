//! Outcome of an add-measurement submit
//!
//! Maps the server reply onto what the form does next: which notification
//! to show, whether the page reloads and whether the submit control comes
//! back.

use crate::error::{Error, Result};
use crate::notify::Notification;
use crate::reply::ServerReply;

pub const ADD_FAILED: &str = "Fel vid tillägg av mått";
pub const UNKNOWN_ERROR: &str = "Okänt fel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notification: Notification,
    pub reload: bool,
    /// Submit control enabled again
    pub re_enable: bool,
}

impl SubmitOutcome {
    /// From the parsed reply, or the transport/parse error that prevented one.
    /// `success_fallback` is shown when the server sent no message.
    pub fn from_reply(reply: Result<ServerReply>, success_fallback: &str) -> Self {
        match reply.and_then(|r| r.into_result(UNKNOWN_ERROR)) {
            Ok(message) => Self {
                notification: Notification::success(
                    message.unwrap_or_else(|| success_fallback.to_string()),
                ),
                reload: true,
                re_enable: false,
            },
            Err(e) => Self {
                notification: Notification::error(error_message(&e)),
                reload: false,
                re_enable: true,
            },
        }
    }
}

/// Server errors follow the generic prefix; anything else only gets the prefix
pub fn error_message(error: &Error) -> String {
    match error {
        Error::Server(message) => format!("{}: {}", ADD_FAILED, message),
        _ => ADD_FAILED.to_string(),
    }
}
