//! Server API

pub mod client;
pub mod measurements;
pub mod stamps;
