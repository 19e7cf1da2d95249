//! Axe catalog companion CLI library

pub mod cli;
pub mod config;
pub mod crop;
pub mod error;
pub mod search;
pub mod templates;
