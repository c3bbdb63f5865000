//! Core domain + application logic for the registration bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! messaging port (trait) implemented in the adapter crate.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod registry;
pub mod replies;
pub mod service;

pub use errors::{Error, Result};
