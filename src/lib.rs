//! Client controllers for an expense-report application.
//!
//! An employee lists the bills they have sent and sends a new one by uploading a proof file and
//! then submitting the rest of the form. The controllers talk to the bills API through the `Store`
//! trait and to the screen through the `Surface` trait.

pub mod api;
pub mod args;
pub mod commands;
mod config;
pub mod controllers;
mod error;
pub mod format;
pub mod model;
pub mod routes;
pub mod session;
mod utils;
pub mod view;

#[cfg(test)]
mod test;

pub use api::Mode;
pub use config::Config;
pub use error::{Error, ErrorType, Res, Result};
