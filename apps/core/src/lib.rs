//! Bias Lens client core.
//!
//! Drives one text analysis at a time against a remote bias-analysis service and
//! renders the returned result.

pub mod actors;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod models;
pub mod render;
pub mod samples;

#[cfg(test)]
mod tests;
