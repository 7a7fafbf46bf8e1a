//! Vidstore Core Library
//!
//! Configuration and logging for the `vidstore` binary.

pub mod config;
pub mod colored_logger;
