//! HTTP route handlers

pub mod videos;

pub use videos::*;
