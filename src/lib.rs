//! This crate provides a seismic data server. It returns size-bounded, precision-limited,
//! null-aware subsets of well-log curves (LAS files) and seismic traces (SEG-Y files) for
//! downstream plotting, so that clients never need to transfer the raw files.
//!
//! Every read follows the same pipeline:
//!
//! * the requested file is looked up in a precomputed [catalog],
//! * a [reader] parses it into plain [types] values,
//! * a [sampling] policy bounds and decimates the values,
//! * the [format] module rounds each value to five significant digits, mapping nulls and NaN to
//!   JSON `null`,
//! * [curves] or [traces] assemble the response.
//!
//! The server is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs (de)serialisation of JSON request and response data.
//! * [Rayon](rayon) decimates traces in parallel.
//! * [ndarray] checks the shape of LAS data blocks.

pub mod app;
pub mod app_state;
pub mod catalog;
pub mod cli;
pub mod curves;
pub mod error;
pub mod format;
pub mod header;
pub mod metrics;
pub mod models;
pub mod reader;
pub mod readers;
pub mod resource_manager;
pub mod sampling;
pub mod server;
#[cfg(test)]
pub mod test_utils;
pub mod traces;
pub mod tracing;
pub mod types;
pub mod validated_json;
