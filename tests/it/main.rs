//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - helpers: editor builder and event recorder shared by every test
//! - integration: multi-component pointer workflows
//! - unit: single-component tests against the public API

mod helpers;
mod integration;
mod unit;
