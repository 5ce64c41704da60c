//! Testing infrastructure for newman-gate integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `assertions`: Custom assertions for CI output and JSON gate reports
//! - `fixtures`: Synthetic Newman CLI logs and JSON reports

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{NewmanLog, NewmanReportFixture};
pub use world::{CliResult, TestWorld};
