//! Test Module
//!
//! Cross-module suites for mindmap-core.
//!
//! ## Test Categories
//! - `pipeline_tests`: whole-text behavior of the lexical pipeline
//! - `remote_tests`: HTTP completion client and remote generator
//! - `history_tests`: history file persistence and eviction

pub mod pipeline_tests;
pub mod remote_tests;
