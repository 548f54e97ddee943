//! Integration tests for the chronicle CLI
//!
//! These run the binary against temporary stores. No summarizer endpoint is
//! configured, so every test runs offline.

mod cli;
mod support;
