//! Integration tests for the scraper
//!
//! These tests use wiremock to stand up a fake discussion site and run the
//! full pipeline against it over real HTTP.

mod common;
mod pipeline_tests;
