//! Test utilities for Taleweaver narrative tests.
//!
//! This module provides mock collaborators and segment fixtures.

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_generator;
pub mod mock_speech;

#[allow(unused_imports)]
pub use fixtures::{ended_segment, running_segment, start_request};
#[allow(unused_imports)]
pub use mock_generator::{MockGenerator, MockResponse};
#[allow(unused_imports)]
pub use mock_speech::RecordingRenderer;
