//! Vision model integration
//!
//! HTTP client for the OpenAI-compatible chat completions API used to
//! analyze meal photos.

pub mod client;

pub use client::{VisionClient, VisionError};
