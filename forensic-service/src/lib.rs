//! TRACE forensic engine.
//!
//! Relays base64 audio to a hosted Gemini model with a fixed anti-spoofing
//! prompt and serves the prebuilt frontend bundle.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
