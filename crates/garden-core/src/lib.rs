//! Garden Core - Foundational types for the sound garden content service
//!
//! This crate provides the types every other garden crate depends on:
//! - `ContentKind` - plant, rainbow, weather or aurora
//! - `Rgb`, `Hsb`, `Span` - colour and range values carried by validated specs
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GardenError, Result};
pub use types::{ContentKind, Hsb, Rgb, Span};
