//! Foundation module - Core utilities and types
//!
//! - Math types shared by layout and rendering
//! - Logging utilities

pub mod logging;
pub mod math;
