//! Helper functions for rendering
//!
//! Date formatting and small HTML utilities shared by the generator
//! and the templates.

pub mod date;
pub mod html;
