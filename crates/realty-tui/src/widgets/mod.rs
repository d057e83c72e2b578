//! Shared rendering helpers used across screens.

pub mod fmt;
pub mod sub_tabs;
