//! Document parsing utilities
//!
//! This module contains the functions that reduce docx-rs elements to the
//! plain data kept in [`super::models`].

pub(crate) mod styles;
pub(crate) mod table;
pub(crate) mod text;
