//! Career quiz: the fixed question catalog and the model-backed analysis.

pub mod analyzer;
pub mod catalog;
