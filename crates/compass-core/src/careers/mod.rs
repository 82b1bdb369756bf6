//! Static career browser.

pub mod catalog;
