//! Driver layer for browser automation.
//!
//! This crate wraps a `fantoccini` WebDriver session so the rest of the
//! workspace can load one page, let it settle and read its HTML without
//! touching WebDriver types directly.
//!
//! - [`browser::driver::GatherDriver`]: WebDriver session wrapper
//! - [`browser::page::GatherPage`]: navigation, settle wait and page source
//! - [`browser::options`]: Chrome arguments and capabilities from config
pub mod browser;
