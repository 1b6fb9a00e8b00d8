// BootDiff - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform, app, or touch the filesystem directly.

pub mod catalog;
pub mod deduce;
pub mod differ;
pub mod export;
pub mod html;
pub mod identity;
pub mod model;
pub mod window;
