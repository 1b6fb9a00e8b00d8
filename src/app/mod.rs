// BootDiff - app/mod.rs
//
// Application layer: input loading, catalog resolution, run orchestration
// and the report sink.
// Dependencies: core, platform, util.

pub mod catalog_mgr;
pub mod loader;
pub mod reporter;
pub mod triage;
