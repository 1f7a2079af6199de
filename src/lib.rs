//! Library crate root re-exporting server, catalog, and agent modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod agent;
pub mod catalog;
pub mod cli;
pub mod server;
pub mod tools;
