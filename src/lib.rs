//! appsweep library crate
//!
//! Installed-software browser with multi-select batch delete. The binary is a
//! thin wrapper around [`cli::Cli`]; everything else is usable as a library.

pub mod catalog;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod debug_log;
pub mod error;
pub mod icons;
pub mod input;
pub mod inventory;
pub mod menu;
pub mod model;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod sort;
pub mod task;
pub mod tui;
pub mod viewport;
