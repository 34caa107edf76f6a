//! fileselect command line interface library
//!
//! Configuration loading and output rendering shared by the `fileselect`
//! binary and its tests.

pub mod config;
pub mod output;
