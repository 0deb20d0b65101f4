//! Internals of the bluedocs command line tool, exposed for integration
//! tests. The rendering API lives in `bluedocs-markdown`.
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
