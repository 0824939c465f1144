//! Core types shared by the engine and the CLI

pub mod file_reader;
pub mod filter;
pub mod model;
pub mod paths;
