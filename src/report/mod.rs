//! Report module - cleaned outputs and the run summary

pub mod summary;
pub mod writer;

pub use summary::*;
pub use writer::*;
