//! tourclean: Tourism Resource Inventory Cleaner
//!
//! A library for loading a raw tourism resource export of unknown encoding and
//! delimiter, normalizing its columns and text, imputing missing values,
//! removing duplicates, and deriving an id and a coordinate-presence flag.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
