//! Post-processing of Variant Effect Predictor output for regenie results.
//!
//! [`vep`] loads raw VEP tables, [`select`] keeps one record per location,
//! [`rename`] rewrites variant identifiers and [`merge`] joins the result with
//! regenie association output.

pub mod cli;
pub mod data;
pub mod error;
pub mod io;
pub mod merge;
pub mod rename;
pub mod select;
pub mod vep;

pub use data::Data;
pub use error::{Error, Result};
pub use vep::{Extra, VepRecord};
