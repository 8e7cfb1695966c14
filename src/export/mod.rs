//! Export of accepted verification records.
//!
//! Results are written as a single JSON array, one object per hostname that
//! passed the triage filter.

mod json;

pub use json::{read_results, write_results, OutputRecord};
