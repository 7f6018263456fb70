mod aggregation;
pub mod pdf;

pub use aggregation::*;
