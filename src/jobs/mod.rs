pub mod populate_sample_data;

pub use populate_sample_data::{run_populate_sample_data, PopulateSummary, POPULATE_SEED};
