// Export all route modules
pub mod filters;
pub mod opportunities;
pub mod sample_data;
pub mod statistics;

// Re-export all route handlers for easy importing
pub use filters::*;
pub use opportunities::*;
pub use sample_data::*;
pub use statistics::*;
