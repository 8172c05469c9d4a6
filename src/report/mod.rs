pub mod aggregator;
pub mod dashboard;
pub mod grid;
pub mod insights;
pub mod monthly;
pub mod notes;
pub mod stats;
