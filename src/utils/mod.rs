pub mod cash;
pub mod date_utils;
pub mod overtime;
pub mod tafqit;
