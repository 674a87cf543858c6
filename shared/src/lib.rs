pub mod adapters;
pub mod core;
pub mod document;
pub mod utils;
