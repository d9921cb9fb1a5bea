pub mod adapters;
pub mod types;
