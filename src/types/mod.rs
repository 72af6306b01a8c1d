pub mod dataset;
pub mod display;
