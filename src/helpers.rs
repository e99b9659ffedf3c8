pub mod converters;
pub mod xlsx;
