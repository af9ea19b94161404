pub mod depositions;
pub mod records;
