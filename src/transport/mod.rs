/// Local filesystem document listing and reading.
pub mod fs;
