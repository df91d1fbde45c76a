pub mod default;
pub mod log;
pub mod result;
pub mod upload;
