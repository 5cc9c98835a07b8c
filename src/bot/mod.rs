pub mod handler;
pub mod start;
