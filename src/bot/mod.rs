pub mod discord;
pub mod handler;
pub mod start;
