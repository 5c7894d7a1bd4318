pub mod handlers;
pub mod runner;
