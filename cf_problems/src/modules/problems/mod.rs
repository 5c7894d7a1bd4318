pub mod crawler;
pub mod repository;
