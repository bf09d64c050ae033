pub mod actors;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod models;
pub mod report;
pub mod storage;
pub mod types;
