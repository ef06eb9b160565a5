pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
