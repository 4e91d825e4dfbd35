pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod scraper;
pub mod service;
