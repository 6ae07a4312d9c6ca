/// Shared modules for the Stock Sentiment Dashboard
pub mod calc;
pub mod config;
pub mod controller;
pub mod entropy;
pub mod error;
pub mod figure;
pub mod scheduler;
pub mod surface;
pub mod types;
pub mod view;
pub mod widget;
