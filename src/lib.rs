pub mod actors;
pub mod chess;
pub mod cli;
pub mod config;
pub mod content;
pub mod curator;
pub mod error;
pub mod github;
pub mod http;
pub mod models;
pub mod server;
pub mod types;
pub mod view;
