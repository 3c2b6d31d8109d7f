pub mod client;
pub mod commands;
pub mod output;

pub use client::AeoClient;
