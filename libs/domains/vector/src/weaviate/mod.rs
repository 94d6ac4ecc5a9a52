mod client;
mod config;

pub use client::WeaviateRepository;
pub use config::WeaviateConfig;
