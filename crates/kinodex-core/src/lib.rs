pub mod config;
pub mod error;
pub mod lookup;
pub mod mask;
pub mod provider;
pub mod query;
pub mod resolver;
pub mod score;
