pub mod client;
pub mod error;
pub mod types;

pub use client::ImdbClient;
pub use error::ImdbError;
