pub mod client;
pub mod parse;
pub mod prompt;
pub mod protocol;

pub use client::GeminiClient;
