pub mod builder;
pub mod config;
pub mod dump;
pub mod error;
pub mod msg;
pub mod source;
