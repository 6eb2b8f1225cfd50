pub mod analyzer;
pub mod booking;
pub mod cli;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod upload;
