pub mod analyzer;
pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod rpc;
pub mod summarize;
