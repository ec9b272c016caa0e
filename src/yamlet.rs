//! Main module for yamlet library functionality

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod testing;
