//! Main module for BrightScript lexing functionality

pub mod config;
pub mod highlight;
pub mod keywords;
pub mod lexing;
pub mod stream;
pub mod testing;
pub mod token;
