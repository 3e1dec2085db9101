// src/lib.rs

//! Letterboxd list scraper library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;
