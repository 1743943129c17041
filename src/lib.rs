// src/lib.rs

//! Kwangwoon University calendar and notice board notifier.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
