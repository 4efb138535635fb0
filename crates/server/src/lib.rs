//! Score server - HTTP front end for the exam score prediction pipeline

pub mod api;
pub mod config;
