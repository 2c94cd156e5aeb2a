// src/lib.rs

pub mod animation;
pub mod config;
pub mod models;
pub mod render;
