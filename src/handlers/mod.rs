// src/handlers/mod.rs
pub mod assets;
pub mod error;
pub mod portfolio;
pub mod probe;
