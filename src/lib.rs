// src/lib.rs

// Public modules (the lumen driver API)
pub mod cli;
pub mod commands;
pub mod errors;
