// src/commands/mod.rs
pub mod common;
pub mod dump;
pub mod is_same;
pub mod resolve;
pub mod shorthand;
pub mod version;
