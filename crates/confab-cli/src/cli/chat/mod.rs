//! Interactive chat loop: input handling, slash commands, rendering.

pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
