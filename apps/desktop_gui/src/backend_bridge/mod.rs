//! Bridge between the egui thread and the async document controller.

pub mod commands;
pub mod runtime;
