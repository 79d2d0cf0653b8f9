//! Tree-walking evaluator for skibidi programs.

pub mod environment;
pub mod evaluator;
pub mod object;
