//! Stub backend middleware.
//!
//! Execution order (outermost → innermost):
//! 1. Audit logger, on every route including unknown ones
//! 2. Auth validator, on protected routes only

pub mod audit;
pub mod auth;
