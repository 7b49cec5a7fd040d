//! HTTP route handlers

pub mod board;
pub mod room;
pub mod status;
