//! Per-tab layouts.

pub mod board;
