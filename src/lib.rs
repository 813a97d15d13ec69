// src/lib.rs

pub mod core;
pub mod dataset;
pub mod error;
pub use crate::core::engine::KpiEngine;
