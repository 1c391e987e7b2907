//! Adapter implementations for the pipeline repository port.

pub mod memory;
pub mod postgres;
