//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for storage backends used by the features layer.

pub mod storage;
