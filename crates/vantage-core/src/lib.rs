//! Vantage Core - Core types and utilities for the vantage viewer
//!
//! This crate provides the foundational types used throughout the viewer:
//! - Mathematical primitives (re-exported from glam)
//! - Transform and color types for scene nodes
//! - Axis-aligned bounding volumes
//! - Frame timing and one-shot timers

pub mod bounds;
pub mod time;
pub mod types;

pub use bounds::BoundingVolume;
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use time::{FrameTime, TimeConfig, Timer};
pub use types::{Color, Transform};
