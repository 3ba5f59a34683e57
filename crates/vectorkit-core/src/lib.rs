//! # VectorKit Core
//!
//! Foundational types for the VectorKit document model: geometry primitives,
//! non-destructive affine transforms, unit conversion, and the error taxonomy
//! shared by every layer above.
//!
//! Everything in this crate is pure and synchronous. The document model in
//! `vectorkit-document` builds on these primitives; nothing here knows about
//! items, commands, or rendering.

pub mod error;
pub mod geometry;
pub mod transform;
pub mod units;

pub use error::{Error, Result};
pub use geometry::{rotate_point, union_all, Point, Rect};
pub use transform::{scale_for_resize, Transform};
pub use units::{convert, Unit};
