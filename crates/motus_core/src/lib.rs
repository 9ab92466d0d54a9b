//! Motus Core
//!
//! This crate provides the foundational primitives for the Motus animation
//! system:
//!
//! - **Geometry**: points, sizes, rects, colors and alpha values
//! - **Interpolation**: the `Interpolatable` model shared by every animated value
//!
//! # Example
//!
//! ```rust
//! use motus_core::{Interpolatable, Point};
//!
//! let from = Point::new(0.0, 0.0);
//! let to = Point::new(10.0, 20.0);
//!
//! assert_eq!(from.lerp(&to, 0.5), Point::new(5.0, 10.0));
//! assert!((from.interval(&to) - 500f64.sqrt()).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod interpolate;

pub use geometry::{Alpha, Color, Point, Rect, Size};
pub use interpolate::{Components, Interpolatable};
