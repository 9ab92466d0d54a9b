//! Interpolation model for animatable values
//!
//! A value is interpolatable when it can be flattened into a fixed-length list
//! of independent real components and rebuilt from that same list. Linear
//! interpolation and distance are then defined once, component-wise, for
//! every conforming type.
//!
//! Composite types concatenate the components of their parts in a fixed
//! order (see the docs on each geometry type), and rebuild from the same
//! order.

use smallvec::SmallVec;

use crate::geometry::{Alpha, Color, Point, Rect, Size};

/// Flattened real components of an interpolatable value
pub type Components = SmallVec<[f64; 4]>;

/// A value that can be linearly interpolated and measured
pub trait Interpolatable: Sized {
    /// Flatten this value into its real components
    fn vectorize(&self) -> Components;

    /// Rebuild a value from components produced by [`vectorize`](Self::vectorize)
    ///
    /// Missing trailing components read as `0.0`.
    fn normalize(components: &[f64]) -> Self;

    /// Interpolate towards `target` by `t` (0.0 = self, 1.0 = target)
    fn lerp(&self, target: &Self, t: f64) -> Self {
        // (1-t)a + tb keeps both endpoints exact, unlike a + t(b-a)
        let output: Components = self
            .vectorize()
            .iter()
            .zip(target.vectorize().iter())
            .map(|(from, to)| (1.0 - t) * from + t * to)
            .collect();

        Self::normalize(&output)
    }

    /// Euclidean distance to `target` over the vectorized components
    fn interval(&self, target: &Self) -> f64 {
        self.vectorize()
            .iter()
            .zip(target.vectorize().iter())
            .map(|(from, to)| (to - from).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

#[inline]
fn component(components: &[f64], index: usize) -> f64 {
    components.get(index).copied().unwrap_or(0.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Numeric types
// ─────────────────────────────────────────────────────────────────────────────

impl Interpolatable for f64 {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![*self]
    }

    fn normalize(components: &[f64]) -> Self {
        component(components, 0)
    }
}

impl Interpolatable for f32 {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![*self as f64]
    }

    fn normalize(components: &[f64]) -> Self {
        component(components, 0) as f32
    }
}

/// Integers round to the nearest value on rebuild (saturating at the type bounds)
macro_rules! impl_interpolatable_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Interpolatable for $ty {
                fn vectorize(&self) -> Components {
                    smallvec::smallvec![*self as f64]
                }

                fn normalize(components: &[f64]) -> Self {
                    component(components, 0).round() as $ty
                }
            }
        )*
    };
}

impl_interpolatable_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<const N: usize> Interpolatable for [f64; N] {
    fn vectorize(&self) -> Components {
        self.iter().copied().collect()
    }

    fn normalize(components: &[f64]) -> Self {
        std::array::from_fn(|i| component(components, i))
    }
}

impl<const N: usize> Interpolatable for [f32; N] {
    fn vectorize(&self) -> Components {
        self.iter().map(|&c| c as f64).collect()
    }

    fn normalize(components: &[f64]) -> Self {
        std::array::from_fn(|i| component(components, i) as f32)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry types
// ─────────────────────────────────────────────────────────────────────────────

impl Interpolatable for Point {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![self.x as f64, self.y as f64]
    }

    fn normalize(components: &[f64]) -> Self {
        Point::new(
            component(components, 0) as f32,
            component(components, 1) as f32,
        )
    }
}

impl Interpolatable for Size {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![self.width as f64, self.height as f64]
    }

    fn normalize(components: &[f64]) -> Self {
        Size::new(
            component(components, 0) as f32,
            component(components, 1) as f32,
        )
    }
}

impl Interpolatable for Rect {
    fn vectorize(&self) -> Components {
        let mut components = self.origin.vectorize();
        components.extend(self.size.vectorize());
        components
    }

    fn normalize(components: &[f64]) -> Self {
        let (origin, size) = components.split_at(components.len().min(2));
        Rect::from_origin_size(Point::normalize(origin), Size::normalize(size))
    }
}

impl Interpolatable for Color {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![self.r as f64, self.g as f64, self.b as f64, self.a as f64]
    }

    fn normalize(components: &[f64]) -> Self {
        Color::rgba(
            component(components, 0) as f32,
            component(components, 1) as f32,
            component(components, 2) as f32,
            component(components, 3) as f32,
        )
    }
}

impl Interpolatable for Alpha {
    fn vectorize(&self) -> Components {
        smallvec::smallvec![self.value() as f64]
    }

    fn normalize(components: &[f64]) -> Self {
        Alpha::new(component(components, 0) as f32)
    }
}
