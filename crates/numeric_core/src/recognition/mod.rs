//! Eigenface face recognition.
//!
//! Images are flattened into [`ColumnVector`](crate::math::linalg::ColumnVector)s
//! with [`ColumnVector::from_pixels`](crate::math::linalg::ColumnVector::from_pixels);
//! an [`EigenfaceModel`] is trained on a set of equal-size images and matches
//! new images against them by distance in eigenface space. Eigenfaces can be
//! viewed with [`ColumnVector::to_gray_pixels`](crate::math::linalg::ColumnVector::to_gray_pixels).
//! Image decoding is left to the caller.

mod eigenfaces;
mod pixels;

pub use eigenfaces::{EigenfaceConfig, EigenfaceModel, Match};
