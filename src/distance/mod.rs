//! Distance matrix between the depot and the platforms.
//!
//! Provides a dense, symmetric distance matrix with the depot at index 0.

mod matrix;

pub use matrix::DistanceMatrix;
