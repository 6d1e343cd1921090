// src/math/algorithms/smoothing/mod.rs

pub mod chaikin; // Chaikin-Algorithmus (Corner Cutting)
pub mod traits; // Enthält den Smoothing-Trait

pub use self::chaikin::{ChaikinSmoother, smooth};
pub use self::traits::Smoothing;
