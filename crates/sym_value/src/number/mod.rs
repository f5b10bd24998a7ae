//! Exact and precision-carrying number types behind the numeric variants.

mod rational;
mod real;

pub use rational::Rational;
pub use real::Real;
