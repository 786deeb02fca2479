//! Momentum indicators: RSI, Stochastic %K

pub mod rsi;
pub mod stochastic;

pub use rsi::*;
pub use stochastic::*;
