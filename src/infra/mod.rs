//! Инфраструктурный слой вокруг движка тренажёра:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - абстракция хранения (снапшоты и история).

pub mod ids;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
pub use rng_seed::RngSeed;
