//! RngSeed — доменный seed для RNG тренажёра.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || session_index || shoe_index)
//!   - создавать DeterministicRng из seed
//!
//! Нужен для воспроизводимых симуляций: одна базовая точка даёт
//! независимые потоки для каждой сессии.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов и CLI).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с контекстом сессии.
    pub fn derive(&self, session_index: u64, shoe_index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"BJ_TRAINER_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(session_index.to_le_bytes());
        hasher.update(shoe_index.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize()[..32]);
        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
