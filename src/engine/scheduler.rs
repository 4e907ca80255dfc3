//! Адаптивный планировщик промптов на счёт.
//!
//! После каждой рассчитанной руки счётчик растёт; когда он достигает
//! порога — пора спросить счёт. Порог выбирается монеткой из диапазона
//! текущего режима каденса: `tight` = {2, 3}, `normal` = {4, 5}.

use serde::{Deserialize, Serialize};

use crate::engine::RandomSource;

/// Доля промахов, начиная с которой каденс ужесточается.
pub const TIGHT_MISS_RATE: f64 = 0.5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CadenceTier {
    Tight,
    #[default]
    Normal,
}

impl CadenceTier {
    /// Диапазон порога (нижняя, верхняя граница).
    pub const fn range(self) -> (u32, u32) {
        match self {
            CadenceTier::Tight => (2, 3),
            CadenceTier::Normal => (4, 5),
        }
    }
}

/// Сериализуемое состояние планировщика.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulerState {
    pub hands_since_prompt: u32,
    pub next_threshold: u32,
    pub cadence_tier: CadenceTier,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptScheduler {
    hands_since_prompt: u32,
    next_threshold: u32,
    cadence_tier: CadenceTier,
}

impl PromptScheduler {
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        let cadence_tier = CadenceTier::Normal;
        Self {
            hands_since_prompt: 0,
            next_threshold: roll_threshold(cadence_tier, rng),
            cadence_tier,
        }
    }

    /// Рука рассчитана. `true` — пора открыть промпт.
    pub fn on_hand_resolved(&mut self) -> bool {
        self.hands_since_prompt += 1;
        self.hands_since_prompt >= self.next_threshold
    }

    /// Ответ на промпт принят (или промпт закрыт): сброс и новый порог.
    pub fn on_prompt_submitted<R: RandomSource>(&mut self, rng: &mut R) {
        self.hands_since_prompt = 0;
        self.next_threshold = roll_threshold(self.cadence_tier, rng);
    }

    /// Подстроить каденс под недавнюю долю промахов.
    /// При смене режима порог сразу перевыбирается.
    pub fn adapt_cadence<R: RandomSource>(&mut self, recent_miss_rate: f64, rng: &mut R) {
        let tier = if recent_miss_rate >= TIGHT_MISS_RATE {
            CadenceTier::Tight
        } else {
            CadenceTier::Normal
        };
        if tier != self.cadence_tier {
            self.cadence_tier = tier;
            self.next_threshold = roll_threshold(tier, rng);
        }
    }

    pub fn hands_since_prompt(&self) -> u32 {
        self.hands_since_prompt
    }

    pub fn next_threshold(&self) -> u32 {
        self.next_threshold
    }

    pub fn cadence_tier(&self) -> CadenceTier {
        self.cadence_tier
    }

    pub fn serialize(&self) -> SchedulerState {
        SchedulerState {
            hands_since_prompt: self.hands_since_prompt,
            next_threshold: self.next_threshold,
            cadence_tier: self.cadence_tier,
        }
    }

    pub fn from_state(state: SchedulerState) -> Self {
        Self {
            hands_since_prompt: state.hands_since_prompt,
            next_threshold: state.next_threshold,
            cadence_tier: state.cadence_tier,
        }
    }
}

/// rng < 0.5 → нижняя граница, иначе верхняя.
fn roll_threshold<R: RandomSource>(tier: CadenceTier, rng: &mut R) -> u32 {
    let (low, high) = tier.range();
    if rng.next_f64() < 0.5 {
        low
    } else {
        high
    }
}
