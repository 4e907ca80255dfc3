//! Движок тренажёра: счёт, правила рук, стратегия, автомат фаз,
//! планировщик промптов и оркестратор сессии.
//!
//! Высокоуровневый объект: `TrainingSession`
//! Основные операции:
//!   - `start` / `deal_hand` – запуск сессии и новая раздача
//!   - `hit` / `stand` / `double` / `split` / `surrender` – действия игрока
//!   - `submit_count` / `dismiss_prompt` – ответ на промпт
//!   - `pause` / `resume` / `end_session` – жизненный цикл

pub mod counting;
pub mod deviations;
pub mod errors;
pub mod hand_rules;
pub mod scheduler;
pub mod session;
pub mod session_log;
pub mod state_machine;
pub mod stats;
pub mod strategy;

pub use deviations::{find_deviation, Deviation, DEVIATIONS};
pub use errors::SessionError;
pub use scheduler::{CadenceTier, PromptScheduler, SchedulerState};
pub use session::{Advice, TrainingSession};
pub use session_log::{CardTarget, SessionEvent, SessionEventKind, SessionLog};
pub use state_machine::{assert_transition, can_transition, SessionPhase};
pub use strategy::basic_action;

/// RNG интерфейс для движка.
/// Реализации лежат в infra (обёртки над `rand`), тесты подсовывают свои.
pub trait RandomSource {
    /// Равномерное число в [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Fisher–Yates поверх `next_f64`.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = ((self.next_f64() * (i + 1) as f64) as usize).min(i);
            slice.swap(i, j);
        }
    }
}
