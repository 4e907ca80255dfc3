use crate::domain::hand::Decision;
use crate::domain::rules::ConfigError;
use crate::domain::shoe::ShoeStateError;
use crate::engine::state_machine::SessionPhase;

use thiserror::Error;

/// Ошибки сессии.
///
/// `IllegalTransition`, `NoShoe`, `NoPromptOpen`, `NotAwaitingAction` —
/// нарушения инвариантов (оркестратор и UI рассинхронизированы).
/// Их пробрасывают наверх, а не повторяют.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Недопустимый переход {from} -> {to}")]
    IllegalTransition { from: SessionPhase, to: SessionPhase },

    #[error("Шуз не создан: сессия не запущена")]
    NoShoe,

    #[error("Нет открытого промпта")]
    NoPromptOpen,

    #[error("Сейчас не ход игрока (фаза {0})")]
    NotAwaitingAction(SessionPhase),

    #[error("Действие {0} недоступно для этой руки")]
    ActionNotAllowed(Decision),

    #[error("Нет активной руки")]
    NoActiveHand,

    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] ConfigError),

    #[error("Битый снапшот шуза: {0}")]
    ShoeState(#[from] ShoeStateError),

    #[error("В шузе {shoe} колод, а по правилам {rules}")]
    ShoeDecksMismatch { shoe: u8, rules: u8 },

    #[error("Сессию нельзя восстановить в фазе {phase} (пауза из {paused_from:?})")]
    UnrestorablePhase {
        phase: SessionPhase,
        paused_from: Option<SessionPhase>,
    },
}

impl SessionError {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SessionError::IllegalTransition { .. }
                | SessionError::NoShoe
                | SessionError::NoPromptOpen
                | SessionError::NotAwaitingAction(_)
        )
    }
}
