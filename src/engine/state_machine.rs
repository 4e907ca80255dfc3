//! Конечный автомат фаз сессии.
//!
//! Таблица переходов закрыта: всё, чего нет в списке, запрещено,
//! включая переходы в то же состояние.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::errors::SessionError;

/// Фаза сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Ready,
    Dealing,
    AwaitingPlayerAction,
    DealerTurn,
    HandResolved,
    CountPromptOpen,
    Paused,
    Completed,
}

impl SessionPhase {
    pub const ALL: [SessionPhase; 9] = [
        SessionPhase::Idle,
        SessionPhase::Ready,
        SessionPhase::Dealing,
        SessionPhase::AwaitingPlayerAction,
        SessionPhase::DealerTurn,
        SessionPhase::HandResolved,
        SessionPhase::CountPromptOpen,
        SessionPhase::Paused,
        SessionPhase::Completed,
    ];

    /// Из этой фазы можно уйти на паузу (и на неё же вернуться).
    pub const fn is_pausable(self) -> bool {
        matches!(
            self,
            SessionPhase::AwaitingPlayerAction
                | SessionPhase::HandResolved
                | SessionPhase::CountPromptOpen
        )
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Список допустимых преемников для каждой фазы.
pub const fn successors(from: SessionPhase) -> &'static [SessionPhase] {
    use SessionPhase::*;
    match from {
        Idle => &[Ready],
        Ready => &[Dealing, Completed],
        Dealing => &[AwaitingPlayerAction, DealerTurn],
        AwaitingPlayerAction => &[DealerTurn, Paused, Completed],
        DealerTurn => &[HandResolved],
        HandResolved => &[Dealing, CountPromptOpen, Paused, Completed],
        CountPromptOpen => &[HandResolved, Paused, Completed],
        Paused => &[AwaitingPlayerAction, HandResolved, CountPromptOpen, Completed],
        Completed => &[Idle],
    }
}

pub fn can_transition(from: SessionPhase, to: SessionPhase) -> bool {
    successors(from).contains(&to)
}

/// Проверка перехода. Ошибка здесь — рассинхрон оркестратора и UI,
/// её нужно пробрасывать наверх, а не повторять.
pub fn assert_transition(from: SessionPhase, to: SessionPhase) -> Result<(), SessionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(SessionError::IllegalTransition { from, to })
    }
}
