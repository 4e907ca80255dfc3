use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::count_check::PromptType;
use crate::domain::hand::{Decision, HandOutcome};

/// Кому ушла карта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardTarget {
    /// Рука игрока по индексу (после сплита их несколько).
    Player(usize),
    DealerUp,
    DealerHole,
    Dealer,
}

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SessionEventKind {
    /// Новая раздача началась.
    HandStarted { hand_number: u32 },

    /// Карта сдана. `counted` — попала ли она в running count сразу.
    CardDealt {
        to: CardTarget,
        card: Card,
        counted: bool,
    },

    /// Закрытая карта дилера вскрыта и учтена в счёте.
    HoleCardRevealed { card: Card, running_count: i32 },

    /// Шуз пересобран, счёт обнулён.
    Reshuffled,

    /// Действие игрока по руке.
    PlayerActed { hand_index: usize, action: Decision },

    /// Дилер добрал карту.
    DealerDrew { card: Card, total: u8 },

    /// Рука рассчитана.
    HandResolved {
        hand_index: usize,
        outcome: HandOutcome,
    },

    /// Открыт промпт на счёт.
    PromptOpened { prompt_type: PromptType },

    /// Ответ на промпт.
    PromptAnswered { is_correct: bool, delta: i32 },

    /// Промпт закрыт без ответа.
    PromptDismissed,
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionEvent {
    pub index: u32,
    pub kind: SessionEventKind,
}

/// Журнал текущей раздачи. Очищается при каждой новой раздаче.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionLog {
    pub events: Vec<SessionEvent>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: SessionEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(SessionEvent { index: idx, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn kinds(&self) -> impl Iterator<Item = &SessionEventKind> {
        self.events.iter().map(|e| &e.kind)
    }
}
