use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Решение игрока по руке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Hit => "hit",
            Decision::Stand => "stand",
            Decision::Double => "double",
            Decision::Split => "split",
            Decision::Surrender => "surrender",
        };
        write!(f, "{s}")
    }
}

/// Итог руки игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    Win,
    BlackjackWin,
    Loss,
    Push,
    Surrender,
}

impl HandOutcome {
    /// Выплата в ставках: блэкджек 3:2, сдача теряет половину.
    pub fn payout(self, bet: u32) -> f64 {
        let bet = bet as f64;
        match self {
            HandOutcome::Win => bet,
            HandOutcome::BlackjackWin => bet * 1.5,
            HandOutcome::Loss => -bet,
            HandOutcome::Push => 0.0,
            HandOutcome::Surrender => -bet / 2.0,
        }
    }
}

/// Рука игрока.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerHand {
    pub cards: Vec<Card>,
    /// Все действия по этой руке в порядке применения.
    pub actions: Vec<Decision>,
    pub is_split: bool,
    pub is_doubled: bool,
    pub bet: u32,
    /// Ставится ровно один раз при расчёте.
    pub outcome: Option<HandOutcome>,
    /// Рука доиграна (стенд, перебор, дабл, сдача, 21).
    pub finished: bool,
}

impl PlayerHand {
    pub fn new(bet: u32) -> Self {
        Self {
            bet,
            ..Self::default()
        }
    }

    pub fn is_surrendered(&self) -> bool {
        self.actions.last() == Some(&Decision::Surrender)
    }
}

/// Рука дилера. Вторая карта (hole) закрыта до вскрытия.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DealerHand {
    pub cards: Vec<Card>,
    pub hole_card_revealed: bool,
    /// Закрытая карта вышла из шуза, который уже пересобран:
    /// при вскрытии она не попадает в счёт нового шуза.
    #[serde(default)]
    pub hole_card_from_old_shoe: bool,
}

impl DealerHand {
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn hole_card(&self) -> Option<Card> {
        self.cards.get(1).copied()
    }

    /// Карты, которые видит игрок.
    pub fn visible_cards(&self) -> &[Card] {
        if self.hole_card_revealed || self.cards.len() < 2 {
            &self.cards
        } else {
            &self.cards[..1]
        }
    }
}
