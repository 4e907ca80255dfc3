use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

pub const CARDS_PER_DECK: usize = 52;

/// Снапшот шуза не сходится с его составом.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShoeStateError {
    #[error("В снапшоте шуза {0} колод")]
    InvalidDecks(u8),

    #[error("В снапшоте шуза {cards} карт при ёмкости {capacity}")]
    TooManyCards { cards: usize, capacity: usize },
}

/// Сериализуемое состояние шуза. Восстановление сохраняет порядок карт.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShoeState {
    pub cards: Vec<Card>,
    pub deck_count: u8,
    pub penetration: f64,
}

/// Шуз из N колод. Карты берутся с конца вектора.
///
/// Пустой шуз при `draw` молча пересобирается и перемешивается:
/// раздача никогда не останавливается из-за нехватки карт.
#[derive(Clone, Debug, PartialEq)]
pub struct Shoe {
    cards: Vec<Card>,
    deck_count: u8,
    penetration: f64,
    total_cards: usize,
    cut_position: usize,
}

impl Shoe {
    /// Собрать полный шуз и перемешать.
    /// `deck_count` < 1 трактуется как 1, пенетрация зажимается в (0, 1].
    pub fn new<R: RandomSource>(deck_count: u8, penetration: f64, rng: &mut R) -> Self {
        let mut shoe = Self::unshuffled(deck_count, penetration);
        rng.shuffle(&mut shoe.cards);
        shoe
    }

    /// Шуз в каноническом порядке (для тестов и проверок состава).
    pub fn unshuffled(deck_count: u8, penetration: f64) -> Self {
        let deck_count = deck_count.max(1);
        let penetration = clamp_penetration(penetration);
        let total_cards = deck_count as usize * CARDS_PER_DECK;
        Self {
            cards: build_cards(deck_count),
            deck_count,
            penetration,
            total_cards,
            cut_position: cut_position(total_cards, penetration),
        }
    }

    /// Взять верхнюю карту. Пустой шуз пересобирается перед взятием.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.reshuffle(rng);
        }
    }

    /// Полная пересборка всех колод + перемешивание.
    pub fn reshuffle<R: RandomSource>(&mut self, rng: &mut R) {
        self.cards = build_cards(self.deck_count);
        rng.shuffle(&mut self.cards);
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards_dealt(&self) -> usize {
        self.total_cards.saturating_sub(self.cards.len())
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn deck_count(&self) -> u8 {
        self.deck_count
    }

    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    pub fn cut_position(&self) -> usize {
        self.cut_position
    }

    /// Отрезная карта достигнута.
    pub fn needs_reshuffle(&self) -> bool {
        self.cards_dealt() >= self.cut_position
    }

    /// Оставшиеся карты в порядке хранения (последняя выйдет первой).
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn serialize(&self) -> ShoeState {
        ShoeState {
            cards: self.cards.clone(),
            deck_count: self.deck_count,
            penetration: self.penetration,
        }
    }

    /// Восстановить шуз из снапшота без перемешивания.
    pub fn from_state(state: ShoeState) -> Result<Self, ShoeStateError> {
        if state.deck_count == 0 {
            return Err(ShoeStateError::InvalidDecks(state.deck_count));
        }
        let total_cards = state.deck_count as usize * CARDS_PER_DECK;
        if state.cards.len() > total_cards {
            return Err(ShoeStateError::TooManyCards {
                cards: state.cards.len(),
                capacity: total_cards,
            });
        }
        let penetration = clamp_penetration(state.penetration);
        Ok(Self {
            cards: state.cards,
            deck_count: state.deck_count,
            penetration,
            total_cards,
            cut_position: cut_position(total_cards, penetration),
        })
    }
}

fn build_cards(deck_count: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(deck_count as usize * CARDS_PER_DECK);
    for _ in 0..deck_count {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards
}

fn clamp_penetration(p: f64) -> f64 {
    if p.is_nan() || p <= 0.0 {
        0.75
    } else {
        p.min(1.0)
    }
}

fn cut_position(total_cards: usize, penetration: f64) -> usize {
    (total_cards as f64 * penetration).floor() as usize
}
