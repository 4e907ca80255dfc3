//! Арифметика Hi-Lo: значение карты, running count, true count.

use crate::domain::card::{Card, Rank};
use crate::domain::shoe::CARDS_PER_DECK;

/// Нижняя граница оценки оставшихся колод (пол-колоды).
pub const MIN_DECKS_REMAINING: f64 = 0.5;

pub fn hi_lo_value(rank: Rank) -> i32 {
    rank.hi_lo() as i32
}

/// running' = running + Σ hi_lo(card).
pub fn apply_cards(running_count: i32, cards: &[Card]) -> i32 {
    running_count + cards.iter().map(|c| c.count_value as i32).sum::<i32>()
}

pub fn apply_card(running_count: i32, card: &Card) -> i32 {
    running_count + card.count_value as i32
}

/// Оценка оставшихся колод по числу карт в шузе, не меньше `MIN_DECKS_REMAINING`.
pub fn decks_remaining(cards_remaining: usize) -> f64 {
    (cards_remaining as f64 / CARDS_PER_DECK as f64).max(MIN_DECKS_REMAINING)
}

/// True count = running / decks_remaining, с отсечением к нулю.
/// Неположительный или нечисловой знаменатель заменяется на `MIN_DECKS_REMAINING`.
pub fn true_count(running_count: i32, decks_remaining: f64) -> i32 {
    let decks = if decks_remaining.is_finite() && decks_remaining > 0.0 {
        decks_remaining.max(MIN_DECKS_REMAINING)
    } else {
        MIN_DECKS_REMAINING
    };
    (running_count as f64 / decks).trunc() as i32
}
