//! Отклонения от базовой стратегии по true count (Illustrious 18 + Fab 4).
//!
//! Таблица просматривается сверху вниз, срабатывает первая подходящая
//! строка. Fab 4 стоит раньше: при разрешённой сдаче она приоритетнее
//! стенда на той же руке. Страховка не моделируется, её строки нет.

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Decision;
use crate::domain::rules::RuleConfig;
use crate::engine::hand_rules::{can_double, can_split, can_surrender, hand_total, is_pair, is_soft};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Comparison {
    /// Срабатывает при TC ≥ порога.
    Gte,
    /// Срабатывает при TC ≤ порога.
    Lte,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviationGroup {
    Illustrious18,
    Fab4,
}

/// Строка таблицы отклонений. Статические данные.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Deviation {
    pub player_total: u8,
    pub is_soft_hand: bool,
    pub is_pair: bool,
    /// Достоинство открытой карты дилера: 2..=10, туз = 11.
    pub dealer_up_value: u8,
    pub basic_action: Decision,
    pub deviation_action: Decision,
    pub tc_threshold: i32,
    pub comparison: Comparison,
    pub group: DeviationGroup,
}

impl Deviation {
    pub fn fires_at(&self, true_count: i32) -> bool {
        match self.comparison {
            Comparison::Gte => true_count >= self.tc_threshold,
            Comparison::Lte => true_count <= self.tc_threshold,
        }
    }
}

const fn row(
    player_total: u8,
    is_pair: bool,
    dealer_up_value: u8,
    basic_action: Decision,
    deviation_action: Decision,
    tc_threshold: i32,
    comparison: Comparison,
    group: DeviationGroup,
) -> Deviation {
    Deviation {
        player_total,
        is_soft_hand: false,
        is_pair,
        dealer_up_value,
        basic_action,
        deviation_action,
        tc_threshold,
        comparison,
        group,
    }
}

use Comparison::{Gte, Lte};
use Decision::{Double, Hit, Split, Stand, Surrender};
use DeviationGroup::{Fab4, Illustrious18};

pub static DEVIATIONS: [Deviation; 21] = [
    // Fab 4
    row(14, false, 10, Hit, Surrender, 3, Gte, Fab4),
    row(15, false, 10, Hit, Surrender, 0, Gte, Fab4),
    row(15, false, 9, Hit, Surrender, 2, Gte, Fab4),
    row(15, false, 11, Hit, Surrender, 1, Gte, Fab4),
    // Illustrious 18
    row(16, false, 10, Hit, Stand, 0, Gte, Illustrious18),
    row(15, false, 10, Hit, Stand, 4, Gte, Illustrious18),
    row(20, true, 5, Stand, Split, 5, Gte, Illustrious18),
    row(20, true, 6, Stand, Split, 4, Gte, Illustrious18),
    row(10, false, 10, Hit, Double, 4, Gte, Illustrious18),
    row(12, false, 3, Hit, Stand, 2, Gte, Illustrious18),
    row(12, false, 2, Hit, Stand, 3, Gte, Illustrious18),
    row(11, false, 11, Hit, Double, 1, Gte, Illustrious18),
    row(9, false, 2, Hit, Double, 1, Gte, Illustrious18),
    row(10, false, 11, Hit, Double, 4, Gte, Illustrious18),
    row(9, false, 7, Hit, Double, 3, Gte, Illustrious18),
    row(16, false, 9, Hit, Stand, 5, Gte, Illustrious18),
    row(13, false, 2, Stand, Hit, -1, Lte, Illustrious18),
    row(12, false, 4, Stand, Hit, -1, Lte, Illustrious18),
    row(12, false, 5, Stand, Hit, -2, Lte, Illustrious18),
    row(12, false, 6, Stand, Hit, -1, Lte, Illustrious18),
    row(13, false, 3, Stand, Hit, -2, Lte, Illustrious18),
];

/// Строка применима к руке с учётом фактической допустимости действия.
fn gated(dev: &Deviation, cards: &[Card], rules: &RuleConfig, is_split_hand: bool) -> bool {
    match dev.deviation_action {
        Surrender => can_surrender(cards, is_split_hand, rules),
        Double => can_double(cards, false, is_split_hand, rules),
        Split => can_split(cards, is_split_hand),
        Hit | Stand => true,
    }
}

/// Найти отклонение для руки. `None` — играть по базовой стратегии.
pub fn find_deviation(
    cards: &[Card],
    dealer_up: &Card,
    true_count: i32,
    rules: &RuleConfig,
    is_split_hand: bool,
) -> Option<&'static Deviation> {
    let total = hand_total(cards);
    let soft = is_soft(cards);
    let pair = is_pair(cards);
    let up = dealer_up.value();

    DEVIATIONS.iter().find(|dev| {
        dev.player_total == total
            && dev.is_soft_hand == soft
            && dev.is_pair == pair
            && dev.dealer_up_value == up
            && gated(dev, cards, rules, is_split_hand)
            && dev.fires_at(true_count)
    })
}
