//! Базовая стратегия (многоколодный шуз).
//!
//! Каноническая таблица — H17 + DAS + поздняя сдача. Отличия для S17 и
//! для столов без DAS заданы небольшими картами исключений поверх неё,
//! поэтому таблицы не дублируются под каждое сочетание правил.
//!
//! Порядок поиска:
//!   1. пара, которую можно сплитить → таблица пар; если итог `Split` —
//!      возвращаем, иначе идём дальше;
//!   2. мягкая рука → таблица мягких сумм (13..=21);
//!   3. иначе → таблица жёстких сумм (5..=21).

use tracing::debug;

use crate::domain::card::Card;
use crate::domain::hand::Decision;
use crate::domain::rules::RuleConfig;
use crate::engine::hand_rules::{can_double, can_split, can_surrender, hand_total, is_soft};

/// Код ячейки таблицы. Условные коды раскрываются по фактической допустимости.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartCode {
    Hit,
    Stand,
    /// Дабл, иначе hit.
    DoubleOrHit,
    /// Дабл, иначе stand.
    DoubleOrStand,
    Split,
    SurrenderOrHit,
    SurrenderOrStand,
    SurrenderOrSplit,
}

/// Что реально можно сделать с рукой прямо сейчас.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eligibility {
    pub can_double: bool,
    pub can_surrender: bool,
    pub can_split: bool,
}

impl Eligibility {
    pub fn for_hand(cards: &[Card], is_split_hand: bool, rules: &RuleConfig) -> Self {
        Self {
            can_double: can_double(cards, false, is_split_hand, rules),
            can_surrender: can_surrender(cards, is_split_hand, rules),
            can_split: can_split(cards, is_split_hand),
        }
    }
}

/// Раскрыть код ячейки в конкретное действие.
pub fn resolve_code(code: ChartCode, elig: Eligibility) -> Decision {
    match code {
        ChartCode::Hit => Decision::Hit,
        ChartCode::Stand => Decision::Stand,
        ChartCode::DoubleOrHit if elig.can_double => Decision::Double,
        ChartCode::DoubleOrHit => Decision::Hit,
        ChartCode::DoubleOrStand if elig.can_double => Decision::Double,
        ChartCode::DoubleOrStand => Decision::Stand,
        ChartCode::Split if elig.can_split => Decision::Split,
        ChartCode::Split => Decision::Hit,
        ChartCode::SurrenderOrHit if elig.can_surrender => Decision::Surrender,
        ChartCode::SurrenderOrHit => Decision::Hit,
        ChartCode::SurrenderOrStand if elig.can_surrender => Decision::Surrender,
        ChartCode::SurrenderOrStand => Decision::Stand,
        ChartCode::SurrenderOrSplit if elig.can_surrender => Decision::Surrender,
        ChartCode::SurrenderOrSplit if elig.can_split => Decision::Split,
        ChartCode::SurrenderOrSplit => Decision::Hit,
    }
}

const H: ChartCode = ChartCode::Hit;
const S: ChartCode = ChartCode::Stand;
const D: ChartCode = ChartCode::DoubleOrHit;
const DS: ChartCode = ChartCode::DoubleOrStand;
const P: ChartCode = ChartCode::Split;
const RH: ChartCode = ChartCode::SurrenderOrHit;
const RS: ChartCode = ChartCode::SurrenderOrStand;
const RP: ChartCode = ChartCode::SurrenderOrSplit;

// Столбцы: дилер 2 3 4 5 6 7 8 9 T A.

/// Жёсткие суммы 5..=21, строка = total − 5.
const HARD: [[ChartCode; 10]; 17] = [
    [H, H, H, H, H, H, H, H, H, H],      // 5
    [H, H, H, H, H, H, H, H, H, H],      // 6
    [H, H, H, H, H, H, H, H, H, H],      // 7
    [H, H, H, H, H, H, H, H, H, H],      // 8
    [H, D, D, D, D, H, H, H, H, H],      // 9
    [D, D, D, D, D, D, D, D, H, H],      // 10
    [D, D, D, D, D, D, D, D, D, D],      // 11
    [H, H, S, S, S, H, H, H, H, H],      // 12
    [S, S, S, S, S, H, H, H, H, H],      // 13
    [S, S, S, S, S, H, H, H, H, H],      // 14
    [S, S, S, S, S, H, H, H, RH, RH],    // 15
    [S, S, S, S, S, H, H, RH, RH, RH],   // 16
    [S, S, S, S, S, S, S, S, S, RS],     // 17
    [S, S, S, S, S, S, S, S, S, S],      // 18
    [S, S, S, S, S, S, S, S, S, S],      // 19
    [S, S, S, S, S, S, S, S, S, S],      // 20
    [S, S, S, S, S, S, S, S, S, S],      // 21
];

/// Мягкие суммы 13..=21, строка = total − 13.
const SOFT: [[ChartCode; 10]; 9] = [
    [H, H, H, D, D, H, H, H, H, H],          // A2
    [H, H, H, D, D, H, H, H, H, H],          // A3
    [H, H, D, D, D, H, H, H, H, H],          // A4
    [H, H, D, D, D, H, H, H, H, H],          // A5
    [H, D, D, D, D, H, H, H, H, H],          // A6
    [DS, DS, DS, DS, DS, S, S, H, H, H],     // A7
    [S, S, S, S, DS, S, S, S, S, S],         // A8
    [S, S, S, S, S, S, S, S, S, S],          // A9
    [S, S, S, S, S, S, S, S, S, S],          // 21
];

/// Пары 2..=T, A; строка = индекс пары.
const PAIRS: [[ChartCode; 10]; 10] = [
    [P, P, P, P, P, P, H, H, H, H],      // 22
    [P, P, P, P, P, P, H, H, H, H],      // 33
    [H, H, H, P, P, H, H, H, H, H],      // 44
    [H, H, H, H, H, H, H, H, H, H],      // 55
    [P, P, P, P, P, H, H, H, H, H],      // 66
    [P, P, P, P, P, P, H, H, H, H],      // 77
    [P, P, P, P, P, P, P, P, P, RP],     // 88
    [P, P, P, P, P, S, P, P, S, S],      // 99
    [S, S, S, S, S, S, S, S, S, S],      // TT
    [P, P, P, P, P, P, P, P, P, P],      // AA
];

/// Индекс столбца дилера: 2..=9 → 0..=7, десятка → 8, туз → 9.
pub fn dealer_index(up: &Card) -> usize {
    match up.value() {
        11 => 9,
        v => (v as usize).saturating_sub(2).min(8),
    }
}

/// Индекс строки пары: 2..=T → 0..=8, AA → 9.
fn pair_index(card: &Card) -> usize {
    match card.value() {
        11 => 9,
        v => (v as usize).saturating_sub(2).min(8),
    }
}

/// S17: отличия от канонической H17-таблицы (жёсткие суммы).
fn s17_hard_override(total: u8, dealer: usize) -> Option<ChartCode> {
    match (total, dealer) {
        (11, 9) => Some(H),
        (15, 9) => Some(H),
        (17, 9) => Some(S),
        _ => None,
    }
}

fn s17_soft_override(total: u8, dealer: usize) -> Option<ChartCode> {
    match (total, dealer) {
        (18, 0) => Some(S),
        (19, 4) => Some(S),
        _ => None,
    }
}

fn s17_pair_override(pair: usize, dealer: usize) -> Option<ChartCode> {
    match (pair, dealer) {
        (6, 9) => Some(P),
        _ => None,
    }
}

/// Без DAS сплиты мелких пар, рассчитанные на последующий дабл, теряют смысл.
fn no_das_pair_override(pair: usize, dealer: usize) -> Option<ChartCode> {
    match (pair, dealer) {
        (0, 0..=1) => Some(H),
        (1, 0..=1) => Some(H),
        (2, 3..=4) => Some(H),
        (4, 0) => Some(H),
        _ => None,
    }
}

fn pair_code(pair: usize, dealer: usize, rules: &RuleConfig) -> ChartCode {
    let s17 = if rules.dealer_hits_soft17 { None } else { s17_pair_override(pair, dealer) };
    let no_das = if rules.double_after_split { None } else { no_das_pair_override(pair, dealer) };
    no_das.or(s17).unwrap_or(PAIRS[pair][dealer])
}

fn soft_code(total: u8, dealer: usize, rules: &RuleConfig) -> Option<ChartCode> {
    let row = SOFT.get(total.checked_sub(13)? as usize)?;
    let over = if rules.dealer_hits_soft17 { None } else { s17_soft_override(total, dealer) };
    Some(over.unwrap_or(row[dealer]))
}

fn hard_code(total: u8, dealer: usize, rules: &RuleConfig) -> Option<ChartCode> {
    let row = HARD.get(total.checked_sub(5)? as usize)?;
    let over = if rules.dealer_hits_soft17 { None } else { s17_hard_override(total, dealer) };
    Some(over.unwrap_or(row[dealer]))
}

/// Рекомендация базовой стратегии.
pub fn basic_action(
    cards: &[Card],
    dealer_up: &Card,
    rules: &RuleConfig,
    is_split_hand: bool,
) -> Decision {
    let elig = Eligibility::for_hand(cards, is_split_hand, rules);
    basic_action_with(cards, dealer_up, rules, elig)
}

/// То же, но с допустимостью, которую посчитал вызывающий (например,
/// рука уже удвоена или правила стола особые).
pub fn basic_action_with(
    cards: &[Card],
    dealer_up: &Card,
    rules: &RuleConfig,
    elig: Eligibility,
) -> Decision {
    let dealer = dealer_index(dealer_up);

    if elig.can_split {
        if let Some(first) = cards.first() {
            let code = pair_code(pair_index(first), dealer, rules);
            if resolve_code(code, elig) == Decision::Split {
                return Decision::Split;
            }
        }
    }

    let total = hand_total(cards);
    let code = if is_soft(cards) {
        soft_code(total, dealer, rules)
    } else {
        hard_code(total, dealer, rules)
    };

    match code {
        Some(code) => resolve_code(code, elig),
        None => {
            // Жёсткие 4 (22 без сплита) и мягкие 12 (AA без сплита) вне таблиц.
            debug!(
                total,
                soft = is_soft(cards),
                "strategy total outside chart, falling back to hit"
            );
            Decision::Hit
        }
    }
}
