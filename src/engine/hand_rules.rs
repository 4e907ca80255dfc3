//! Правила рук: подсчёт очков, мягкие тузы, политика дилера,
//! допустимость сплита/дабла/сдачи и расчёт исхода.

use crate::domain::card::Card;
use crate::domain::hand::{HandOutcome, PlayerHand};
use crate::domain::rules::RuleConfig;

/// Сумма очков с учётом тузов: каждый туз считается за 11,
/// пока сумма не превышает 21, иначе переводится в 1.
pub fn hand_total(cards: &[Card]) -> u8 {
    resolve_total(cards).0
}

/// (итоговая сумма, сколько тузов всё ещё считаются за 11).
fn resolve_total(cards: &[Card]) -> (u8, u8) {
    let mut total: u32 = cards.iter().map(|c| c.value() as u32).sum();
    let mut soft_aces = cards.iter().filter(|c| c.is_ace()).count() as u8;
    while total > 21 && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total.min(u8::MAX as u32) as u8, soft_aces)
}

/// Хотя бы один туз всё ещё считается за 11 без перебора.
pub fn is_soft(cards: &[Card]) -> bool {
    resolve_total(cards).1 > 0
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_total(cards) > 21
}

/// Ровно две карты и 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_total(cards) == 21
}

/// Две карты одинакового достоинства (десятки равны между собой).
pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].value() == cards[1].value()
}

/// Сплит: пара и рука ещё не результат сплита (респлита нет).
pub fn can_split(cards: &[Card], is_split_hand: bool) -> bool {
    is_pair(cards) && !is_split_hand
}

/// Дабл: ровно две карты, ещё не удвоено; после сплита нужен DAS.
pub fn can_double(
    cards: &[Card],
    is_doubled: bool,
    is_split_hand: bool,
    rules: &RuleConfig,
) -> bool {
    cards.len() == 2 && !is_doubled && (!is_split_hand || rules.double_after_split)
}

/// Сдача: разрешена правилами, две карты, не сплит.
pub fn can_surrender(cards: &[Card], is_split_hand: bool, rules: &RuleConfig) -> bool {
    rules.surrender_allowed && cards.len() == 2 && !is_split_hand
}

/// Политика дилера: добор до 17; на мягких 17 — только при H17.
pub fn should_dealer_hit(cards: &[Card], dealer_hits_soft17: bool) -> bool {
    let total = hand_total(cards);
    if total < 17 {
        return true;
    }
    total == 17 && is_soft(cards) && dealer_hits_soft17
}

/// Блэкджек с учётом сплита: 21 из двух карт после сплита — просто 21.
pub fn is_natural(hand: &PlayerHand) -> bool {
    !hand.is_split && is_blackjack(&hand.cards)
}

/// Исход руки игрока против дилера.
///
/// Порядок: оба блэкджека → push, блэкджек игрока → BlackjackWin,
/// блэкджек дилера → Loss, перебор игрока → Loss (дилер уже не важен),
/// перебор дилера → Win, иначе сравнение сумм.
pub fn resolve_outcome(player: &[Card], player_is_split: bool, dealer: &[Card]) -> HandOutcome {
    let player_bj = !player_is_split && is_blackjack(player);
    let dealer_bj = is_blackjack(dealer);

    match (player_bj, dealer_bj) {
        (true, true) => return HandOutcome::Push,
        (true, false) => return HandOutcome::BlackjackWin,
        (false, true) => return HandOutcome::Loss,
        (false, false) => {}
    }

    if is_bust(player) {
        return HandOutcome::Loss;
    }
    if is_bust(dealer) {
        return HandOutcome::Win;
    }

    let p = hand_total(player);
    let d = hand_total(dealer);
    match p.cmp(&d) {
        std::cmp::Ordering::Greater => HandOutcome::Win,
        std::cmp::Ordering::Less => HandOutcome::Loss,
        std::cmp::Ordering::Equal => HandOutcome::Push,
    }
}
