use crate::api::dto::{PlayerHandDto, SessionViewDto};
use crate::domain::hand::Decision;
use crate::engine::hand_rules::{can_double, can_split, can_surrender, hand_total, is_soft};
use crate::engine::{RandomSource, SessionPhase, TrainingSession};

/// Собрать DTO сессии. Закрытая карта и счёт наружу не попадают.
pub fn build_session_view<R: RandomSource>(session: &TrainingSession<R>) -> SessionViewDto {
    let awaiting = session.phase() == SessionPhase::AwaitingPlayerAction;
    let active = session.active_hand_index();

    let player_hands = session
        .player_hands()
        .iter()
        .enumerate()
        .map(|(i, h)| PlayerHandDto {
            cards: h.cards.clone(),
            total: hand_total(&h.cards),
            is_soft: is_soft(&h.cards),
            bet: h.bet,
            is_split: h.is_split,
            is_doubled: h.is_doubled,
            outcome: h.outcome,
            is_active: awaiting && i == active,
        })
        .collect();

    let dealer = session.dealer();
    let dealer_cards = dealer.visible_cards().to_vec();

    SessionViewDto {
        session_id: session.id().to_string(),
        phase: session.phase(),
        mode: session.mode(),
        hand_number: session.hand_number(),
        hands_played: session.hands_played(),
        player_hands,
        dealer_total: hand_total(&dealer_cards),
        dealer_cards,
        hole_card_hidden: !dealer.hole_card_revealed && dealer.cards.len() >= 2,
        available_actions: if awaiting { available_actions(session) } else { Vec::new() },
        pending_prompt: session.pending_prompt(),
        cards_remaining: session.shoe().map(|s| s.cards_remaining()).unwrap_or(0),
        deal_delay_ms: session.rules().deal_speed.delay_ms(),
        summary: session.summary(),
    }
}

/// Какие действия сейчас допустимы для активной руки.
pub fn available_actions<R: RandomSource>(session: &TrainingSession<R>) -> Vec<Decision> {
    let Some(hand) = session.player_hands().get(session.active_hand_index()) else {
        return Vec::new();
    };
    let rules = session.rules();

    let mut actions = vec![Decision::Hit, Decision::Stand];
    if can_double(&hand.cards, hand.is_doubled, hand.is_split, rules) {
        actions.push(Decision::Double);
    }
    if can_split(&hand.cards, hand.is_split) {
        actions.push(Decision::Split);
    }
    if can_surrender(&hand.cards, hand.is_split, rules) {
        actions.push(Decision::Surrender);
    }
    actions
}
