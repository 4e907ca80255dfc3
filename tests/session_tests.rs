//! Сценарии TrainingSession на заранее разложенном шузе.
//!
//! Порядок раздачи: игрок, открытая дилера, игрок, закрытая дилера,
//! дальше — добор в порядке строки.

use blackjack_trainer::domain::card::{parse_cards, Card};
use blackjack_trainer::domain::count_check::PromptType;
use blackjack_trainer::domain::hand::{Decision, HandOutcome};
use blackjack_trainer::domain::rules::{RuleConfig, SessionConfig, SessionMode};
use blackjack_trainer::engine::counting::apply_cards;
use blackjack_trainer::engine::{
    CadenceTier, RandomSource, SessionError, SessionEventKind, SessionPhase, TrainingSession,
};

struct FixedRng(f64);

impl RandomSource for FixedRng {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Сессия в фазе Ready, верх шуза — `deal_order` (первая карта выйдет первой).
/// FixedRng(0.9) → порог промпта 5, в коротких сценариях промпт не мешает.
fn stacked(config: SessionConfig, deal_order: &str) -> TrainingSession<FixedRng> {
    let mut session = TrainingSession::new(config, FixedRng(0.9)).unwrap();
    session.start(0).unwrap();

    let mut snap = session.snapshot(0);
    let shoe = snap.shoe.as_mut().unwrap();
    let top = parse_cards(deal_order).unwrap();
    let keep = shoe.cards.len() - top.len();
    shoe.cards.truncate(keep);
    shoe.cards.extend(top.into_iter().rev());

    TrainingSession::restore(snap, FixedRng(0.9)).unwrap()
}

fn play(deal_order: &str) -> TrainingSession<FixedRng> {
    stacked(SessionConfig::default(), deal_order)
}

/// Drill-сессия в Ready. FixedRng(0.1) → порог 4, в tight-режиме 2.
fn drill(count_prompt: PromptType) -> TrainingSession<FixedRng> {
    let config = SessionConfig {
        mode: SessionMode::CountingDrill,
        count_prompt,
        ..SessionConfig::default()
    };
    let mut session = TrainingSession::new(config, FixedRng(0.1)).unwrap();
    session.start(0).unwrap();
    session
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

//
// Раздача и счёт
//

#[test]
fn hole_card_is_counted_only_on_reveal() {
    let mut s = play("2c Kd 3h 5s Tc");
    s.deal_hand(1_000).unwrap();

    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);
    assert_eq!(s.player_hands()[0].cards, cards("2c 3h"));
    assert_eq!(s.dealer().cards, cards("Kd 5s"));
    assert!(!s.dealer().hole_card_revealed);
    // 2 (+1), K (−1), 3 (+1); закрытая пятёрка не в счёте.
    assert_eq!(s.running_count(), 1);

    s.stand(2_000).unwrap();
    assert!(s
        .log()
        .kinds()
        .any(|k| matches!(k, SessionEventKind::HoleCardRevealed { running_count: 2, .. })));
    // Дилер 15 добирает десятку и перебирает.
    assert_eq!(s.dealer().cards, cards("Kd 5s Tc"));
    assert_eq!(s.running_count(), 1);
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::Win));
    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert_eq!(s.hands_played(), 1);
}

#[test]
fn drill_mode_plays_itself() {
    let config = SessionConfig {
        mode: SessionMode::CountingDrill,
        ..SessionConfig::default()
    };
    let mut s = stacked(config, "Tc 9d 8h 7s 5c");
    s.deal_hand(1_000).unwrap();

    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert_eq!(s.dealer().cards, cards("9d 7s 5c"));
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::Loss));
    assert!(s.player_hands()[0].actions.is_empty());
    assert!(s.count_checks().is_empty());
    assert_eq!(s.running_count(), 0);
}

#[test]
fn player_blackjack_resolves_without_dealer_draw() {
    let mut s = play("Ah 9d Kc 7s 2c");
    s.deal_hand(1_000).unwrap();

    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::BlackjackWin));
    assert_eq!(s.dealer().cards.len(), 2);
    assert_eq!(s.running_count(), -2);
}

#[test]
fn dealer_blackjack_beats_twenty() {
    let mut s = play("Tc Ad Kh Ks");
    s.deal_hand(1_000).unwrap();
    // Пика нет: игрок ходит, потом проигрывает блэкджеку.
    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);
    s.stand(2_000).unwrap();
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::Loss));
}

//
// Действия игрока
//

#[test]
fn hit_until_bust_finishes_hand() {
    let mut s = play("Tc 7d 5h 9s 8c");
    s.deal_hand(1_000).unwrap();
    s.hit(2_000).unwrap();

    assert_eq!(s.player_hands()[0].cards, cards("Tc 5h 8c"));
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::Loss));
    // Перебор: дилеру добирать незачем.
    assert_eq!(s.dealer().cards.len(), 2);
    assert_eq!(s.phase(), SessionPhase::HandResolved);
}

#[test]
fn double_takes_one_card_and_doubles_bet() {
    let mut s = play("5c 6d 6h Ts 9c Kd");
    s.deal_hand(1_000).unwrap();
    assert_eq!(s.advice().unwrap().action, Decision::Double);

    s.double(2_000).unwrap();
    let hand = &s.player_hands()[0];
    assert_eq!(hand.cards, cards("5c 6h 9c"));
    assert_eq!(hand.bet, 2);
    assert!(hand.is_doubled);
    assert_eq!(hand.outcome, Some(HandOutcome::Win));
    assert_eq!(hand.outcome.unwrap().payout(hand.bet), 2.0);
    assert_eq!(s.dealer().cards, cards("6d Ts Kd"));
    assert_eq!(s.running_count(), 1);
}

#[test]
fn double_after_hit_is_rejected_without_side_effects() {
    let mut s = play("5c 6d 2h Ts 3c");
    s.deal_hand(1_000).unwrap();
    s.hit(2_000).unwrap();
    let checks_before = s.count_checks().len();

    assert_eq!(s.double(3_000), Err(SessionError::ActionNotAllowed(Decision::Double)));
    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);
    assert_eq!(s.player_hands()[0].cards.len(), 3);
    assert_eq!(s.count_checks().len(), checks_before);
}

#[test]
fn split_creates_two_hands_played_in_order() {
    let mut s = play("8c 7d 8h Ts 3c Kd 9h");
    s.deal_hand(1_000).unwrap();
    assert_eq!(s.advice().unwrap().action, Decision::Split);

    s.split(2_000).unwrap();
    assert_eq!(s.player_hands().len(), 2);
    assert_eq!(s.player_hands()[0].cards, cards("8c 3c"));
    assert_eq!(s.player_hands()[1].cards, cards("8h Kd"));
    assert!(s.player_hands().iter().all(|h| h.is_split));
    assert_eq!(s.active_hand_index(), 0);

    s.stand(3_000).unwrap();
    assert_eq!(s.active_hand_index(), 1);
    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);

    s.stand(4_000).unwrap();
    // Дилер 17 стоит.
    assert_eq!(s.dealer().cards, cards("7d Ts"));
    assert_eq!(s.player_hands()[0].outcome, Some(HandOutcome::Loss));
    assert_eq!(s.player_hands()[1].outcome, Some(HandOutcome::Win));
}

#[test]
fn split_aces_to_twenty_one_pay_even_money() {
    let mut s = play("Ac 9d Ah Ts Kc Kd 5s");
    s.deal_hand(1_000).unwrap();
    s.split(2_000).unwrap();

    // Обе руки 21, раунд закрыт сам.
    assert_eq!(s.phase(), SessionPhase::HandResolved);
    for hand in s.player_hands() {
        assert_eq!(hand.outcome, Some(HandOutcome::Win));
    }
    assert_eq!(s.dealer().cards, cards("9d Ts"));
}

#[test]
fn surrender_ends_hand_and_skips_dealer() {
    let mut s = play("Tc Td 6h 9s");
    s.deal_hand(1_000).unwrap();

    let advice = s.advice().unwrap();
    assert_eq!(advice.basic, Decision::Surrender);
    // RC −1 на ~6 колодах → TC 0: стенд по отклонению.
    assert_eq!(s.true_count(), 0);
    assert_eq!(advice.action, Decision::Stand);
    assert!(advice.deviation.is_some());

    s.surrender(3_000).unwrap();
    let hand = &s.player_hands()[0];
    assert_eq!(hand.outcome, Some(HandOutcome::Surrender));
    assert_eq!(hand.outcome.unwrap().payout(hand.bet), -0.5);
    assert_eq!(s.dealer().cards.len(), 2);

    let check = s.count_checks().last().unwrap();
    assert_eq!(check.prompt_type, PromptType::BestAction);
    assert_eq!(check.expected_action, Some(Decision::Stand));
    assert_eq!(check.entered_action, Some(Decision::Surrender));
    assert!(!check.is_correct);
    assert_eq!(check.response_ms, 2_000);
}

#[test]
fn decision_tracking_can_be_disabled() {
    let config = SessionConfig {
        track_decisions: false,
        ..SessionConfig::default()
    };
    let mut s = stacked(config, "2c Kd 3h 5s Tc");
    s.deal_hand(1_000).unwrap();
    s.stand(2_000).unwrap();
    assert!(s.count_checks().is_empty());
}

#[test]
fn surrender_disabled_by_rules() {
    let config = SessionConfig {
        rules: RuleConfig { surrender_allowed: false, ..RuleConfig::default() },
        ..SessionConfig::default()
    };
    let mut s = stacked(config, "Tc Td 6h 9s");
    s.deal_hand(1_000).unwrap();
    assert_eq!(s.surrender(2_000), Err(SessionError::ActionNotAllowed(Decision::Surrender)));
}

//
// Промпты на счёт
//

#[test]
fn prompt_opens_on_threshold_hand() {
    let mut s = drill(PromptType::RunningCount);
    for i in 1..=3u64 {
        s.deal_hand(i * 1_000).unwrap();
        assert_eq!(s.phase(), SessionPhase::HandResolved);
    }
    s.deal_hand(4_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::CountPromptOpen);
    assert_eq!(s.pending_prompt(), Some(PromptType::RunningCount));

    // С открытым промптом раздавать нельзя.
    assert_eq!(
        s.deal_hand(4_500),
        Err(SessionError::IllegalTransition {
            from: SessionPhase::CountPromptOpen,
            to: SessionPhase::Dealing
        })
    );

    let rc = s.running_count();
    let check = s.submit_count(rc, 5_000).unwrap();
    assert!(check.is_correct);
    assert_eq!(check.delta, 0);
    assert_eq!(check.expected_count, rc);
    assert_eq!(check.response_ms, 1_000);
    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert_eq!(s.pending_prompt(), None);
    assert_eq!(s.scheduler().hands_since_prompt(), 0);
}

#[test]
fn misses_tighten_cadence() {
    let mut s = drill(PromptType::RunningCount);
    let mut now = 0;
    let mut deal_until_prompt = |s: &mut TrainingSession<FixedRng>| {
        loop {
            now += 1_000;
            s.deal_hand(now).unwrap();
            if s.phase() == SessionPhase::CountPromptOpen {
                return now;
            }
        }
    };

    let t = deal_until_prompt(&mut s);
    let rc = s.running_count();
    s.submit_count(rc, t + 500).unwrap();
    assert_eq!(s.scheduler().cadence_tier(), CadenceTier::Normal);

    let t = deal_until_prompt(&mut s);
    let rc = s.running_count();
    let check = s.submit_count(rc + 3, t + 500).unwrap();
    assert!(!check.is_correct);
    assert_eq!(check.delta, 3);

    // 1 промах из 2 → 0.5 → tight, порог перевыбран.
    assert_eq!(s.recent_miss_rate(), 0.5);
    assert_eq!(s.scheduler().cadence_tier(), CadenceTier::Tight);
    assert_eq!(s.scheduler().next_threshold(), 2);

    let summary = s.summary();
    assert_eq!(summary.total_prompts, 2);
    assert_eq!(summary.correct_prompts, 1);
    assert_eq!(summary.accuracy, 0.5);
}

#[test]
fn true_count_prompt_expects_true_count() {
    let mut s = drill(PromptType::TrueCount);
    for i in 1..=4u64 {
        s.deal_hand(i * 1_000).unwrap();
    }
    assert_eq!(s.pending_prompt(), Some(PromptType::TrueCount));

    let tc = s.true_count();
    let check = s.submit_count(tc + 1, 5_000).unwrap();
    assert_eq!(check.expected_count, tc);
    assert_eq!(check.delta, 1);
    assert!(!check.is_correct);
}

#[test]
fn dismissed_prompt_leaves_no_record() {
    let mut s = drill(PromptType::RunningCount);
    for i in 1..=4u64 {
        s.deal_hand(i * 1_000).unwrap();
    }
    s.dismiss_prompt().unwrap();

    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert!(s.count_checks().is_empty());
    assert_eq!(s.scheduler().hands_since_prompt(), 0);
    assert!(s.log().kinds().any(|k| matches!(k, SessionEventKind::PromptDismissed)));
    assert_eq!(s.dismiss_prompt(), Err(SessionError::NoPromptOpen));
}

//
// Пауза
//

#[test]
fn paused_time_is_not_response_time() {
    let mut s = drill(PromptType::RunningCount);
    for i in 1..=4u64 {
        s.deal_hand(i * 1_000).unwrap();
    }
    s.pause(5_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::Paused);
    assert_eq!(s.paused_from(), Some(SessionPhase::CountPromptOpen));
    assert_eq!(s.submit_count(0, 6_000), Err(SessionError::NoPromptOpen));

    s.resume(9_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::CountPromptOpen);

    let rc = s.running_count();
    let check = s.submit_count(rc, 10_000).unwrap();
    // 10 000 − 4 000 − 4 000 на паузе.
    assert_eq!(check.response_ms, 2_000);
}

#[test]
fn pause_resume_mid_hand() {
    let mut s = play("2c Kd 3h 5s Tc");
    s.deal_hand(1_000).unwrap();
    s.pause(2_000).unwrap();
    assert_eq!(s.hit(2_500), Err(SessionError::NotAwaitingAction(SessionPhase::Paused)));
    s.resume(3_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);
}

#[test]
fn pause_and_resume_guards() {
    let mut s = drill(PromptType::RunningCount);
    assert_eq!(
        s.pause(1_000),
        Err(SessionError::IllegalTransition { from: SessionPhase::Ready, to: SessionPhase::Paused })
    );
    assert!(matches!(s.resume(1_000), Err(SessionError::IllegalTransition { .. })));
}

//
// Жизненный цикл и ошибки
//

#[test]
fn end_and_reset() {
    let mut s = drill(PromptType::RunningCount);
    let first_id = s.id().to_string();
    s.deal_hand(1_000).unwrap();
    s.deal_hand(2_000).unwrap();

    let record = s.end_session(3_000).unwrap();
    assert_eq!(record.session_id, first_id);
    assert_eq!(record.hands_played, 2);
    assert_eq!(record.started_at, 0);
    assert_eq!(record.ended_at, 3_000);
    assert_eq!(record.mode, SessionMode::CountingDrill);
    assert_eq!(s.phase(), SessionPhase::Completed);

    assert!(matches!(s.deal_hand(4_000), Err(SessionError::IllegalTransition { .. })));
    assert!(matches!(s.end_session(4_000), Err(SessionError::IllegalTransition { .. })));

    s.reset().unwrap();
    assert_eq!(s.phase(), SessionPhase::Idle);
    assert_eq!(s.hands_played(), 0);
    assert!(s.shoe().is_none());
    assert_ne!(s.id(), first_id);

    s.start(5_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::Ready);
}

#[test]
fn end_mid_hand_discards_hand() {
    let mut s = play("2c Kd 3h 5s Tc");
    s.deal_hand(1_000).unwrap();
    let record = s.end_session(2_000).unwrap();
    assert_eq!(record.hands_played, 0);
}

#[test]
fn errors_before_start() {
    let mut s = TrainingSession::new(SessionConfig::default(), FixedRng(0.3)).unwrap();
    assert_eq!(s.phase(), SessionPhase::Idle);
    assert_eq!(
        s.deal_hand(0),
        Err(SessionError::IllegalTransition { from: SessionPhase::Idle, to: SessionPhase::Dealing })
    );
    assert_eq!(s.hit(0), Err(SessionError::NotAwaitingAction(SessionPhase::Idle)));
    assert_eq!(s.submit_count(0, 0), Err(SessionError::NoPromptOpen));
    assert!(matches!(s.advice(), Err(SessionError::NotAwaitingAction(_))));
    assert!(matches!(
        s.end_session(0),
        Err(SessionError::IllegalTransition {
            from: SessionPhase::Idle,
            to: SessionPhase::Completed
        })
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let config = SessionConfig {
        rules: RuleConfig { decks: 9, ..RuleConfig::default() },
        ..SessionConfig::default()
    };
    assert!(matches!(
        TrainingSession::new(config, FixedRng(0.3)),
        Err(SessionError::Config(_))
    ));
}

#[test]
fn restore_without_shoe_is_rejected() {
    let mut s = TrainingSession::new(SessionConfig::default(), FixedRng(0.3)).unwrap();
    s.start(0).unwrap();
    let mut snap = s.snapshot(0);
    snap.shoe = None;
    assert!(matches!(
        TrainingSession::restore(snap, FixedRng(0.3)),
        Err(SessionError::NoShoe)
    ));
}

#[test]
fn cut_card_reshuffles_and_resets_count() {
    let config = SessionConfig {
        mode: SessionMode::CountingDrill,
        rules: RuleConfig { decks: 1, penetration: 0.5, ..RuleConfig::default() },
        ..SessionConfig::default()
    };
    let mut s = TrainingSession::new(config, FixedRng(0.9)).unwrap();
    s.start(0).unwrap();

    let mut reshuffled = false;
    for i in 1..=40u64 {
        if s.phase() == SessionPhase::CountPromptOpen {
            s.dismiss_prompt().unwrap();
        }
        s.deal_hand(i * 1_000).unwrap();
        if s.log().kinds().any(|k| matches!(k, SessionEventKind::Reshuffled)) {
            reshuffled = true;
            break;
        }
    }
    assert!(reshuffled);

    // После пересборки в счёте только карты этой раздачи.
    let mut dealt: Vec<Card> = s.player_hands().iter().flat_map(|h| h.cards.clone()).collect();
    dealt.extend(s.dealer().cards.iter().copied());
    assert_eq!(s.running_count(), apply_cards(0, &dealt));
    assert_eq!(s.shoe().unwrap().cards_remaining(), 52 - dealt.len());
}

/// Шуз кончился посреди руки: закрытая карта осталась за старым шузом
/// и не попадает в счёт нового.
#[test]
fn mid_hand_rebuild_keeps_old_hole_card_out_of_new_count() {
    let config = SessionConfig {
        rules: RuleConfig { decks: 1, penetration: 1.0, ..RuleConfig::default() },
        ..SessionConfig::default()
    };
    let mut session = TrainingSession::new(config, FixedRng(0.9)).unwrap();
    session.start(0).unwrap();
    let mut snap = session.snapshot(0);
    // В шузе ровно четыре карты: до отрезной (52) ещё далеко.
    snap.shoe.as_mut().unwrap().cards = cards("2c Td 3h 5s").into_iter().rev().collect();
    let mut s = TrainingSession::restore(snap, FixedRng(0.9)).unwrap();

    s.deal_hand(1_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::AwaitingPlayerAction);
    assert_eq!(s.running_count(), 1);
    assert!(s.shoe().unwrap().is_empty());

    s.hit(2_000).unwrap();
    assert!(s.log().kinds().any(|k| matches!(k, SessionEventKind::Reshuffled)));
    assert!(s.dealer().hole_card_from_old_shoe);
    let hit_card = s.player_hands()[0].cards[2];
    assert_eq!(s.running_count(), apply_cards(0, &[hit_card]));

    s.stand(3_000).unwrap();
    assert_eq!(s.phase(), SessionPhase::HandResolved);
    assert!(s.log().kinds().any(|k| matches!(
        k,
        SessionEventKind::HoleCardRevealed { running_count, .. }
            if *running_count == apply_cards(0, &[hit_card])
    )));

    // В счёте только карты нового шуза, поэтому вместе с остатком он сходится к нулю.
    let mut from_new_shoe = vec![hit_card];
    from_new_shoe.extend_from_slice(&s.dealer().cards[2..]);
    assert_eq!(s.running_count(), apply_cards(0, &from_new_shoe));
    assert_eq!(
        apply_cards(s.running_count(), s.shoe().unwrap().remaining()),
        0
    );
}
