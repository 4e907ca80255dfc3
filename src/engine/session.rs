//! Оркестратор тренировочной сессии.
//!
//! Одна `TrainingSession` = один экземпляр автомата фаз. Каждое действие
//! сначала проверяет переход, потом мутирует состояние; при ошибке
//! состояние не меняется. Время передаётся снаружи (`now_ms`),
//! RNG — внедряется при создании.

use tracing::{debug, info};

use crate::domain::card::Card;
use crate::domain::count_check::{CountCheck, PromptType, SessionSummary};
use crate::domain::hand::{DealerHand, Decision, HandOutcome, PlayerHand};
use crate::domain::rules::{RuleConfig, SessionConfig, SessionMode};
use crate::domain::shoe::Shoe;
use crate::domain::SessionId;
use crate::engine::counting;
use crate::engine::deviations::{find_deviation, Deviation};
use crate::engine::errors::SessionError;
use crate::engine::hand_rules::{
    can_double, can_split, can_surrender, hand_total, is_bust, is_natural, resolve_outcome,
    should_dealer_hit,
};
use crate::engine::scheduler::PromptScheduler;
use crate::engine::session_log::{CardTarget, SessionEventKind, SessionLog};
use crate::engine::state_machine::{assert_transition, SessionPhase};
use crate::engine::stats::{recent_miss_rate, summarize};
use crate::engine::strategy::{basic_action_with, Eligibility};
use crate::engine::RandomSource;
use crate::infra::ids::new_session_id;
use crate::state::{SessionRecord, SessionSnapshot};

/// Рекомендация по активной руке.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Advice {
    /// Итоговое действие: отклонение, если сработало, иначе базовая стратегия.
    pub action: Decision,
    pub basic: Decision,
    pub deviation: Option<&'static Deviation>,
}

pub struct TrainingSession<R: RandomSource> {
    id: SessionId,
    config: SessionConfig,
    phase: SessionPhase,
    paused_from: Option<SessionPhase>,
    paused_at: Option<u64>,
    shoe: Option<Shoe>,
    running_count: i32,
    hand_number: u32,
    hands_played: u32,
    player_hands: Vec<PlayerHand>,
    active_hand: usize,
    dealer: DealerHand,
    count_checks: Vec<CountCheck>,
    pending_prompt: Option<PromptType>,
    prompt_started_at: Option<u64>,
    decision_started_at: Option<u64>,
    scheduler: PromptScheduler,
    started_at: Option<u64>,
    ended_at: Option<u64>,
    log: SessionLog,
    rng: R,
}

impl<R: RandomSource> TrainingSession<R> {
    /// Новая сессия в фазе `Idle`. Шуз создаётся в `start`.
    pub fn new(config: SessionConfig, mut rng: R) -> Result<Self, SessionError> {
        config.validate()?;
        let scheduler = PromptScheduler::new(&mut rng);
        Ok(Self {
            id: new_session_id(),
            config,
            phase: SessionPhase::Idle,
            paused_from: None,
            paused_at: None,
            shoe: None,
            running_count: 0,
            hand_number: 0,
            hands_played: 0,
            player_hands: Vec::new(),
            active_hand: 0,
            dealer: DealerHand::default(),
            count_checks: Vec::new(),
            pending_prompt: None,
            prompt_started_at: None,
            decision_started_at: None,
            scheduler,
            started_at: None,
            ended_at: None,
            log: SessionLog::new(),
            rng,
        })
    }

    // ------------------------------------------------------------------
    // Чтение состояния
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn paused_from(&self) -> Option<SessionPhase> {
        self.paused_from
    }

    pub fn mode(&self) -> SessionMode {
        self.config.mode
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.config.rules
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Оценка оставшихся колод (не меньше половины колоды).
    pub fn decks_remaining(&self) -> f64 {
        match &self.shoe {
            Some(shoe) => counting::decks_remaining(shoe.cards_remaining()),
            None => self.config.rules.decks as f64,
        }
    }

    pub fn true_count(&self) -> i32 {
        counting::true_count(self.running_count, self.decks_remaining())
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn player_hands(&self) -> &[PlayerHand] {
        &self.player_hands
    }

    pub fn active_hand_index(&self) -> usize {
        self.active_hand
    }

    pub fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    pub fn shoe(&self) -> Option<&Shoe> {
        self.shoe.as_ref()
    }

    pub fn count_checks(&self) -> &[CountCheck] {
        &self.count_checks
    }

    pub fn pending_prompt(&self) -> Option<PromptType> {
        self.pending_prompt
    }

    pub fn scheduler(&self) -> &PromptScheduler {
        &self.scheduler
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<u64> {
        self.ended_at
    }

    pub fn summary(&self) -> SessionSummary {
        summarize(&self.count_checks)
    }

    pub fn recent_miss_rate(&self) -> f64 {
        recent_miss_rate(&self.count_checks, self.config.miss_rate_window)
    }

    // ------------------------------------------------------------------
    // Жизненный цикл
    // ------------------------------------------------------------------

    /// Idle → Ready: собрать и перемешать шуз.
    pub fn start(&mut self, now_ms: u64) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::Ready)?;
        let rules = &self.config.rules;
        self.shoe = Some(Shoe::new(rules.decks, rules.penetration, &mut self.rng));
        self.running_count = 0;
        self.started_at = Some(now_ms);
        self.phase = SessionPhase::Ready;
        info!(
            session_id = %self.id,
            mode = ?self.config.mode,
            decks = rules.decks,
            "training session started"
        );
        Ok(())
    }

    pub fn pause(&mut self, now_ms: u64) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::Paused)?;
        self.paused_from = Some(self.phase);
        self.paused_at = Some(now_ms);
        self.phase = SessionPhase::Paused;
        Ok(())
    }

    /// Вернуться ровно в ту фазу, из которой ушли на паузу.
    /// Время паузы не засчитывается во время ответа.
    pub fn resume(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let target = match (self.phase, self.paused_from) {
            (SessionPhase::Paused, Some(target)) => target,
            (from, target) => {
                return Err(SessionError::IllegalTransition {
                    from,
                    to: target.unwrap_or(from),
                })
            }
        };
        assert_transition(self.phase, target)?;

        let paused_for = self
            .paused_at
            .map(|at| now_ms.saturating_sub(at))
            .unwrap_or(0);
        self.prompt_started_at = self.prompt_started_at.map(|t| t + paused_for);
        self.decision_started_at = self.decision_started_at.map(|t| t + paused_for);

        self.paused_from = None;
        self.paused_at = None;
        self.phase = target;
        Ok(())
    }

    /// Завершить сессию и вернуть запись для истории.
    /// Недоигранная раздача отбрасывается.
    pub fn end_session(&mut self, now_ms: u64) -> Result<SessionRecord, SessionError> {
        assert_transition(self.phase, SessionPhase::Completed)?;
        self.phase = SessionPhase::Completed;
        self.paused_from = None;
        self.paused_at = None;
        self.pending_prompt = None;
        self.prompt_started_at = None;
        self.decision_started_at = None;
        self.ended_at = Some(now_ms);

        let record = self.record();
        info!(
            session_id = %self.id,
            hands_played = self.hands_played,
            accuracy = record.summary.accuracy,
            "training session completed"
        );
        Ok(record)
    }

    /// Completed → Idle: новая сессия с теми же настройками и RNG.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::Idle)?;
        self.id = new_session_id();
        self.phase = SessionPhase::Idle;
        self.shoe = None;
        self.running_count = 0;
        self.hand_number = 0;
        self.hands_played = 0;
        self.player_hands.clear();
        self.active_hand = 0;
        self.dealer = DealerHand::default();
        self.count_checks.clear();
        self.scheduler = PromptScheduler::new(&mut self.rng);
        self.started_at = None;
        self.ended_at = None;
        self.log.clear();
        Ok(())
    }

    /// Запись истории по текущему состоянию.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            session_id: self.id.clone(),
            mode: self.config.mode,
            rules: self.config.rules.clone(),
            started_at: self.started_at.unwrap_or(0),
            ended_at: self.ended_at.unwrap_or(0),
            hands_played: self.hands_played,
            count_checks: self.count_checks.clone(),
            summary: self.summary(),
        }
    }

    // ------------------------------------------------------------------
    // Раздача
    // ------------------------------------------------------------------

    /// Новая раздача: игрок, дилер (открытая), игрок, дилер (закрытая).
    ///
    /// В режиме `CountingDrill` или при блэкджеке игрока рука
    /// доигрывается автоматически, иначе ждём решения игрока.
    pub fn deal_hand(&mut self, now_ms: u64) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::Dealing)?;
        let shoe = self.shoe.as_mut().ok_or(SessionError::NoShoe)?;
        self.phase = SessionPhase::Dealing;
        self.log.clear();

        if shoe.needs_reshuffle() {
            shoe.reshuffle(&mut self.rng);
            self.running_count = 0;
            self.log.push(SessionEventKind::Reshuffled);
            debug!(session_id = %self.id, "cut card reached, shoe reshuffled");
        }

        self.hand_number += 1;
        self.player_hands = vec![PlayerHand::new(self.config.bet_unit)];
        self.active_hand = 0;
        self.dealer = DealerHand::default();
        self.log.push(SessionEventKind::HandStarted {
            hand_number: self.hand_number,
        });

        let card = self.draw_visible(CardTarget::Player(0))?;
        self.player_hands[0].cards.push(card);
        let card = self.draw_visible(CardTarget::DealerUp)?;
        self.dealer.cards.push(card);
        let card = self.draw_visible(CardTarget::Player(0))?;
        self.player_hands[0].cards.push(card);

        let hole = self.draw_card()?;
        self.log.push(SessionEventKind::CardDealt {
            to: CardTarget::DealerHole,
            card: hole,
            counted: false,
        });
        self.dealer.cards.push(hole);

        debug!(
            session_id = %self.id,
            hand_number = self.hand_number,
            running_count = self.running_count,
            "hand dealt"
        );

        if self.config.mode == SessionMode::CountingDrill || is_natural(&self.player_hands[0]) {
            self.player_hands[0].finished = true;
            return self.finish_round(now_ms);
        }

        self.phase = SessionPhase::AwaitingPlayerAction;
        self.decision_started_at = Some(now_ms);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Действия игрока
    // ------------------------------------------------------------------

    pub fn hit(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let idx = self.begin_action(Decision::Hit, now_ms)?;
        let card = self.draw_visible(CardTarget::Player(idx))?;
        let hand = &mut self.player_hands[idx];
        hand.cards.push(card);
        if hand_total(&hand.cards) >= 21 {
            hand.finished = true;
            return self.advance(now_ms);
        }
        Ok(())
    }

    pub fn stand(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let idx = self.begin_action(Decision::Stand, now_ms)?;
        self.player_hands[idx].finished = true;
        self.advance(now_ms)
    }

    /// Удвоить ставку и взять ровно одну карту.
    pub fn double(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let idx = self.begin_action(Decision::Double, now_ms)?;
        let card = self.draw_visible(CardTarget::Player(idx))?;
        let hand = &mut self.player_hands[idx];
        hand.bet = hand.bet.saturating_mul(2);
        hand.is_doubled = true;
        hand.cards.push(card);
        hand.finished = true;
        self.advance(now_ms)
    }

    /// Разбить пару на две руки, каждой сразу досдаётся карта.
    pub fn split(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let idx = self.begin_action(Decision::Split, now_ms)?;

        let hand = &mut self.player_hands[idx];
        let moved = hand.cards.pop().ok_or(SessionError::NoActiveHand)?;
        hand.is_split = true;
        let mut second = PlayerHand::new(hand.bet);
        second.is_split = true;
        second.actions.push(Decision::Split);
        second.cards.push(moved);
        self.player_hands.insert(idx + 1, second);

        for i in [idx, idx + 1] {
            let card = self.draw_visible(CardTarget::Player(i))?;
            let hand = &mut self.player_hands[i];
            hand.cards.push(card);
            if hand_total(&hand.cards) == 21 {
                hand.finished = true;
            }
        }
        self.advance(now_ms)
    }

    pub fn surrender(&mut self, now_ms: u64) -> Result<(), SessionError> {
        let idx = self.begin_action(Decision::Surrender, now_ms)?;
        self.player_hands[idx].finished = true;
        self.advance(now_ms)
    }

    /// Рекомендация для активной руки при текущем true count.
    pub fn advice(&self) -> Result<Advice, SessionError> {
        if self.phase != SessionPhase::AwaitingPlayerAction {
            return Err(SessionError::NotAwaitingAction(self.phase));
        }
        self.advice_for(self.active_hand)
    }

    fn advice_for(&self, idx: usize) -> Result<Advice, SessionError> {
        let hand = self.player_hands.get(idx).ok_or(SessionError::NoActiveHand)?;
        let up = self.dealer.up_card().ok_or(SessionError::NoActiveHand)?;
        let rules = &self.config.rules;

        let elig = Eligibility {
            can_double: can_double(&hand.cards, hand.is_doubled, hand.is_split, rules),
            can_surrender: can_surrender(&hand.cards, hand.is_split, rules),
            can_split: can_split(&hand.cards, hand.is_split),
        };
        let basic = basic_action_with(&hand.cards, &up, rules, elig);
        let deviation = find_deviation(&hand.cards, &up, self.true_count(), rules, hand.is_split);

        Ok(Advice {
            action: deviation.map(|d| d.deviation_action).unwrap_or(basic),
            basic,
            deviation,
        })
    }

    /// Общая часть всех действий: фаза, допустимость, учёт решения.
    /// Возвращает индекс активной руки.
    fn begin_action(&mut self, action: Decision, now_ms: u64) -> Result<usize, SessionError> {
        if self.phase != SessionPhase::AwaitingPlayerAction {
            return Err(SessionError::NotAwaitingAction(self.phase));
        }
        let idx = self.active_hand;
        let hand = self.player_hands.get(idx).ok_or(SessionError::NoActiveHand)?;
        let rules = &self.config.rules;

        let allowed = match action {
            Decision::Hit | Decision::Stand => true,
            Decision::Double => can_double(&hand.cards, hand.is_doubled, hand.is_split, rules),
            Decision::Split => can_split(&hand.cards, hand.is_split),
            Decision::Surrender => can_surrender(&hand.cards, hand.is_split, rules),
        };
        if !allowed {
            return Err(SessionError::ActionNotAllowed(action));
        }

        if self.config.track_decisions {
            self.record_decision(idx, action, now_ms)?;
        }

        self.player_hands[idx].actions.push(action);
        self.log.push(SessionEventKind::PlayerActed {
            hand_index: idx,
            action,
        });
        self.decision_started_at = Some(now_ms);
        Ok(idx)
    }

    fn record_decision(
        &mut self,
        idx: usize,
        action: Decision,
        now_ms: u64,
    ) -> Result<(), SessionError> {
        let advice = self.advice_for(idx)?;
        let started = self.decision_started_at.unwrap_or(now_ms);
        let is_correct = advice.action == action;
        self.count_checks.push(CountCheck {
            session_id: self.id.clone(),
            hand_number: self.hand_number,
            prompt_type: PromptType::BestAction,
            expected_count: 0,
            entered_count: 0,
            response_ms: now_ms.saturating_sub(started),
            is_correct,
            delta: 0,
            expected_action: Some(advice.action),
            entered_action: Some(action),
            created_at: now_ms,
        });
        debug!(
            session_id = %self.id,
            expected = %advice.action,
            entered = %action,
            is_correct,
            "decision checked"
        );
        Ok(())
    }

    /// Перейти к следующей недоигранной руке или завершить раунд.
    fn advance(&mut self, now_ms: u64) -> Result<(), SessionError> {
        match self.player_hands.iter().position(|h| !h.finished) {
            Some(idx) => {
                self.active_hand = idx;
                Ok(())
            }
            None => self.finish_round(now_ms),
        }
    }

    /// Ход дилера, расчёт и проверка планировщика.
    fn finish_round(&mut self, now_ms: u64) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::DealerTurn)?;
        self.phase = SessionPhase::DealerTurn;
        self.decision_started_at = None;

        self.reveal_hole_card();

        let live = self
            .player_hands
            .iter()
            .any(|h| !is_bust(&h.cards) && !h.is_surrendered() && !is_natural(h));
        if live {
            while should_dealer_hit(&self.dealer.cards, self.config.rules.dealer_hits_soft17) {
                let card = self.draw_visible(CardTarget::Dealer)?;
                self.dealer.cards.push(card);
                self.log.push(SessionEventKind::DealerDrew {
                    card,
                    total: hand_total(&self.dealer.cards),
                });
            }
        }

        for (i, hand) in self.player_hands.iter_mut().enumerate() {
            if hand.outcome.is_some() {
                continue;
            }
            let outcome = if hand.is_surrendered() {
                HandOutcome::Surrender
            } else {
                resolve_outcome(&hand.cards, hand.is_split, &self.dealer.cards)
            };
            hand.outcome = Some(outcome);
            self.log.push(SessionEventKind::HandResolved {
                hand_index: i,
                outcome,
            });
        }

        assert_transition(self.phase, SessionPhase::HandResolved)?;
        self.phase = SessionPhase::HandResolved;
        self.hands_played += 1;

        debug!(
            session_id = %self.id,
            hand_number = self.hand_number,
            running_count = self.running_count,
            dealer_total = hand_total(&self.dealer.cards),
            "hand resolved"
        );

        if self.scheduler.on_hand_resolved() {
            self.open_prompt(now_ms)?;
        }
        Ok(())
    }

    fn reveal_hole_card(&mut self) {
        if self.dealer.hole_card_revealed {
            return;
        }
        self.dealer.hole_card_revealed = true;
        if let Some(hole) = self.dealer.hole_card() {
            if !self.dealer.hole_card_from_old_shoe {
                self.running_count = counting::apply_card(self.running_count, &hole);
            }
            self.log.push(SessionEventKind::HoleCardRevealed {
                card: hole,
                running_count: self.running_count,
            });
        }
    }

    // ------------------------------------------------------------------
    // Промпты
    // ------------------------------------------------------------------

    fn open_prompt(&mut self, now_ms: u64) -> Result<(), SessionError> {
        assert_transition(self.phase, SessionPhase::CountPromptOpen)?;
        let prompt_type = self.config.count_prompt;
        self.phase = SessionPhase::CountPromptOpen;
        self.pending_prompt = Some(prompt_type);
        self.prompt_started_at = Some(now_ms);
        self.log.push(SessionEventKind::PromptOpened { prompt_type });
        Ok(())
    }

    /// Ответ игрока на промпт. Возвращает созданную запись.
    pub fn submit_count(&mut self, entered: i32, now_ms: u64) -> Result<CountCheck, SessionError> {
        let prompt_type = self.open_prompt_type()?;

        let expected = match prompt_type {
            PromptType::TrueCount => self.true_count(),
            PromptType::RunningCount | PromptType::BestAction => self.running_count,
        };
        let started = self.prompt_started_at.unwrap_or(now_ms);
        let check = CountCheck {
            session_id: self.id.clone(),
            hand_number: self.hand_number,
            prompt_type,
            expected_count: expected,
            entered_count: entered,
            response_ms: now_ms.saturating_sub(started),
            is_correct: entered == expected,
            delta: entered - expected,
            expected_action: None,
            entered_action: None,
            created_at: now_ms,
        };
        self.count_checks.push(check.clone());
        self.log.push(SessionEventKind::PromptAnswered {
            is_correct: check.is_correct,
            delta: check.delta,
        });

        self.close_prompt();
        let miss_rate = self.recent_miss_rate();
        self.scheduler.adapt_cadence(miss_rate, &mut self.rng);

        debug!(
            session_id = %self.id,
            expected,
            entered,
            miss_rate,
            tier = ?self.scheduler.cadence_tier(),
            "count prompt answered"
        );
        Ok(check)
    }

    /// Закрыть промпт без ответа. Запись не создаётся.
    pub fn dismiss_prompt(&mut self) -> Result<(), SessionError> {
        self.open_prompt_type()?;
        self.log.push(SessionEventKind::PromptDismissed);
        self.close_prompt();
        Ok(())
    }

    fn open_prompt_type(&self) -> Result<PromptType, SessionError> {
        if self.phase != SessionPhase::CountPromptOpen {
            return Err(SessionError::NoPromptOpen);
        }
        let prompt_type = self.pending_prompt.ok_or(SessionError::NoPromptOpen)?;
        assert_transition(self.phase, SessionPhase::HandResolved)?;
        Ok(prompt_type)
    }

    fn close_prompt(&mut self) {
        self.pending_prompt = None;
        self.prompt_started_at = None;
        self.scheduler.on_prompt_submitted(&mut self.rng);
        self.phase = SessionPhase::HandResolved;
    }

    // ------------------------------------------------------------------
    // Карты
    // ------------------------------------------------------------------

    /// Взять карту из шуза. Пустой шуз пересобирается, счёт обнуляется;
    /// уже сданная закрытая карта остаётся за старым шузом.
    fn draw_card(&mut self) -> Result<Card, SessionError> {
        let shoe = self.shoe.as_mut().ok_or(SessionError::NoShoe)?;
        if shoe.is_empty() {
            self.running_count = 0;
            if self.dealer.cards.len() >= 2 && !self.dealer.hole_card_revealed {
                self.dealer.hole_card_from_old_shoe = true;
            }
            self.log.push(SessionEventKind::Reshuffled);
            debug!(session_id = %self.id, "shoe exhausted mid-hand, rebuilt");
        }
        Ok(shoe.draw(&mut self.rng))
    }

    /// Взять открытую карту и сразу учесть её в running count.
    fn draw_visible(&mut self, to: CardTarget) -> Result<Card, SessionError> {
        let card = self.draw_card()?;
        self.running_count = counting::apply_card(self.running_count, &card);
        self.log.push(SessionEventKind::CardDealt {
            to,
            card,
            counted: true,
        });
        Ok(card)
    }

    // ------------------------------------------------------------------
    // Снапшоты
    // ------------------------------------------------------------------

    pub fn snapshot(&self, now_ms: u64) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            phase: self.phase,
            paused_from: self.paused_from,
            config: self.config.clone(),
            running_count: self.running_count,
            hand_number: self.hand_number,
            hands_played: self.hands_played,
            count_checks: self.count_checks.clone(),
            pending_prompt: self.pending_prompt,
            prompt_start_time: self.prompt_started_at,
            decision_start_time: self.decision_started_at,
            paused_at: self.paused_at,
            shoe: self.shoe.as_ref().map(Shoe::serialize),
            scheduler: self.scheduler.serialize(),
            player_hands: self.player_hands.clone(),
            active_hand: self.active_hand,
            dealer: self.dealer.clone(),
            started_at: self.started_at,
            ended_at: self.ended_at,
            saved_at: now_ms,
        }
    }

    /// Восстановить сессию из снапшота. Порядок карт шуза сохраняется.
    ///
    /// Промежуточные фазы (`Dealing`, `DealerTurn`) снаружи не видны и не
    /// восстанавливаются; пауза обязана помнить фазу, из которой пришла.
    pub fn restore(snapshot: SessionSnapshot, rng: R) -> Result<Self, SessionError> {
        snapshot.config.validate()?;
        let restorable = match snapshot.phase {
            SessionPhase::Dealing | SessionPhase::DealerTurn => false,
            SessionPhase::Paused => snapshot.paused_from.is_some_and(SessionPhase::is_pausable),
            _ => true,
        };
        if !restorable {
            return Err(SessionError::UnrestorablePhase {
                phase: snapshot.phase,
                paused_from: snapshot.paused_from,
            });
        }

        let needs_shoe = !matches!(snapshot.phase, SessionPhase::Idle);
        if needs_shoe && snapshot.shoe.is_none() {
            return Err(SessionError::NoShoe);
        }
        let shoe = snapshot.shoe.map(Shoe::from_state).transpose()?;
        if let Some(shoe) = &shoe {
            if shoe.deck_count() != snapshot.config.rules.decks {
                return Err(SessionError::ShoeDecksMismatch {
                    shoe: shoe.deck_count(),
                    rules: snapshot.config.rules.decks,
                });
            }
        }

        Ok(Self {
            id: snapshot.session_id,
            config: snapshot.config,
            phase: snapshot.phase,
            paused_from: snapshot.paused_from,
            paused_at: snapshot.paused_at,
            shoe,
            running_count: snapshot.running_count,
            hand_number: snapshot.hand_number,
            hands_played: snapshot.hands_played,
            player_hands: snapshot.player_hands,
            active_hand: snapshot.active_hand,
            dealer: snapshot.dealer,
            count_checks: snapshot.count_checks,
            pending_prompt: snapshot.pending_prompt,
            prompt_started_at: snapshot.prompt_start_time,
            decision_started_at: snapshot.decision_start_time,
            scheduler: PromptScheduler::from_state(snapshot.scheduler),
            started_at: snapshot.started_at,
            ended_at: snapshot.ended_at,
            log: SessionLog::new(),
            rng,
        })
    }
}
