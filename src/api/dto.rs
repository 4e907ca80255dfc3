use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::count_check::{PromptType, SessionSummary};
use crate::domain::hand::{Decision, HandOutcome};
use crate::domain::rules::SessionMode;
use crate::domain::SessionId;
use crate::engine::SessionPhase;

/// DTO руки игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerHandDto {
    pub cards: Vec<Card>,
    pub total: u8,
    pub is_soft: bool,
    pub bet: u32,
    pub is_split: bool,
    pub is_doubled: bool,
    pub outcome: Option<HandOutcome>,
    pub is_active: bool,
}

/// DTO сессии для UI. Счёт не показывается — его и тренируем.
/// Закрытая карта дилера скрыта до вскрытия.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionViewDto {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub mode: SessionMode,
    pub hand_number: u32,
    pub hands_played: u32,
    pub player_hands: Vec<PlayerHandDto>,
    /// Видимые карты дилера.
    pub dealer_cards: Vec<Card>,
    /// Сумма видимых карт дилера.
    pub dealer_total: u8,
    pub hole_card_hidden: bool,
    /// Доступные сейчас действия (пусто вне хода игрока).
    pub available_actions: Vec<Decision>,
    pub pending_prompt: Option<PromptType>,
    pub cards_remaining: usize,
    pub deal_delay_ms: u64,
    pub summary: SessionSummary,
}
