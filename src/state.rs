//! Сохраняемые формы состояния: снапшот живой сессии и запись истории.
//!
//! Само хранилище — внешний коллаборатор (см. `infra::persistence`),
//! но форма данных — часть контракта ядра.

use serde::{Deserialize, Serialize};

use crate::domain::count_check::{CountCheck, PromptType, SessionSummary};
use crate::domain::hand::{DealerHand, PlayerHand};
use crate::domain::rules::{RuleConfig, SessionConfig, SessionMode};
use crate::domain::shoe::ShoeState;
use crate::domain::SessionId;
use crate::engine::scheduler::SchedulerState;
use crate::engine::state_machine::SessionPhase;

/// Снапшот TrainingSession: всё, что нужно, чтобы восстановить сессию
/// (в том числе посреди раздачи). Шуз восстанавливается без перемешивания.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub paused_from: Option<SessionPhase>,
    pub config: SessionConfig,
    pub running_count: i32,
    pub hand_number: u32,
    pub hands_played: u32,
    pub count_checks: Vec<CountCheck>,
    pub pending_prompt: Option<PromptType>,
    pub prompt_start_time: Option<u64>,
    pub decision_start_time: Option<u64>,
    pub paused_at: Option<u64>,
    pub shoe: Option<ShoeState>,
    pub scheduler: SchedulerState,
    pub player_hands: Vec<PlayerHand>,
    pub active_hand: usize,
    pub dealer: DealerHand,
    pub started_at: Option<u64>,
    pub ended_at: Option<u64>,
    pub saved_at: u64,
}

impl SessionSnapshot {
    pub fn mode(&self) -> SessionMode {
        self.config.mode
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Запись истории о завершённой сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub mode: SessionMode,
    pub rules: RuleConfig,
    pub started_at: u64,
    pub ended_at: u64,
    pub hands_played: u32,
    pub count_checks: Vec<CountCheck>,
    pub summary: SessionSummary,
}
