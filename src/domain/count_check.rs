use serde::{Deserialize, Serialize};

use crate::domain::hand::Decision;
use crate::domain::SessionId;

/// Тип промпта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PromptType {
    #[default]
    RunningCount,
    TrueCount,
    /// Проверка решения по руке (не участвует в адаптации каденса).
    BestAction,
}

impl PromptType {
    pub const fn is_count_prompt(self) -> bool {
        matches!(self, PromptType::RunningCount | PromptType::TrueCount)
    }
}

/// Одна запись ответа игрока. После создания не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CountCheck {
    pub session_id: SessionId,
    pub hand_number: u32,
    pub prompt_type: PromptType,
    pub expected_count: i32,
    pub entered_count: i32,
    pub response_ms: u64,
    pub is_correct: bool,
    /// entered − expected (для BestAction всегда 0).
    pub delta: i32,
    /// Только для BestAction.
    pub expected_action: Option<Decision>,
    pub entered_action: Option<Decision>,
    pub created_at: u64,
}

/// Итоги сессии по промптам на счёт.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub total_prompts: u32,
    pub correct_prompts: u32,
    /// Доля верных ответов в [0, 1]; 0 если промптов не было.
    pub accuracy: f64,
    pub avg_response_ms: u64,
    /// Самая длинная серия верных ответов подряд.
    pub longest_streak: u32,
    pub total_decisions: u32,
    pub correct_decisions: u32,
    pub decision_accuracy: f64,
}
