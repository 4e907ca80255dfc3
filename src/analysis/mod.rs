//! Параллельный анализ статистики сессии (риск разорения, EV и т.п.).
//!
//! Сам оценщик — внешний коллаборатор, он реализует `Analyzer`.
//! Здесь только транспорт: очередь запросов, отмена, остановка.

pub mod worker;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::count_check::SessionSummary;
use crate::domain::rules::RuleConfig;
use crate::domain::SessionId;
use crate::engine::{RandomSource, TrainingSession};

pub use worker::{AnalysisWorker, PendingAnalysis};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Запрос анализа отменён")]
    Cancelled,

    #[error("Воркер анализа остановлен")]
    Terminated,

    #[error("Анализ завершился ошибкой: {0}")]
    Failed(String),
}

/// Снимок статистики сессии — единственное, что уходит в воркер.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    pub session_id: SessionId,
    pub rules: RuleConfig,
    pub hands_played: u32,
    pub summary: SessionSummary,
    pub recent_miss_rate: f64,
}

impl SessionStats {
    pub fn from_session<R: RandomSource>(session: &TrainingSession<R>) -> Self {
        Self {
            session_id: session.id().to_string(),
            rules: session.rules().clone(),
            hands_played: session.hands_played(),
            summary: session.summary(),
            recent_miss_rate: session.recent_miss_rate(),
        }
    }
}

/// Оценщик, который выполняется в воркере.
///
/// Долгие реализации должны периодически проверять `cancel`
/// и возвращать `AnalysisError::Cancelled`.
pub trait Analyzer: Send + Sync + 'static {
    type Output: Send + 'static;

    fn analyze(
        &self,
        stats: &SessionStats,
        cancel: &CancellationToken,
    ) -> Result<Self::Output, AnalysisError>;
}
