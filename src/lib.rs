//! Тренажёр счёта карт в блэкджеке.
//!
//! Ядро — `engine::TrainingSession`: шуз, раздача, базовая стратегия
//! с отклонениями по true count, Hi-Lo счёт и адаптивные проверки счёта.
//! UI, звук и хранилище — внешние коллабораторы; наружу смотрят
//! `api` (команды и представление) и `state` (снапшоты и история).

pub mod analysis;
pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;

pub use api::{execute_command, ApiError, Command, CommandResponse, SessionViewDto};
pub use domain::rules::{RuleConfig, SessionConfig, SessionMode};
pub use engine::{RandomSource, SessionError, SessionPhase, TrainingSession};
pub use state::{SessionRecord, SessionSnapshot};
