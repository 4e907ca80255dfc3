use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::count_check::PromptType;

/// Верхняя граница ставки: удвоенная ставка всё ещё помещается в `u32`.
pub const MAX_BET_UNIT: u32 = 1_000_000;

/// Ошибки конфигурации правил/сессии.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Количество колод должно быть от 1 до 8, получено {0}")]
    InvalidDecks(u8),

    #[error("Пенетрация должна быть в (0, 1], получено {0}")]
    InvalidPenetration(f64),

    #[error("Промпт {0:?} не подходит как промпт на счёт")]
    InvalidCountPrompt(PromptType),

    #[error("Ставка должна быть от 1 до 1000000, получено {0}")]
    InvalidBetUnit(u32),

    #[error("Окно промахов должно быть больше нуля")]
    EmptyMissRateWindow,

    #[error("Некорректный JSON конфига: {0}")]
    Parse(String),
}

/// Скорость раздачи для UI. Ядро только хранит значение и ничего не ждёт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DealSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl DealSpeed {
    /// Задержка между картами в миллисекундах.
    pub const fn delay_ms(self) -> u64 {
        match self {
            DealSpeed::Slow => 600,
            DealSpeed::Normal => 350,
            DealSpeed::Fast => 150,
        }
    }
}

/// Правила стола. Неизменяемы в рамках сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    /// Количество колод в шузе (1–8).
    pub decks: u8,
    /// H17 (true) / S17 (false).
    pub dealer_hits_soft17: bool,
    /// Дабл после сплита (DAS).
    pub double_after_split: bool,
    /// Поздняя сдача разрешена.
    pub surrender_allowed: bool,
    /// Доля шуза до отрезной карты.
    pub penetration: f64,
    pub deal_speed: DealSpeed,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_hits_soft17: true,
            double_after_split: true,
            surrender_allowed: true,
            penetration: 0.75,
            deal_speed: DealSpeed::Normal,
        }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.decks) {
            return Err(ConfigError::InvalidDecks(self.decks));
        }
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(ConfigError::InvalidPenetration(self.penetration));
        }
        Ok(())
    }

    /// Прочитать правила из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: RuleConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }
}

/// Режим тренировки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Руки доигрываются автоматически, игрок только считает.
    CountingDrill,
    /// Игрок сам принимает решения.
    #[default]
    Play,
}

/// Полный конфиг сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: SessionMode,
    pub rules: RuleConfig,
    /// Какой счёт спрашиваем в промпте: running или true.
    pub count_prompt: PromptType,
    /// Сверять ли каждое действие игрока с рекомендацией.
    pub track_decisions: bool,
    /// Ставка на руку в условных единицах.
    pub bet_unit: u32,
    /// Сколько последних промптов учитывается в доле промахов.
    pub miss_rate_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::Play,
            rules: RuleConfig::default(),
            count_prompt: PromptType::RunningCount,
            track_decisions: true,
            bet_unit: 1,
            miss_rate_window: 10,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if !self.count_prompt.is_count_prompt() {
            return Err(ConfigError::InvalidCountPrompt(self.count_prompt));
        }
        if !(1..=MAX_BET_UNIT).contains(&self.bet_unit) {
            return Err(ConfigError::InvalidBetUnit(self.bet_unit));
        }
        if self.miss_rate_window == 0 {
            return Err(ConfigError::EmptyMissRateWindow);
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: SessionConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
