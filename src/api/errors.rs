use serde::{Deserialize, Serialize};

use crate::engine::SessionError;

/// Ошибки внешнего API (то, что отдаём UI).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Нарушение инварианта: UI и ядро рассинхронизированы.
    /// Клиент должен перечитать состояние, а не повторять команду.
    OutOfSync(String),

    /// Действие недоступно для текущей руки.
    InvalidCommand(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        if err.is_invariant_violation() {
            ApiError::OutOfSync(err.to_string())
        } else {
            match err {
                SessionError::Config(e) => ApiError::BadRequest(e.to_string()),
                e @ (SessionError::ShoeState(_)
                | SessionError::ShoeDecksMismatch { .. }
                | SessionError::UnrestorablePhase { .. }) => ApiError::BadRequest(e.to_string()),
                other => ApiError::InvalidCommand(other.to_string()),
            }
        }
    }
}
