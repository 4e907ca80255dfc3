//! Доменная модель тренажёра: карты, шуз, правила, руки, записи проверок счёта.

pub mod card;
pub mod count_check;
pub mod hand;
pub mod rules;
pub mod shoe;

/// Идентификатор сессии (UUID v4 в текстовом виде).
pub type SessionId = String;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use count_check::*;
pub use hand::*;
pub use rules::*;
pub use shoe::*;
