use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::SessionId;

/// Номер запроса к воркеру анализа.
pub type RequestId = u64;

/// Новый идентификатор сессии. История переживает перезапуск
/// приложения, поэтому счётчик тут не годится — берём UUID v4.
pub fn new_session_id() -> SessionId {
    uuid::Uuid::new_v4().to_string()
}

/// Монотонные счётчики для локальных идентификаторов (запросы анализа).
#[derive(Debug)]
pub struct IdGenerator {
    request_counter: AtomicU64,
}

impl IdGenerator {
    /// Генератор с начальным значением 1.
    pub fn new() -> Self {
        Self {
            request_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_request_id(&self) -> RequestId {
        self.request_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
