use std::collections::HashMap;

use crate::domain::SessionId;
use crate::state::{SessionRecord, SessionSnapshot};

/// Абстракция хранилища для тренажёра.
///
/// Реальное хранилище (файлы, IndexedDB, SQLite) — внешний коллаборатор.
/// Эта абстракция удобна:
/// - для юнит- и интеграционных тестов,
/// - для headless-симуляций.
pub trait SessionStorage {
    /// Загрузить снапшот живой сессии.
    fn load_snapshot(&self, id: &str) -> Option<SessionSnapshot>;

    /// Сохранить / перезаписать снапшот.
    fn save_snapshot(&mut self, snapshot: &SessionSnapshot);

    /// Удалить снапшот (сессия завершена).
    fn clear_snapshot(&mut self, id: &str);

    /// Добавить запись в историю.
    fn append_record(&mut self, record: &SessionRecord);

    /// История в порядке добавления.
    fn records(&self) -> Vec<SessionRecord>;
}

/// Простая in-memory реализация для тестов и локального запуска.
/// Снапшоты хранятся в JSON, чтобы проверять и форму сериализации.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    snapshots: HashMap<SessionId, String>,
    records: Vec<SessionRecord>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn load_snapshot(&self, id: &str) -> Option<SessionSnapshot> {
        self.snapshots
            .get(id)
            .and_then(|json| SessionSnapshot::from_json(json).ok())
    }

    fn save_snapshot(&mut self, snapshot: &SessionSnapshot) {
        match snapshot.to_json() {
            Ok(json) => {
                self.snapshots.insert(snapshot.session_id.clone(), json);
            }
            Err(e) => tracing::warn!(
                session_id = %snapshot.session_id,
                error = %e,
                "snapshot not serializable"
            ),
        }
    }

    fn clear_snapshot(&mut self, id: &str) {
        self.snapshots.remove(id);
    }

    fn append_record(&mut self, record: &SessionRecord) {
        self.records.push(record.clone());
    }

    fn records(&self) -> Vec<SessionRecord> {
        self.records.clone()
    }
}
