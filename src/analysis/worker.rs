use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::analysis::{AnalysisError, Analyzer, SessionStats};
use crate::infra::ids::{IdGenerator, RequestId};

type Reply<O> = oneshot::Sender<Result<O, AnalysisError>>;

struct Job<O> {
    id: RequestId,
    stats: SessionStats,
    cancel: CancellationToken,
    reply: Reply<O>,
}

/// Ожидаемый результат анализа.
pub struct PendingAnalysis<O> {
    id: RequestId,
    rx: oneshot::Receiver<Result<O, AnalysisError>>,
}

impl<O> PendingAnalysis<O> {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Дождаться результата. Если воркер остановлен — `Terminated`.
    pub async fn wait(self) -> Result<O, AnalysisError> {
        self.rx.await.unwrap_or(Err(AnalysisError::Terminated))
    }
}

/// Фоновый воркер анализа.
///
/// Запросы обрабатываются по одному, сам анализ идёт в blocking-пуле.
/// Общего изменяемого состояния с сессией нет: на вход — снимок
/// статистики, на выход — результат или ошибка.
pub struct AnalysisWorker<A: Analyzer> {
    tx: mpsc::UnboundedSender<Job<A::Output>>,
    pending: Arc<Mutex<HashMap<RequestId, CancellationToken>>>,
    ids: IdGenerator,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl<A: Analyzer> AnalysisWorker<A> {
    /// Запустить воркер. Вызывать внутри tokio runtime.
    pub fn spawn(analyzer: A) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(Mutex::new(HashMap::new()));
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run_worker(
            Arc::new(analyzer),
            rx,
            Arc::clone(&pending),
            shutdown.clone(),
        ));

        Self {
            tx,
            pending,
            ids: IdGenerator::new(),
            shutdown,
            task,
        }
    }

    /// Поставить запрос в очередь.
    pub fn submit(&self, stats: SessionStats) -> Result<PendingAnalysis<A::Output>, AnalysisError> {
        if self.shutdown.is_cancelled() {
            return Err(AnalysisError::Terminated);
        }

        let id = self.ids.next_request_id();
        let cancel = self.shutdown.child_token();
        let (reply, rx) = oneshot::channel();

        lock(&self.pending).insert(id, cancel.clone());
        self.tx
            .send(Job {
                id,
                stats,
                cancel,
                reply,
            })
            .map_err(|_| {
                lock(&self.pending).remove(&id);
                AnalysisError::Terminated
            })?;

        Ok(PendingAnalysis { id, rx })
    }

    /// Отменить конкретный запрос. `false` — такого запроса уже нет.
    pub fn cancel(&self, id: RequestId) -> bool {
        match lock(&self.pending).get(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Остановить воркер: все ожидающие запросы получат `Terminated`.
    pub fn terminate(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        lock(&self.pending).clear();
        debug!("analysis worker terminated");
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    pub fn is_terminated(&self) -> bool {
        self.shutdown.is_cancelled() || self.task.is_finished()
    }
}

impl<A: Analyzer> Drop for AnalysisWorker<A> {
    fn drop(&mut self) {
        self.terminate();
    }
}

async fn run_worker<A: Analyzer>(
    analyzer: Arc<A>,
    mut rx: mpsc::UnboundedReceiver<Job<A::Output>>,
    pending: Arc<Mutex<HashMap<RequestId, CancellationToken>>>,
    shutdown: CancellationToken,
) {
    loop {
        let job = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let Job { id, stats, cancel, reply } = job;

        let result = if cancel.is_cancelled() {
            Err(AnalysisError::Cancelled)
        } else {
            let analyzer = Arc::clone(&analyzer);
            let token = cancel.clone();
            tokio::task::spawn_blocking(move || analyzer.analyze(&stats, &token))
                .await
                .unwrap_or_else(|e| Err(AnalysisError::Failed(e.to_string())))
        };

        let result = if shutdown.is_cancelled() {
            Err(AnalysisError::Terminated)
        } else {
            result
        };

        lock(&pending).remove(&id);
        debug!(request_id = id, ok = result.is_ok(), "analysis request finished");
        // Получатель мог уже уйти — это не ошибка воркера.
        let _ = reply.send(result);
    }
    // Очередь дропается вместе с rx: оставшиеся запросы получат Terminated.
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
