use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::{EmbeddingError, EmbeddingResult};

/// Bounded pool for CPU-bound inference.
///
/// At most `size` jobs run at once, each on tokio's blocking thread pool,
/// so model calls never stall the async reactor. Callers beyond the limit
/// wait for a permit.
#[derive(Debug, Clone)]
pub struct InferencePool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl InferencePool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Permits not currently held by a running job.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn run<F, T>(&self, job: F) -> EmbeddingResult<T>
    where
        F: FnOnce() -> EmbeddingResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EmbeddingError::internal("inference pool is closed"))?;

        // The permit travels with the job so it is held until the model call
        // returns, even if the awaiting request is dropped.
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        });

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => {
                tracing::error!("Inference worker panicked");
                Err(EmbeddingError::internal("inference worker panicked"))
            }
            Err(e) => Err(EmbeddingError::internal(format!(
                "inference worker failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_runs_job_and_returns_value() {
        let pool = InferencePool::new(2);
        let value = pool.run(|| Ok(21 * 2)).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_job_error_is_passed_through() {
        let pool = InferencePool::new(1);
        let err = pool
            .run(|| Err::<(), _>(EmbeddingError::internal("bad weights")))
            .await
            .unwrap_err();
        assert_eq!(err, EmbeddingError::internal("bad weights"));
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let pool = InferencePool::new(1);
        let err = pool
            .run(|| -> EmbeddingResult<()> { panic!("worker exploded") })
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Internal(_)));
        // Permit is released after the panic.
        assert_eq!(pool.available(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        let pool = InferencePool::new(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let pool = pool.clone();
            let running = running.clone();
            let peak = peak.clone();
            tasks.push(tokio::spawn(async move {
                pool.run(move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_zero_size_is_clamped() {
        assert_eq!(InferencePool::new(0).size(), 1);
    }
}
