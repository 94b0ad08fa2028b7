//! Resource management

use crate::error::DecimatorError;

use tokio::sync::{Semaphore, SemaphorePermit};

/// [crate::resource_manager::ResourceManager] bounds the number of file reads that run
/// concurrently. Each read holds a task permit from a Tokio Semaphore while it parses and reduces
/// a file.
#[derive(Debug)]
pub struct ResourceManager {
    /// Optional semaphore for tasks.
    tasks: Option<Semaphore>,
}

impl ResourceManager {
    /// Returns a new ResourceManager object.
    ///
    /// # Arguments
    ///
    /// * `task_limit`: Optional maximum number of concurrent tasks
    pub fn new(task_limit: Option<usize>) -> Self {
        Self {
            tasks: task_limit.map(Semaphore::new),
        }
    }

    /// Acquire a task resource.
    pub async fn task(&self) -> Result<Option<SemaphorePermit>, DecimatorError> {
        optional_acquire(&self.tasks).await
    }
}

/// Acquire a permit on an optional Semaphore, if present.
async fn optional_acquire(
    sem: &Option<Semaphore>,
) -> Result<Option<SemaphorePermit>, DecimatorError> {
    if let Some(sem) = sem {
        sem.acquire().await.map(Some).map_err(|err| err.into())
    } else {
        Ok(None)
    }
}
