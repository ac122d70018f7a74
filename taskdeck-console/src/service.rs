/// Task operations over the in-memory store
///
/// One `TaskService` instance owns the store for the life of the process.
/// Every operation validates its inputs through `validate` and returns a
/// typed result; the menu loop only formats outcomes.
use crate::model::Task;
use crate::store::TaskStore;
use crate::validate::{self, ValidationError};

/// Failure modes for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Input failed validation
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// No task with the given id
    #[error("Task with ID {0} not found")]
    NotFound(u64),
}

/// Single-user task service owning the in-memory store
#[derive(Debug, Default)]
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    /// Creates a service with an empty store
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
        }
    }

    /// Adds a task and returns a clone of the stored record
    ///
    /// # Errors
    ///
    /// Validation failures for the title or description
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<Task, ServiceError> {
        let title = validate::validate_title(title)?;
        let description = validate::validate_description(description)?;

        let task = self.store.insert(title, description).clone();
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    /// All tasks in creation order
    pub fn list_tasks(&self) -> &[Task] {
        self.store.all()
    }

    /// Looks up a task by id
    pub fn get_task(&self, id: u64) -> Result<&Task, ServiceError> {
        self.store.get(id).ok_or(ServiceError::NotFound(id))
    }

    /// Updates title and/or description
    ///
    /// `None` fields keep their current value, mirroring the web backend's
    /// selective update. A provided title must still pass validation.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, validation failures for provided fields
    pub fn update_task(
        &mut self,
        id: u64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Task, ServiceError> {
        // Validate before touching the task so a bad field leaves it unchanged
        let title = title.map(validate::validate_title).transpose()?;
        let description = description
            .map(validate::validate_description)
            .transpose()?;

        let task = self
            .store
            .get_mut(id)
            .ok_or(ServiceError::NotFound(id))?;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }

        Ok(task.clone())
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown or already-deleted id
    pub fn delete_task(&mut self, id: u64) -> Result<Task, ServiceError> {
        let task = self.store.remove(id).ok_or(ServiceError::NotFound(id))?;
        tracing::debug!(id, "task deleted");
        Ok(task)
    }

    /// Flips a task's completion flag
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id
    pub fn toggle_completion(&mut self, id: u64) -> Result<Task, ServiceError> {
        let task = self
            .store
            .get_mut(id)
            .ok_or(ServiceError::NotFound(id))?;

        task.completed = !task.completed;
        Ok(task.clone())
    }
}
