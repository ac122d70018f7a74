/// In-memory task storage
///
/// Owns the task list and the id counter. Ids start at 1 and are never
/// reused, even after deletion: the counter only moves forward. The store is
/// owned by exactly one `TaskService` instance; there is no shared or static
/// state.
use crate::model::Task;

/// Task storage with auto-increment ids
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store; the first inserted task gets id 1
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Inserts a new task and returns a reference to it
    pub fn insert(&mut self, title: String, description: Option<String>) -> &Task {
        let task = Task::new(self.next_id, title, description);
        self.next_id += 1;
        self.tasks.push(task);
        // Just pushed, cannot be empty
        self.tasks.last().unwrap()
    }

    /// All tasks in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Looks up a task by id for mutation
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Removes a task by id
    ///
    /// Returns the removed task, or `None` if no task has that id. The id is
    /// retired either way; it will never be assigned again.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no tasks are stored
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
