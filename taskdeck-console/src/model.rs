/// In-memory task record for the console demo
///
/// Unrelated to the web backend's persisted Task: ids are process-local
/// integers, there is no owner, and everything is discarded at exit.

/// A single task in the in-memory list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Process-local id, assigned once, never reused
    pub id: u64,

    /// Title, non-empty, at most 200 characters
    pub title: String,

    /// Optional description, at most 500 characters
    pub description: Option<String>,

    /// Completion flag, false on creation
    pub completed: bool,
}

impl Task {
    /// Creates an active task
    pub fn new(id: u64, title: String, description: Option<String>) -> Self {
        Self {
            id,
            title,
            description,
            completed: false,
        }
    }
}
