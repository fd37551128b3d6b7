//! Intents the view layer dispatches to the task state manager

use serde::Deserialize;

use crate::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskIntent {
    /// Replace the list with the store's collection
    FetchAll,
    /// Create a task; callers only dispatch non-blank names
    Add { name: String },
    /// Rename a task, keeping its completion flag
    Update { id: TaskId, name: String },
    /// Set completion to `completed`, the negation of the current value
    Toggle { id: TaskId, completed: bool },
    Delete { id: TaskId },
    ClearError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_decode_from_tagged_json() {
        let intent: TaskIntent =
            serde_json::from_str(r#"{"type":"toggle","id":3,"completed":true}"#).unwrap();
        assert_eq!(intent, TaskIntent::Toggle { id: 3, completed: true });

        let intent: TaskIntent = serde_json::from_str(r#"{"type":"clear_error"}"#).unwrap();
        assert_eq!(intent, TaskIntent::ClearError);
    }
}
