use uuid::Uuid;

/// Task identifier within the list
pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    NextTask,
    PreviousTask,

    // Row callbacks
    ToggleTask(TaskId),
    EditTask(TaskId),
    RemoveTask(TaskId),
    ChangeSubject { id: TaskId, subject: String },
    FinishEditing(TaskId),

    // List operations
    AddTask,

    // Application
    Quit,
    None,
}
