//! Reusable UI components

pub mod checkbox;
pub mod editable_label;
pub mod status_bar;
pub mod task_list;
pub mod task_row;

// Component exports
pub use checkbox::{CheckboxToggle, CheckedState, ReconcilePolicy};
pub use editable_label::{EditableLabel, LabelEvent, LabelMode, TextField};
pub use status_bar::StatusBar;
pub use task_list::{Task, TaskListComponent};
pub use task_row::{RowEvent, RowRegion, TaskRow, TaskRowCallbacks, TaskRowProps};
