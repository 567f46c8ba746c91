// Command Pattern for Undo/Redo of note edits
//
// - UndoableCommand trait: execute(), undo(), description()
// - CommandManager: bounded undo/redo stacks
// - ToggleNoteCommand: the one edit the grid supports

pub mod commands;
pub mod manager;
pub mod trait_def;

pub use commands::ToggleNoteCommand;
pub use manager::CommandManager;
pub use trait_def::UndoableCommand;
