// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod settings;
pub mod todo;
pub mod user;

pub use settings::{SettingsPatch, UserSettings};
pub use todo::{NewTodo, Todo, TodoPatch};
pub use user::User;
