use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::Todo;
use crate::validate::{validate_create, validate_update};

/// Per-user todo lists held in memory.
///
/// A user appears on their first successful create and is never removed;
/// `delete_all_todos` only empties the list.
#[derive(Debug, Default, Clone)]
pub struct TodoStore {
    users: HashMap<String, Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.users.contains_key(user)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of todos for `user`, `None` if the user is unknown.
    pub fn len(&self, user: &str) -> Option<usize> {
        self.users.get(user).map(Vec::len)
    }

    pub fn list_todos(&self, user: &str) -> Result<&[Todo], StoreError> {
        self.users
            .get(user)
            .map(Vec::as_slice)
            .ok_or(StoreError::UserNotFound)
    }

    pub fn get_todo(&self, user: &str, id: &str) -> Result<&Todo, StoreError> {
        self.users
            .get(user)
            .and_then(|todos| todos.iter().find(|todo| todo.id == id))
            .ok_or(StoreError::TodoNotFound)
    }

    /// Validate `body` and append a new todo for `user`, creating the user
    /// entry if needed.
    pub fn create_todo(&mut self, user: &str, body: &Value) -> Result<Todo, StoreError> {
        let new = validate_create(body)?;
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.users
            .entry(user.to_string())
            .or_default()
            .push(todo.clone());
        debug!(user, todo_id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Lookup happens before validation: a missing todo wins over a bad body.
    pub fn update_todo(&mut self, user: &str, id: &str, body: &Value) -> Result<Todo, StoreError> {
        let todo = self.find_mut(user, id)?;
        let patch = validate_update(body)?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(status) = patch.status {
            todo.status = status;
        }
        todo.updated_at = not_before(Utc::now(), todo.updated_at);
        debug!(user, todo_id = id, "todo updated");
        Ok(todo.clone())
    }

    pub fn delete_todo(&mut self, user: &str, id: &str) -> Result<Todo, StoreError> {
        let todos = self.users.get_mut(user).ok_or(StoreError::TodoNotFound)?;
        let index = todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::TodoNotFound)?;
        let removed = todos.remove(index);
        debug!(user, todo_id = id, "todo deleted");
        Ok(removed)
    }

    /// Empty the user's list, returning how many todos were removed.
    pub fn delete_all_todos(&mut self, user: &str) -> Result<usize, StoreError> {
        let todos = self.users.get_mut(user).ok_or(StoreError::UserNotFound)?;
        let removed = std::mem::take(todos).len();
        debug!(user, removed, "todos cleared");
        Ok(removed)
    }

    fn find_mut(&mut self, user: &str, id: &str) -> Result<&mut Todo, StoreError> {
        self.users
            .get_mut(user)
            .and_then(|todos| todos.iter_mut().find(|todo| todo.id == id))
            .ok_or(StoreError::TodoNotFound)
    }
}

/// Clamp `now` so timestamps never run backwards if the wall clock does.
fn not_before(now: DateTime<Utc>, floor: DateTime<Utc>) -> DateTime<Utc> {
    now.max(floor)
}
