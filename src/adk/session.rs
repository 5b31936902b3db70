// SPDX-License-Identifier: MIT

//! Run-scoped session shared by every agent and tool in a workflow run.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Shared state for one workflow run.
///
/// Holds the user's input, a string-keyed map of JSON values, and the
/// loop-exit flag. The state lives from run start to run end; writers either
/// overwrite a key or extend the list stored under it. Access goes through a
/// mutex so parallel sub-agents can share one session.
pub struct Session {
    id: String,
    input: String,
    state: Mutex<HashMap<String, Value>>,
    exit_requested: AtomicBool,
}

impl Session {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            input: input.into(),
            state: Mutex::new(HashMap::new()),
            exit_requested: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The user message this run was started with.
    pub fn input(&self) -> &str {
        &self.input
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of a state value.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Overwrite a state value.
    pub fn set(&self, key: &str, value: Value) {
        self.lock().insert(key.to_string(), value);
    }

    /// Append a value to the list stored under `field`.
    ///
    /// An absent key (or one holding a non-list) becomes a one-element list.
    pub fn append(&self, field: &str, value: Value) {
        let mut state = self.lock();
        match state.get_mut(field) {
            Some(Value::Array(items)) => items.push(value),
            _ => {
                state.insert(field.to_string(), Value::Array(vec![value]));
            }
        }
    }

    /// Ask the innermost running loop to stop.
    pub fn request_exit(&self) {
        self.exit_requested.store(true, Ordering::SeqCst);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }

    /// Consume the exit request, clearing the flag.
    pub fn take_exit_request(&self) -> bool {
        self.exit_requested.swap(false, Ordering::SeqCst)
    }

    /// Copy the full state into a JSON object.
    pub fn snapshot(&self) -> Value {
        let state = self.lock();
        Value::Object(
            state
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        )
    }
}
