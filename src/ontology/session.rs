//! Records of the types and instances created while a session is current.
//!
//! Sessions form a stack owned by the caller. The bottom entry is the default
//! session and is never removed; scoped sessions are pushed with
//! [`SessionStack::enter`] or [`SessionStack::scoped`] and are popped on every
//! exit path, unwinding included.

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use super::instance::InstanceRef;
use super::statement::TypeKind;
use super::value_objects::Iri;

/// Non-owning record of a created type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeEntry {
    pub name: String,
    pub uri: Iri,
    pub kind: TypeKind,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    types: Vec<TypeEntry>,
    instances: Vec<InstanceRef>,
}

impl Session {
    pub fn register_type(&mut self, entry: TypeEntry) {
        self.types.push(entry);
    }

    pub fn register_instance(&mut self, instance: InstanceRef) {
        self.instances.push(instance);
    }

    /// Types recorded in this session, classes and properties alike.
    #[must_use]
    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    #[must_use]
    pub fn instances(&self) -> &[InstanceRef] {
        &self.instances
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.instances.is_empty()
    }

    /// Forgets every record. Instances created earlier stay usable.
    pub fn clear(&mut self) {
        self.types.clear();
        self.instances.clear();
    }

    /// Moves the records of `other` into this session.
    pub fn absorb(&mut self, other: Session) {
        self.types.extend(other.types);
        self.instances.extend(other.instances);
    }
}

/// Stack of sessions; the top one is current.
#[derive(Debug)]
pub struct SessionStack {
    sessions: Vec<Session>,
}

impl Default for SessionStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStack {
    /// Creates a stack holding only the default session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: vec![Session::default()],
        }
    }

    #[must_use]
    pub fn current(&self) -> &Session {
        // The default session is never popped.
        &self.sessions[self.sessions.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Session {
        let top = self.sessions.len() - 1;
        &mut self.sessions[top]
    }

    /// The default session at the bottom of the stack.
    #[must_use]
    pub fn default_session(&self) -> &Session {
        &self.sessions[0]
    }

    /// Number of sessions, the default one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.sessions.len()
    }

    /// Pushes a fresh session that stays current until the returned guard is
    /// finished or dropped.
    pub fn enter(&mut self) -> SessionScope<'_> {
        let index = self.sessions.len();
        self.sessions.push(Session::default());
        tracing::trace!(depth = index + 1, "session_entered");
        SessionScope { stack: self, index }
    }

    /// Runs `f` with a fresh current session and returns its result together
    /// with the session it populated.
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut SessionStack) -> T) -> (T, Session) {
        let mut scope = self.enter();
        let output = f(&mut scope);
        (output, scope.finish())
    }
}

/// Guard keeping a scoped session current.
#[derive(Debug)]
pub struct SessionScope<'a> {
    stack: &'a mut SessionStack,
    index: usize,
}

impl SessionScope<'_> {
    /// Pops the scoped session and hands it back.
    #[must_use]
    pub fn finish(self) -> Session {
        self.stack.sessions.truncate(self.index + 1);
        self.stack.sessions.pop().unwrap_or_default()
    }
}

impl Deref for SessionScope<'_> {
    type Target = SessionStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for SessionScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for SessionScope<'_> {
    fn drop(&mut self) {
        self.stack.sessions.truncate(self.index);
        tracing::trace!(depth = self.stack.sessions.len(), "session_exited");
    }
}
