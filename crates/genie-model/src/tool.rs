//! Tool registry for model-invoked local operations
//!
//! The model may decide, mid-conversation, to invoke one of a declared set
//! of operations. The registry maps a stable string identifier to a local
//! handler plus the declaration advertised to the model. Handlers are
//! deterministic and synchronous; they take the model-supplied argument
//! object and return a JSON result that is fed back into the conversation.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A callable operation advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolDeclaration {
    /// Stable identifier the model uses to invoke the tool
    pub name: String,
    /// What the tool does, phrased for the model
    pub description: String,
    /// JSON-schema-shaped parameter specification
    pub parameters: Value,
}

type ToolHandler = Box<dyn Fn(&Value) -> Value + Send + Sync>;

struct ToolEntry {
    declaration: ToolDeclaration,
    handler: ToolHandler,
}

/// Registry of locally-executable tools
///
/// At most one meaningful tool exists in this system (`save_feature_file`),
/// but the registry keeps the capability set open and the dispatch explicit
/// and testable in isolation from any model call.
#[derive(Default)]
pub struct ToolRegistry {
    entries: HashMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name
    ///
    /// Re-registering a name replaces the previous entry.
    pub fn register<F>(&mut self, declaration: ToolDeclaration, handler: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(
            declaration.name.clone(),
            ToolEntry {
                declaration,
                handler: Box::new(handler),
            },
        );
    }

    /// Declarations to advertise to the model
    #[must_use]
    pub fn declarations(&self) -> Vec<&ToolDeclaration> {
        self.entries.values().map(|e| &e.declaration).collect()
    }

    /// Execute the named tool against the given arguments
    ///
    /// Returns `None` for an unknown name; callers decide how to surface
    /// that to the model.
    #[must_use]
    pub fn dispatch(&self, name: &str, args: &Value) -> Option<Value> {
        self.entries.get(name).map(|e| (e.handler)(args))
    }

    /// Whether no tools are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered tools
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
