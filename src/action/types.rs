//! Core action type definitions.
//!
//! An [`Action`] pairs a [`FunctionSpec`] (the schema fragment an LLM sees) with an
//! [`ActionHandler`] and the chaining rules used by recommendations.
//! [`ActionDefinition`] is the serializable half of an action, used by definition files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::prompt::PromptTemplate;

/// Argument mapping passed to handlers.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

/// Name, description, and JSON Schema of an action's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    #[serde(default = "empty_object_schema")]
    pub parameters: serde_json::Value,
}

fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// Executes an action.
///
/// Any `Fn(&Arguments) -> anyhow::Result<Value>` closure implements this trait.
pub trait ActionHandler {
    fn invoke(&self, arguments: &Arguments) -> anyhow::Result<serde_json::Value>;
}

impl<F> ActionHandler for F
where
    F: Fn(&Arguments) -> anyhow::Result<serde_json::Value>,
{
    fn invoke(&self, arguments: &Arguments) -> anyhow::Result<serde_json::Value> {
        self(arguments)
    }
}

/// Pin a closure to the handler signature so its argument and error types infer.
///
/// ```ignore
/// let handler = handler_fn(|args| Ok(json!({ "echo": args.get("input") })));
/// ```
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&Arguments) -> anyhow::Result<serde_json::Value>,
{
    f
}

/// A registered capability.
///
/// Two actions compare equal when their metadata matches and they share the same
/// handler instance.
#[derive(Clone)]
pub struct Action {
    pub function: FunctionSpec,
    pub handler: Arc<dyn ActionHandler>,
    /// Actions to recommend after this one, in order.
    pub suggestion_after: Vec<String>,
    /// Actions never to recommend immediately after this one.
    pub never_after: BTreeSet<String>,
    pub prompt: Option<PromptTemplate>,
}

impl Action {
    /// Create an action with an empty object parameter schema.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        Self {
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters: empty_object_schema(),
            },
            handler: Arc::new(handler),
            suggestion_after: Vec::new(),
            never_after: BTreeSet::new(),
            prompt: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn description(&self) -> &str {
        &self.function.description
    }

    /// Set the parameter schema from raw JSON Schema.
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.function.parameters = parameters;
        self
    }

    /// Derive the parameter schema from a typed argument struct.
    pub fn parameters_from<T: JsonSchema>(mut self) -> Self {
        self.function.parameters = schemars::schema_for!(T).to_value();
        self
    }

    pub fn suggest_after<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestion_after = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn never_after<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.never_after = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// The serializable part of this action.
    pub fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            function: self.function.clone(),
            suggestion_after_actions: self.suggestion_after.clone(),
            never_after_actions: self.never_after.iter().cloned().collect(),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function
            && self.suggestion_after == other.suggestion_after
            && self.never_after == other.never_after
            && self.prompt == other.prompt
            && Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("function", &self.function)
            .field("suggestion_after", &self.suggestion_after)
            .field("never_after", &self.never_after)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// Action metadata in the shape definition files use.
///
/// ```json
/// {
///   "function": { "name": "...", "description": "...", "parameters": { ... } },
///   "suggestion_after_actions": ["..."],
///   "never_after_actions": ["..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub function: FunctionSpec,
    #[serde(default)]
    pub suggestion_after_actions: Vec<String>,
    #[serde(default)]
    pub never_after_actions: Vec<String>,
}

impl ActionDefinition {
    /// Bind a handler to this definition.
    pub fn into_action(self, handler: Arc<dyn ActionHandler>) -> Action {
        Action {
            function: self.function,
            handler,
            suggestion_after: self.suggestion_after_actions,
            never_after: self.never_after_actions.into_iter().collect(),
            prompt: None,
        }
    }
}
