//! Prompt templates attached to actions.
//!
//! A template is plain text with `{key}` placeholders. When a builder function is
//! set it produces the prompt on its own and the template text is not substituted.

use std::fmt;
use std::sync::Arc;

use super::types::Arguments;

type Builder = Arc<dyn Fn(&Arguments) -> String>;

#[derive(Clone)]
pub struct PromptTemplate {
    pub template: String,
    builder: Option<Builder>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            builder: None,
        }
    }

    /// Replace placeholder substitution with a custom builder.
    pub fn with_builder(mut self, builder: impl Fn(&Arguments) -> String + 'static) -> Self {
        self.builder = Some(Arc::new(builder));
        self
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    /// Render the prompt for `values`.
    ///
    /// String values are inserted verbatim, other JSON values in their compact JSON
    /// form. Placeholders without a matching key are left untouched.
    pub fn compose(&self, values: &Arguments) -> String {
        if let Some(builder) = &self.builder {
            return builder(values);
        }

        render(&self.template, values)
    }
}

/// Single pass over `template`; inserted values are never scanned for placeholders.
fn render(template: &str, values: &Arguments) -> String {
    let mut prompt = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        prompt.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        let key = &tail[1..close];
        match values.get(key) {
            Some(serde_json::Value::String(s)) => prompt.push_str(s),
            Some(other) => prompt.push_str(&other.to_string()),
            None => prompt.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    prompt.push_str(rest);
    prompt
}

impl PartialEq for PromptTemplate {
    fn eq(&self, other: &Self) -> bool {
        let same_builder = match (&self.builder, &other.builder) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.template == other.template && same_builder
    }
}

impl fmt::Debug for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptTemplate")
            .field("template", &self.template)
            .field("builder", &self.builder.is_some())
            .finish()
    }
}
