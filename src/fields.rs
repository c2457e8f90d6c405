use std::{collections::HashSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// A named authoring field (e.g. `SurfaceType.Transparent`) that a shader
/// variant either has active or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub tag: String,
    pub name: String,
}

impl FieldDescriptor {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
        }
    }

    /// `tag.name`, or just `name` for untagged fields.
    pub fn qualified_name(&self) -> String {
        if self.tag.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.tag, self.name)
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Answers whether a field is active for the variant being generated.
pub trait FieldContext {
    fn is_active(&self, field: &FieldDescriptor) -> bool;
}

impl<F> FieldContext for F
where
    F: Fn(&FieldDescriptor) -> bool,
{
    fn is_active(&self, field: &FieldDescriptor) -> bool {
        self(field)
    }
}

/// Holds when the field's activity matches `condition`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldCondition {
    pub field: Arc<FieldDescriptor>,
    pub condition: bool,
}

impl FieldCondition {
    pub fn new(field: Arc<FieldDescriptor>, condition: bool) -> Self {
        Self { field, condition }
    }

    pub fn is_set(field: Arc<FieldDescriptor>) -> Self {
        Self::new(field, true)
    }

    pub fn is_unset(field: Arc<FieldDescriptor>) -> Self {
        Self::new(field, false)
    }

    pub fn evaluate(&self, ctx: &(impl FieldContext + ?Sized)) -> bool {
        ctx.is_active(&self.field) == self.condition
    }
}

/// The set of fields active for one shader variant, keyed by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFields {
    names: HashSet<String>,
}

impl ActiveFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &FieldDescriptor) -> bool {
        self.names.insert(field.qualified_name())
    }

    pub fn contains(&self, field: &FieldDescriptor) -> bool {
        self.names.contains(&field.qualified_name())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FieldContext for ActiveFields {
    fn is_active(&self, field: &FieldDescriptor) -> bool {
        self.contains(field)
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
