use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::api;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl PatchOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    #[must_use]
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            from: None,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            from: None,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            from: None,
            value: None,
        }
    }

    /// Guards the rest of the patch: the service rejects the whole document
    /// when `path` does not hold `value`.
    #[must_use]
    pub fn test(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Test,
            path: path.into(),
            from: None,
            value: Some(value),
        }
    }
}

/// A JSON Patch document applied to a threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Patch(pub Vec<PatchOperation>);

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, operation: PatchOperation) -> Self {
        self.0.push(operation);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }
}

impl From<Vec<PatchOperation>> for Patch {
    fn from(value: Vec<PatchOperation>) -> Self {
        Self(value)
    }
}

impl From<&PatchOperation> for api::Operation {
    fn from(value: &PatchOperation) -> Self {
        Self {
            op: Some(value.op.as_str().to_string()),
            path: Some(value.path.clone()),
            from: value.from.clone(),
            value: value.value.clone(),
        }
    }
}

impl From<&Patch> for Vec<api::Operation> {
    fn from(value: &Patch) -> Self {
        value.0.iter().map(api::Operation::from).collect()
    }
}
