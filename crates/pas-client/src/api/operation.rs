use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validate::{Validate, Violation, join, one_of, push, required};

const OPS: &[&str] = &["add", "remove", "replace", "move", "copy", "test"];

/// One RFC 6902 JSON Patch operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op: Option<String>,
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Validate for Operation {
    fn collect_violations(&self, path: &str, violations: &mut Vec<Violation>) {
        match &self.op {
            Some(op) => one_of(op, OPS, path, "op", violations),
            None => push(violations, join(path, "op"), "is required"),
        }
        required(self.path.as_ref(), path, "path", violations);
    }
}
