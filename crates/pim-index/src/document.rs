use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::IndexError;

/// The `values` tree of an indexed product:
/// `"<code>-<backend_type>"` → locale token → scope token → data.
///
/// Built by merging per-value fragments; every leaf path is written once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndexDocument {
    root: Map<String, Value>,
}

impl IndexDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merges `fragment` into the document.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::PathConflict`] when the fragment writes a path
    /// that already holds data. The document is left unchanged in that case.
    pub fn merge(&mut self, fragment: Map<String, Value>) -> Result<(), IndexError> {
        let mut merged = self.root.clone();
        merge_into(&mut merged, fragment, "")?;
        self.root = merged;
        Ok(())
    }

    /// Data stored at a dotted path such as `name-varchar.en_US.<all_channels>`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

fn merge_into(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
    prefix: &str,
) -> Result<(), IndexError> {
    for (key, incoming) in source {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let Some(existing) = target.get_mut(&key) else {
            target.insert(key, incoming);
            continue;
        };

        match (existing, incoming) {
            (Value::Object(existing), Value::Object(incoming)) => {
                merge_into(existing, incoming, &path)?;
            }
            _ => return Err(IndexError::PathConflict { path }),
        }
    }
    Ok(())
}
