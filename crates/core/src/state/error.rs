use thiserror::Error;

/// Errors produced by [`State`](super::State) arithmetic and accessors.
///
/// Shape errors indicate a caller bug: two states that should share a shape
/// do not, or a derivative provider was handed a state it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("shape mismatch at {}: expected {expected}, found {found}", display_path(.path))]
    ShapeMismatch {
        /// Location of the first mismatching node, such as `bodies[1].vx`.
        ///
        /// Empty when the mismatch is at the root.
        path: String,
        expected: String,
        found: String,
    },
}

impl StateError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            path: String::new(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Prefixes the error path with a record field name.
    #[must_use]
    pub fn within_field(self, name: &str) -> Self {
        self.prefixed(|path| {
            if path.is_empty() || path.starts_with('[') {
                format!("{name}{path}")
            } else {
                format!("{name}.{path}")
            }
        })
    }

    /// Prefixes the error path with a sequence index.
    #[must_use]
    pub fn within_index(self, index: usize) -> Self {
        self.prefixed(|path| {
            if path.is_empty() || path.starts_with('[') {
                format!("[{index}]{path}")
            } else {
                format!("[{index}].{path}")
            }
        })
    }

    fn prefixed(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            Self::ShapeMismatch {
                path,
                expected,
                found,
            } => Self::ShapeMismatch {
                path: f(&path),
                expected,
                found,
            },
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "(root)" } else { path }
}
