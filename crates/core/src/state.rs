//! Shape-polymorphic numeric state.
//!
//! A [`State`] is the numeric configuration of a physical system at one
//! instant. It is a tree whose leaves are `f64` values and whose interior
//! nodes are either ordered sequences or records of named fields:
//!
//! ```text
//! Scalar(1.0)
//! Sequence([Scalar(1.0), Scalar(2.0)])
//! Record({ "x": Scalar(100.0), "v": Scalar(0.0) })
//! ```
//!
//! Arithmetic is element-wise over the leaves. Binary operations require both
//! operands to have the same shape and fail fast with
//! [`StateError::ShapeMismatch`] otherwise. All operations return new values
//! and never mutate their operands.

mod error;
mod leaves;

use std::{collections::BTreeMap, fmt};

pub use error::StateError;
pub use leaves::Leaves;

/// A numeric value that is a scalar, a sequence, or a record of states.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum State {
    /// A single real number.
    Scalar(f64),

    /// An ordered, fixed-length list of states.
    Sequence(Vec<State>),

    /// Named fields, each holding a state.
    ///
    /// Field order is irrelevant; iteration follows key order.
    Record(BTreeMap<String, State>),
}

impl State {
    /// Builds a record from `(name, value)` pairs.
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<State>,
        I: IntoIterator<Item = (K, V)>,
    {
        State::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the leaf-wise sum `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if the operands differ in shape.
    pub fn add(&self, other: &State) -> Result<State, StateError> {
        self.zip_with(other, &|a, b| a + b)
    }

    /// Returns `self + other * k` without materializing `other * k`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if the operands differ in shape.
    pub fn add_scaled(&self, other: &State, k: f64) -> Result<State, StateError> {
        self.zip_with(other, &|a, b| a + b * k)
    }

    /// Returns a state of the same shape with every leaf multiplied by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> State {
        self.map(&|x| x * k)
    }

    /// Returns the root-mean-square of the leaf-wise differences.
    ///
    /// A state with no leaves (an empty sequence or record) has distance `0`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if the operands differ in shape.
    pub fn distance(&self, other: &State) -> Result<f64, StateError> {
        let diff = self.zip_with(other, &|a, b| a - b)?;

        let (count, sum_sq) = diff
            .leaves()
            .fold((0_usize, 0.0), |(n, sum), x| (n + 1, sum + x * x));

        if count == 0 {
            return Ok(0.0);
        }

        #[allow(clippy::cast_precision_loss)]
        Ok((sum_sq / count as f64).sqrt())
    }

    /// Returns a state of the same shape with every leaf set to zero.
    #[must_use]
    pub fn zeros_like(&self) -> State {
        self.map(&|_| 0.0)
    }

    /// Iterates over the leaves in depth-first order.
    ///
    /// Sequences yield in index order and records in key order.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Returns the number of scalar leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Returns `true` if every leaf is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.leaves().all(f64::is_finite)
    }

    /// Returns the value if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            State::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the named field if this is a record containing it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&State> {
        match self {
            State::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Returns the element at `index` if this is a sequence long enough.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&State> {
        match self {
            State::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Returns the scalar value or a shape error.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if this is not a scalar.
    pub fn expect_scalar(&self) -> Result<f64, StateError> {
        self.as_scalar()
            .ok_or_else(|| StateError::mismatch("scalar", self.describe()))
    }

    /// Returns the elements of a sequence or a shape error.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if this is not a sequence.
    pub fn expect_sequence(&self) -> Result<&[State], StateError> {
        match self {
            State::Sequence(items) => Ok(items),
            _ => Err(StateError::mismatch("sequence", self.describe())),
        }
    }

    /// Returns the scalar stored in a named field or a shape error.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] if this is not a record, the field
    /// is missing, or the field is not a scalar.
    pub fn expect_scalar_field(&self, name: &str) -> Result<f64, StateError> {
        let value = self.field(name).ok_or_else(|| {
            StateError::mismatch(format!("record with field `{name}`"), self.describe())
        })?;
        value
            .expect_scalar()
            .map_err(|err| err.within_field(name))
    }

    /// Short description of this node's shape, used in error messages.
    fn describe(&self) -> String {
        match self {
            State::Scalar(_) => "scalar".to_string(),
            State::Sequence(items) => format!("sequence of length {}", items.len()),
            State::Record(fields) => {
                let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
                format!("record {{{}}}", keys.join(", "))
            }
        }
    }

    fn map(&self, f: &impl Fn(f64) -> f64) -> State {
        match self {
            State::Scalar(x) => State::Scalar(f(*x)),
            State::Sequence(items) => State::Sequence(items.iter().map(|s| s.map(f)).collect()),
            State::Record(fields) => State::Record(
                fields
                    .iter()
                    .map(|(name, s)| (name.clone(), s.map(f)))
                    .collect(),
            ),
        }
    }

    fn zip_with(&self, other: &State, f: &impl Fn(f64, f64) -> f64) -> Result<State, StateError> {
        match (self, other) {
            (State::Scalar(a), State::Scalar(b)) => Ok(State::Scalar(f(*a, *b))),

            (State::Sequence(a), State::Sequence(b)) => {
                if a.len() != b.len() {
                    return Err(StateError::mismatch(self.describe(), other.describe()));
                }
                a.iter()
                    .zip(b)
                    .enumerate()
                    .map(|(i, (a, b))| a.zip_with(b, f).map_err(|err| err.within_index(i)))
                    .collect::<Result<_, _>>()
                    .map(State::Sequence)
            }

            (State::Record(a), State::Record(b)) => {
                if a.len() != b.len() || a.keys().any(|key| !b.contains_key(key)) {
                    return Err(StateError::mismatch(self.describe(), other.describe()));
                }
                a.iter()
                    .map(|(name, a)| {
                        // Key sets are equal, checked above.
                        let b = &b[name];
                        a.zip_with(b, f)
                            .map(|s| (name.clone(), s))
                            .map_err(|err| err.within_field(name))
                    })
                    .collect::<Result<_, _>>()
                    .map(State::Record)
            }

            _ => Err(StateError::mismatch(self.describe(), other.describe())),
        }
    }
}

impl From<f64> for State {
    fn from(value: f64) -> Self {
        State::Scalar(value)
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        State::Sequence(values.into_iter().map(State::Scalar).collect())
    }
}

impl<const N: usize> From<[f64; N]> for State {
    fn from(values: [f64; N]) -> Self {
        State::Sequence(values.into_iter().map(State::Scalar).collect())
    }
}

impl From<Vec<State>> for State {
    fn from(items: Vec<State>) -> Self {
        State::Sequence(items)
    }
}

impl FromIterator<State> for State {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        State::Sequence(iter.into_iter().collect())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Scalar(x) => write!(f, "{x}"),
            State::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            State::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
