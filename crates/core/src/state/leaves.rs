use super::State;

/// Depth-first iterator over the scalar leaves of a [`State`].
///
/// Created by [`State::leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<&'a State>,
}

impl<'a> Leaves<'a> {
    pub(super) fn new(root: &'a State) -> Self {
        Self { stack: vec![root] }
    }
}

impl Iterator for Leaves<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        while let Some(node) = self.stack.pop() {
            match node {
                State::Scalar(x) => return Some(*x),
                // Pushed in reverse so the first child is popped first.
                State::Sequence(items) => self.stack.extend(items.iter().rev()),
                State::Record(fields) => self.stack.extend(fields.values().rev()),
            }
        }
        None
    }
}
