/// Control actions supported by the implicit methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop iterating and return the current guess.
    StopEarly,
}
