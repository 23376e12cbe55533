// Last-good value holder

/// The most recent successfully refreshed value of a source.
///
/// `Unavailable` is the state before the first success; it is rendered as a
/// placeholder rather than a numeric guess.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cached<T> {
    #[default]
    Unavailable,
    Value(T),
}

impl<T> Cached<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Value(v) => Some(v),
            Cached::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Cached::Value(_))
    }

    /// Format the value with `f`, or return `placeholder` when unavailable.
    pub fn display_or(&self, placeholder: impl Into<String>, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Cached::Value(v) => f(v),
            Cached::Unavailable => placeholder.into(),
        }
    }
}
