use core::fmt;

/// Failure reported by one of the output sinks
///
/// The animation does not retry, the first error ends the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoError<D, L> {
    /// The display rejected a call
    Display(D),
    /// The LED rejected a call
    Led(L),
}

impl<D: fmt::Display, L: fmt::Display> fmt::Display for DiscoError<D, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(err) => write!(f, "display error: {err}"),
            Self::Led(err) => write!(f, "led error: {err}"),
        }
    }
}

impl<D, L> core::error::Error for DiscoError<D, L>
where
    D: fmt::Debug + fmt::Display,
    L: fmt::Debug + fmt::Display,
{
}
