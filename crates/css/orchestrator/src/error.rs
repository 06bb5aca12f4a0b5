use core::error::Error;
use core::fmt;

/// Errors surfaced to callers of the resolver.
///
/// Unmatched classes and unresolved references are not errors; they are left out of, or
/// left verbatim in, the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// An argument violated a precondition. Raised before any work is done.
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(formatter, "invalid argument `{argument}`: {reason}")
            }
        }
    }
}

impl Error for ResolveError {}
