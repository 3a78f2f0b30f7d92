use failure::{Backtrace, Context, Fail};
use std::fmt;

/// The specific kind of error that can occur.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    /// The client was constructed or used with invalid configuration,
    /// e.g. an unparseable base URL or an empty request path.
    #[fail(display = "Configuration error: {}", _0)]
    Config(String),
    /// The server rejected the supplied credentials (HTTP 401 or 403).
    #[fail(display = "Authentication rejected with HTTP {}", status)]
    Authentication { status: u16 },
    /// The server answered with a non-success status other than 401/403.
    #[fail(display = "Request failed with HTTP {}: {}", status, body)]
    Request { status: u16, body: String },
    /// The request never produced a response: DNS failure, connection
    /// refused, timeout.
    #[fail(display = "Network error: {}", _0)]
    Network(String),
    /// The response body was not valid JSON or lacked the expected shape.
    #[fail(display = "Malformed response: {}", _0)]
    MalformedResponse(String),
    /// The pagination loop hit the configured page bound before the server
    /// signalled a terminal page.
    #[fail(display = "Pagination exceeded the configured bound of {} pages", pages)]
    PaginationLimitExceeded { pages: u32 },
    /// Hints that destructuring should not be exhaustive.
    ///
    /// This enum may grow additional variants, so this makes sure clients
    /// don't count on exhaustive matching. (Otherwise, adding a new variant
    /// could break existing code.)
    #[doc(hidden)]
    #[fail(display = "Non exhaustive")]
    __Nonexhaustive,
}

/// An error that can occur while talking to the management API.
#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}
