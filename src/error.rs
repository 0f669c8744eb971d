use std::fmt;

/// Errors produced while dispatching a request or validating an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The method name is not one of GET, POST, PUT or DELETE. No request was sent.
    DisallowedMethod(String),

    /// The HTTP exchange failed below the application layer (DNS, connect, TLS, timeout).
    Transport(String),

    /// The server answered, but the body was empty or not usable JSON. Holds the raw body.
    InvalidResponse(String),

    /// The request parameters could not be turned into a JSON object.
    Encode(String),

    /// A pre-flight check rejected `identifier` before the mutating request was sent.
    ///
    /// `cause` is `None` when the listing was fetched and the identifier is absent,
    /// and holds the underlying error when the check itself could not be completed.
    ValidationFailed {
        kind: &'static str,
        identifier: String,
        cause: Option<Box<ApiError>>,
    },
}

impl ApiError {
    /// Returns `true` when a validation failed because the lookup itself failed,
    /// rather than because the identifier was confirmed absent.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, ApiError::ValidationFailed { cause: Some(_), .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::DisallowedMethod(method) => write!(f, "method not allowed: {method}"),
            ApiError::Transport(detail) => write!(f, "transport error: {detail}"),
            ApiError::InvalidResponse(body) => write!(f, "invalid response: {body}"),
            ApiError::Encode(msg) => write!(f, "could not encode parameters: {msg}"),
            ApiError::ValidationFailed {
                kind,
                identifier,
                cause: None,
            } => write!(f, "invalid {kind}: {identifier}"),
            ApiError::ValidationFailed {
                kind,
                identifier,
                cause: Some(cause),
            } => write!(f, "could not validate {kind} {identifier}: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::ValidationFailed {
                cause: Some(cause), ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
