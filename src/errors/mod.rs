use std::{fmt, io};
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    Render(String),
    Config(String),
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            WikiError::NotFound
        } else {
            WikiError::Io(err)
        }
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::NotFound => write!(f, "Not found"),
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::Render(e) => write!(f, "Render error: {}", e),
            WikiError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = match self {
            WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::Io(_) | WikiError::Render(_) | WikiError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let err = WikiError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, WikiError::NotFound));
    }

    #[test]
    fn other_io_errors_are_kept() {
        let err = WikiError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(err, WikiError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn status_codes() {
        assert_eq!(WikiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            WikiError::Render("bad".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
