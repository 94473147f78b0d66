//! Path grammar and route table.
//!
//! Accepted paths are `/<action>/<title>` with `action` one of view, edit or
//! save and a title of `[a-zA-Z0-9]+` once percent-decoded, plus the literal
//! `/init`. A path outside the grammar never reaches storage. `/raw/<title>`
//! sits outside this grammar and validates its title on its own.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::errors::WikiError;
use crate::handlers::{handle_edit, handle_fallback, handle_index, handle_raw, handle_save, handle_view};
use crate::types::{AppState, Title};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Action::View),
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page { action: Action, title: Title },
    Init,
}

/// Match a request path against the wiki's path grammar
pub fn parse_route(path: &str) -> Option<Route> {
    if path == "/init" {
        return Some(Route::Init);
    }
    let (segment, raw_title) = path.strip_prefix('/')?.split_once('/')?;
    let action = Action::from_segment(segment)?;
    let title = Title::from_segment(raw_title)?;
    Some(Route::Page { action, title })
}

/// Extract the page title from a path, or `NotFound`
pub fn title_from_path(path: &str) -> Result<Title, WikiError> {
    match parse_route(path) {
        Some(Route::Page { title, .. }) => Ok(title),
        _ => {
            log::debug!("Rejected path '{}'", path);
            Err(WikiError::NotFound)
        }
    }
}

/// `302 Found` redirect
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Title of a page route; any other path redirects to `/`
#[derive(Debug)]
pub struct ValidTitle(pub Title);

#[async_trait]
impl<S> FromRequestParts<S> for ValidTitle
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        title_from_path(parts.uri.path())
            .map(ValidTitle)
            .map_err(|_| found("/"))
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/index", get(handle_index))
        .route("/init", get(handle_index))
        .route("/view/:title", get(handle_view))
        .route("/edit/:title", get(handle_edit))
        .route("/save/:title", post(handle_save))
        .route("/raw/*path", get(handle_raw))
        .fallback(handle_fallback)
        .with_state(state)
}
