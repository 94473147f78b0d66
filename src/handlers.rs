use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Response},
};

use crate::errors::WikiError;
use crate::routes::{found, ValidTitle};
use crate::templates::TemplateName;
use crate::types::{AppState, Page, Title};
use crate::utils::form_field;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Render a page, or send the client to the editor if it does not exist
pub async fn handle_view(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Response, WikiError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(e) => {
            log::info!("Page '{}' unavailable ({}), redirecting to editor", title, e);
            return Ok(found(&format!("/edit/{}", title)));
        }
    };
    let html = state.templates.render_page(TemplateName::View, &page)?;
    log::info!("Serving page '{}'", title);
    Ok(Html(html).into_response())
}

/// Render the edit form, blank when the page does not exist yet
pub async fn handle_edit(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Response, WikiError> {
    let page = state.store.load(&title).unwrap_or_else(|e| {
        log::debug!("Editing '{}' from scratch, load failed: {}", title, e);
        Page::empty(title.clone())
    });
    let html = state.templates.render_page(TemplateName::Edit, &page)?;
    Ok(Html(html).into_response())
}

/// Persist the submitted body and redirect to the page
pub async fn handle_save(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
    uri: Uri,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<Response, WikiError> {
    let page = Page::new(title, submitted_body(&uri, &headers, &payload));
    if let Err(e) = state.store.save(&page) {
        log::warn!("Save of '{}' failed: {}", page.title, e);
        return Err(e);
    }
    Ok(found(&format!("/view/{}", page.title)))
}

/// The `body` field from a urlencoded request body, then from the query
/// string. Other content types contribute nothing; a missing field is empty.
fn submitted_body(uri: &Uri, headers: &HeaderMap, payload: &[u8]) -> Vec<u8> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false);

    let from_payload = if is_form { form_field(payload, "body") } else { None };
    from_payload
        .or_else(|| uri.query().and_then(|query| form_field(query.as_bytes(), "body")))
        .unwrap_or_default()
}

/// List every stored page
pub async fn handle_index(State(state): State<AppState>) -> Result<Response, WikiError> {
    let titles = state.store.list_titles()?;
    let html = state.templates.render_index(&titles)?;
    log::info!("Serving index of {} pages", titles.len());
    Ok(Html(html).into_response())
}

/// Serve the stored body as plain text
pub async fn handle_raw(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    let title = uri
        .path()
        .strip_prefix("/raw/")
        .and_then(Title::from_segment)
        .ok_or(WikiError::NotFound)?;
    let page = state.store.load(&title)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        page.body,
    )
        .into_response())
}

/// Anything outside the route table goes back to the index
pub async fn handle_fallback(uri: Uri) -> Response {
    log::debug!("No route for '{}', redirecting home", uri.path());
    found("/")
}
