use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use time::OffsetDateTime;

use crate::config::Config;
use crate::errors::WikiError;
use crate::services::PageStore;
use crate::templates::TemplateSet;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: PageStore,
    pub templates: Arc<TemplateSet>,
}

impl AppState {
    /// Load templates and prepare storage for `config`
    pub fn from_config(config: Config) -> Result<Self, WikiError> {
        let templates = TemplateSet::load(&config.template_dir)?;
        let store = PageStore::new(config.data_dir.clone());
        store.ensure_dir()?;
        Ok(Self {
            config: Arc::new(config),
            store,
            templates: Arc::new(templates),
        })
    }
}

/// A page title: one or more ASCII letters or digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Validate a raw title, rejecting anything outside `[a-zA-Z0-9]+`
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Percent-decode a URL path segment, then validate it as a title
    pub fn from_segment(segment: &str) -> Option<Self> {
        let decoded = percent_decode_str(segment).decode_utf8().ok()?;
        Self::parse(&decoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page, built fresh for each request
#[derive(Debug, Clone)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
    pub modified: Option<OffsetDateTime>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into(), modified: None }
    }

    /// Page that has not been written yet
    pub fn empty(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
