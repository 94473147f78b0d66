//! Flatwiki - a small wiki that keeps each page in its own text file
//!
//! Pages live as `<title>.txt` under a data directory and are served over
//! HTTP through view, edit, save and index routes.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod routes;
pub mod services;
pub mod templates;
pub mod types;
pub mod utils;

pub use config::Config;
pub use errors::WikiError;
pub use routes::{build_router, parse_route, title_from_path, Route};
pub use services::PageStore;
pub use templates::{TemplateName, TemplateSet};
pub use types::{AppState, Page, Title};
