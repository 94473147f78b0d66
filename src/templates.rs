//! HTML templates, loaded once at startup.
//!
//! Templates are plain HTML with `{{NAME}}` placeholders. The index template
//! repeats the text between `{{#TITLES}}` and `{{/TITLES}}` once per page.
//! Every substituted value is HTML-escaped.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::errors::WikiError;
use crate::types::Page;
use crate::utils::{escape_html, last_modified_text};

const SECTION_OPEN: &str = "{{#TITLES}}";
const SECTION_CLOSE: &str = "{{/TITLES}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    View,
    Edit,
    Index,
}

impl TemplateName {
    pub const ALL: [TemplateName; 3] = [TemplateName::View, TemplateName::Edit, TemplateName::Index];

    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::View => "view.html",
            TemplateName::Edit => "edit.html",
            TemplateName::Index => "index.html",
        }
    }
}

/// The immutable template registry
#[derive(Debug)]
pub struct TemplateSet {
    view: String,
    edit: String,
    index: String,
}

impl TemplateSet {
    /// Read all templates from `dir`, failing if any is missing or malformed
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let read = |name: TemplateName| {
            let path = dir.join(name.file_name());
            debug!("Loading template {:?}", path);
            fs::read_to_string(&path).map_err(|e| {
                WikiError::Config(format!("cannot read template {}: {}", path.display(), e))
            })
        };
        let set = Self::from_sources(
            read(TemplateName::View)?,
            read(TemplateName::Edit)?,
            read(TemplateName::Index)?,
        )?;
        info!("Loaded {} templates from {:?}", TemplateName::ALL.len(), dir);
        Ok(set)
    }

    /// Build a template set from in-memory sources
    pub fn from_sources(view: String, edit: String, index: String) -> Result<Self, WikiError> {
        let set = Self { view, edit, index };
        for name in TemplateName::ALL {
            split_section(set.source(name))
                .map_err(|e| WikiError::Config(format!("{}: {}", name.file_name(), e)))?;
        }
        Ok(set)
    }

    fn source(&self, name: TemplateName) -> &str {
        match name {
            TemplateName::View => &self.view,
            TemplateName::Edit => &self.edit,
            TemplateName::Index => &self.index,
        }
    }

    /// Render a page template
    pub fn render_page(&self, name: TemplateName, page: &Page) -> Result<String, WikiError> {
        let title = escape_html(page.title.as_str());
        let body = escape_html(&page.body_text());
        let modified = escape_html(&last_modified_text(page.modified));
        let values = [("TITLE", title.as_str()), ("BODY", body.as_str()), ("MODIFIED", modified.as_str())];

        let (head, section) = split_section(self.source(name)).map_err(WikiError::Render)?;
        let mut out = fill(head, &values);
        if let Some((_, tail)) = section {
            out.push_str(&fill(tail, &values));
        }
        Ok(out)
    }

    /// Render the index template with one section per title
    pub fn render_index(&self, titles: &[String]) -> Result<String, WikiError> {
        let (head, section) = split_section(&self.index).map_err(WikiError::Render)?;
        let mut out = fill(head, &[]);
        if let Some((item, tail)) = section {
            for title in titles {
                let escaped = escape_html(title);
                out.push_str(&fill(item, &[("TITLE", escaped.as_str())]));
            }
            out.push_str(&fill(tail, &[]));
        }
        Ok(out)
    }
}

/// Split a template into the text before the titles section, and the
/// section body plus the text after it when a section is present.
fn split_section(source: &str) -> Result<(&str, Option<(&str, &str)>), String> {
    match (source.find(SECTION_OPEN), source.find(SECTION_CLOSE)) {
        (None, None) => Ok((source, None)),
        (Some(open), Some(close)) if open < close => {
            let item = &source[open + SECTION_OPEN.len()..close];
            let tail = &source[close + SECTION_CLOSE.len()..];
            if tail.contains(SECTION_OPEN) || tail.contains(SECTION_CLOSE) {
                return Err("only one titles section is supported".to_string());
            }
            Ok((&source[..open], Some((item, tail))))
        }
        (Some(_), None) => Err(format!("unclosed {}", SECTION_OPEN)),
        _ => Err(format!("{} without matching {}", SECTION_CLOSE, SECTION_OPEN)),
    }
}

/// Substitute `{{KEY}}` placeholders in one pass; unknown keys are kept
fn fill(text: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
