use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};
use time::OffsetDateTime;

use crate::errors::WikiError;
use crate::types::{Page, Title};

const PAGE_EXTENSION: &str = "txt";

/// Flat-file page storage: one `<title>.txt` per page
#[derive(Clone)]
pub struct PageStore {
    dir: Arc<PathBuf>,
}

impl PageStore {
    /// Create a new page store rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        debug!("Creating PageStore with data directory: {:?}", dir);
        Self { dir: Arc::new(dir) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), WikiError> {
        if !self.dir.is_dir() {
            info!("Creating data directory {:?}", self.dir);
            fs::create_dir_all(self.dir.as_path()).map_err(WikiError::Io)?;
        }
        Ok(())
    }

    fn path_for(&self, title: &Title) -> PathBuf {
        self.dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Read a page from disk
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        debug!("Loading page '{}' from {:?}", title, path);

        let body = fs::read(&path).map_err(|e| {
            debug!("Failed to read page {:?}: {}", path, e);
            WikiError::from(e)
        })?;
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(OffsetDateTime::from);

        Ok(Page { title: title.clone(), body, modified })
    }

    /// Write a page to disk, creating or truncating its file
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        debug!("Saving page '{}' to {:?} ({} bytes)", page.title, path, page.body.len());

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let result = options.open(&path).and_then(|mut file| file.write_all(&page.body));
        if let Err(e) = result {
            error!("Failed to write page {:?}: {}", path, e);
            return Err(WikiError::Io(e));
        }

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// List stored page titles, sorted by file name
    pub fn list_titles(&self) -> Result<Vec<String>, WikiError> {
        let entries = fs::read_dir(self.dir.as_path()).map_err(|e| {
            error!("Failed to read data directory {:?}: {}", self.dir, e);
            WikiError::Io(e)
        })?;

        let mut titles = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                titles.push(stem.to_string());
            }
        }
        titles.sort();

        debug!("Listed {} pages in {:?}", titles.len(), self.dir);
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn save_then_load_returns_same_body() {
        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().to_path_buf());

        for (name, body) in [("Home", "hello"), ("Empty", ""), ("Multi2", "line one\nline <two>\n")] {
            store.save(&Page::new(title(name), body)).unwrap();
            let page = store.load(&title(name)).unwrap();
            assert_eq!(page.body, body.as_bytes());
            assert!(page.modified.is_some());
        }
    }

    #[test]
    fn save_truncates_previous_content() {
        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().to_path_buf());

        store.save(&Page::new(title("T"), "a much longer body")).unwrap();
        store.save(&Page::new(title("T"), "short")).unwrap();
        assert_eq!(store.load(&title("T")).unwrap().body, b"short");
    }

    #[test]
    fn missing_page_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().to_path_buf());
        assert!(matches!(store.load(&title("Nope")), Err(WikiError::NotFound)));
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().to_path_buf());
        store.save(&Page::new(title("Secret"), "x")).unwrap();

        let mode = fs::metadata(tmp.path().join("Secret.txt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn list_titles_strips_extension_and_skips_others() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("notes.md"), "ignored").unwrap();
        fs::create_dir(tmp.path().join("dir.txt")).unwrap();

        let store = PageStore::new(tmp.path().to_path_buf());
        assert_eq!(store.list_titles().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn list_titles_fails_without_directory() {
        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().join("missing"));
        assert!(matches!(store.list_titles(), Err(WikiError::Io(_))));
    }

    #[test]
    fn ensure_dir_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let store = PageStore::new(tmp.path().join("nested").join("data"));
        store.ensure_dir().unwrap();
        assert!(store.dir().is_dir());
    }
}
