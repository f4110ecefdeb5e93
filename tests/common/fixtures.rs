use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use styled_prose::{CatalogClient, CatalogConnector, CatalogError};
use styled_prose_fonts::catalog::catalog_url;

/// Writes `toml` to `<dir>/styles.toml` and returns the path.
pub fn write_config(dir: &Path, toml: &str) -> PathBuf {
    let path = dir.join("styles.toml");
    fs::write(&path, toml).expect("write config");
    path
}

/// Writes a placeholder font file.
pub fn write_font(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"font").expect("write font");
    path
}

#[derive(Debug, Default)]
struct Counters {
    connects: AtomicUsize,
    closes: AtomicUsize,
    fetches: Mutex<Vec<String>>,
}

/// A font catalog serving canned responses.
#[derive(Debug, Default, Clone)]
pub struct FakeCatalog {
    responses: Arc<HashMap<String, Vec<u8>>>,
    counters: Arc<Counters>,
}

impl FakeCatalog {
    /// Serves a complete catalog entry for each of `families`.
    pub fn with_families(families: &[&str]) -> Self {
        let mut responses = HashMap::new();
        for family in families {
            responses.insert(catalog_url(family), catalog_body(family));
            for role in ["regular", "bold", "italic", "bolditalic"] {
                responses.insert(font_url(family, role), role.as_bytes().to_vec());
            }
        }
        Self {
            responses: Arc::new(responses),
            counters: Arc::default(),
        }
    }

    pub fn connects(&self) -> usize {
        self.counters.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> Vec<String> {
        self.counters.fetches.lock().unwrap().clone()
    }
}

impl CatalogConnector for FakeCatalog {
    fn connect(&self) -> Box<dyn CatalogClient> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        Box::new(self.clone())
    }
}

impl CatalogClient for FakeCatalog {
    fn get(&mut self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.counters.fetches.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::Request {
                url: url.to_string(),
                message: "http status: 404".to_string(),
            })
    }

    fn close(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn font_url(family: &str, role: &str) -> String {
    format!("https://fonts.example/{}/{}.ttf", family.replace(' ', ""), role)
}

/// A catalog response in the guarded wire format.
pub fn catalog_body(family: &str) -> Vec<u8> {
    let stem = family.replace(' ', "");
    let manifest = serde_json::json!({
        "manifest": {
            "files": [
                { "filename": "OFL.txt", "contents": "Copyright 2023 Elias Gabriel" },
                { "filename": "README.txt", "contents": "not cached" }
            ],
            "fileRefs": [
                { "filename": format!("static/{}-Regular.ttf", stem), "url": font_url(family, "regular") },
                { "filename": format!("static/{}-Bold.ttf", stem), "url": font_url(family, "bold") },
                { "filename": format!("static/{}-Italic.ttf", stem), "url": font_url(family, "italic") },
                { "filename": format!("static/{}-BoldItalic.ttf", stem), "url": font_url(family, "bolditalic") },
                { "filename": format!("{}[wght].ttf", stem), "url": "https://fonts.example/variable.ttf" }
            ]
        }
    });
    let mut body = b")]}'\n".to_vec();
    body.extend(serde_json::to_vec(&manifest).expect("serialize manifest"));
    body
}
