//! Photo catalog generation.
//!
//! The photo set is fixed and known up front: filenames follow a numeric
//! naming convention (`A (1).JPG`, `A (2).JPG`, ...) so nothing is scanned
//! from disk. Categories are assigned by cycling through a small tag list.

use serde::Serialize;
use std::path::PathBuf;

/// A single photo in the catalog. Immutable once generated; `id` is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: u32,
    pub category: String,
    pub src: PathBuf,
}

impl Photo {
    /// Alt text used in tile labels and the viewer title.
    pub fn label(&self) -> String {
        format!("Photo {}", self.id)
    }
}

/// Naming convention and size of the photo set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSpec {
    pub count: u32,
    pub folder: PathBuf,
    pub base_name: String,
    pub extension: String,
    pub categories: Vec<String>,
}

impl CatalogSpec {
    /// File name for a given photo id: `<base><id>)<extension>`.
    pub fn file_name(&self, id: u32) -> String {
        format!("{}{}){}", self.base_name, id, self.extension)
    }

    /// Category for a given 1-based id, cycling through the tag list.
    pub fn category_for(&self, id: u32) -> String {
        if self.categories.is_empty() || id == 0 {
            return String::new();
        }
        let idx = (id as usize - 1) % self.categories.len();
        self.categories[idx].clone()
    }

    /// Distinct category tags in first-seen order.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for tag in &self.categories {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
        seen
    }

    /// Build the ordered catalog: ids `1..=count`.
    pub fn generate(&self) -> Vec<Photo> {
        (1..=self.count)
            .map(|id| Photo {
                id,
                category: self.category_for(id),
                src: self.folder.join(self.file_name(id)),
            })
            .collect()
    }
}
