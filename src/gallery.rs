//! Gallery state: the full catalog, the active filtered list and the viewer.

use crate::catalog::{CatalogSpec, Photo};
use crate::error::GalleryError;
use crate::render::{render_photos, GallerySurface};
use std::fmt;
use tracing::debug;

mod lightbox;

pub use lightbox::{Lightbox, Swipe, SwipeDirection};

/// Reserved filter name that selects the whole catalog.
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a filter name; `"all"` is the sentinel for the full catalog.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case(ALL_SENTINEL) {
            Filter::All
        } else {
            Filter::Category(name.to_string())
        }
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(tag) => photo.category == *tag,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Filter::All => ALL_SENTINEL,
            Filter::Category(tag) => tag,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Photos of `catalog` selected by `filter`, in catalog order.
pub fn filter_photos(catalog: &[Photo], filter: &Filter) -> Vec<Photo> {
    catalog
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

#[derive(Debug, Default)]
pub struct Gallery {
    catalog: Vec<Photo>,
    active: Vec<Photo>,
    filter: Filter,
    pub lightbox: Lightbox,
}

impl Gallery {
    /// Build a gallery over `catalog` showing everything. Nothing is rendered yet.
    pub fn new(catalog: Vec<Photo>) -> Self {
        let active = catalog.clone();
        Self {
            catalog,
            active,
            filter: Filter::All,
            lightbox: Lightbox::default(),
        }
    }

    pub fn from_spec(spec: &CatalogSpec) -> Self {
        Self::new(spec.generate())
    }

    pub fn catalog(&self) -> &[Photo] {
        &self.catalog
    }

    pub fn active(&self) -> &[Photo] {
        &self.active
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Render the current active list without changing it.
    pub fn render<S: GallerySurface + ?Sized>(&self, surface: &mut S) {
        render_photos(surface, &self.active);
    }

    /// Replace the active list by `filter` and re-render it.
    ///
    /// An open viewer is closed: its cursor indexed the previous list.
    pub fn apply_filter<S: GallerySurface + ?Sized>(&mut self, filter: Filter, surface: &mut S) {
        self.active = filter_photos(&self.catalog, &filter);
        self.filter = filter;
        self.lightbox.close();
        debug!(
            filter = %self.filter,
            active = self.active.len(),
            "filter applied"
        );
        render_photos(surface, &self.active);
    }

    /// Replace the full catalog and re-apply the current filter.
    pub fn regenerate<S: GallerySurface + ?Sized>(&mut self, spec: &CatalogSpec, surface: &mut S) {
        self.catalog = spec.generate();
        let filter = self.filter.clone();
        self.apply_filter(filter, surface);
    }

    pub fn find(&self, id: u32) -> Result<&Photo, GalleryError> {
        self.catalog
            .iter()
            .find(|p| p.id == id)
            .ok_or(GalleryError::UnknownPhoto(id))
    }

    /// Open the viewer at a tile position of the active list.
    pub fn open_viewer(&mut self, index: usize) -> Result<&Photo, GalleryError> {
        self.lightbox.open(index, self.active.len())?;
        let photo = &self.active[index];
        self.lightbox.display(photo);
        Ok(photo)
    }

    pub fn close_viewer(&mut self) {
        self.lightbox.close();
    }

    pub fn next_photo(&mut self) -> Option<&Photo> {
        let idx = self.lightbox.next(self.active.len())?;
        self.show_at(idx)
    }

    pub fn previous_photo(&mut self) -> Option<&Photo> {
        let idx = self.lightbox.previous(self.active.len())?;
        self.show_at(idx)
    }

    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<&Photo> {
        match direction {
            SwipeDirection::Previous => self.previous_photo(),
            SwipeDirection::Next => self.next_photo(),
        }
    }

    /// Photo under the viewer cursor, if the cursor is valid for the active list.
    pub fn current_photo(&self) -> Option<&Photo> {
        self.active.get(self.lightbox.cursor())
    }

    fn show_at(&mut self, idx: usize) -> Option<&Photo> {
        let photo = self.active.get(idx)?;
        self.lightbox.display(photo);
        Some(photo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::RecordingSurface;
    use std::path::PathBuf;

    fn spec(count: u32, categories: &[&str]) -> CatalogSpec {
        CatalogSpec {
            count,
            folder: PathBuf::from("M"),
            base_name: "A (".to_string(),
            extension: ".JPG".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn ids(photos: &[Photo]) -> Vec<u32> {
        photos.iter().map(|p| p.id).collect()
    }

    #[test]
    fn filter_all_equals_catalog() {
        let mut gallery = Gallery::from_spec(&spec(9, &["a", "b", "c"]));
        let mut surface = RecordingSurface::default();
        gallery.apply_filter(Filter::Category("b".into()), &mut surface);
        gallery.apply_filter(Filter::parse("all"), &mut surface);
        assert_eq!(gallery.active(), gallery.catalog());
    }

    #[test]
    fn filter_by_tag_keeps_catalog_order() {
        let mut gallery = Gallery::from_spec(&spec(10, &["a", "b", "c"]));
        let mut surface = RecordingSurface::default();
        gallery.apply_filter(Filter::parse("c"), &mut surface);
        assert_eq!(ids(gallery.active()), vec![3, 6, 9]);
        assert!(gallery.active().iter().all(|p| p.category == "c"));
    }

    #[test]
    fn unknown_tag_renders_placeholder() {
        let mut gallery = Gallery::from_spec(&spec(4, &["a", "b"]));
        let mut surface = RecordingSurface::default();
        gallery.apply_filter(Filter::parse("zzz"), &mut surface);
        assert!(gallery.active().is_empty());
        assert_eq!(surface.calls, vec!["clear", "placeholder No photos found"]);
    }

    #[test]
    fn two_tag_walkthrough() {
        let mut gallery = Gallery::from_spec(&spec(8, &["a", "b"]));
        let mut surface = RecordingSurface::default();
        gallery.apply_filter(Filter::parse("b"), &mut surface);
        assert_eq!(ids(gallery.active()), vec![2, 4, 6, 8]);

        assert_eq!(gallery.open_viewer(2).map(|p| p.id), Ok(6));
        assert_eq!(gallery.next_photo().map(|p| p.id), Some(8));
        assert_eq!(gallery.next_photo().map(|p| p.id), Some(2));
        assert_eq!(
            gallery.lightbox.source(),
            Some(&PathBuf::from("M/A (2).JPG"))
        );
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut gallery = Gallery::from_spec(&spec(5, &["a"]));
        gallery.open_viewer(0).unwrap();
        assert_eq!(gallery.previous_photo().map(|p| p.id), Some(5));
        assert_eq!(gallery.lightbox.cursor(), 4);
    }

    #[test]
    fn empty_active_list_navigation_is_noop() {
        let mut gallery = Gallery::from_spec(&spec(0, &["a"]));
        assert!(gallery.open_viewer(0).is_err());
        let before = gallery.lightbox.clone();
        assert!(gallery.next_photo().is_none());
        assert!(gallery.previous_photo().is_none());
        assert_eq!(gallery.lightbox, before);
    }

    #[test]
    fn applying_filter_closes_viewer() {
        let mut gallery = Gallery::from_spec(&spec(6, &["a", "b"]));
        let mut surface = RecordingSurface::default();
        gallery.open_viewer(5).unwrap();
        gallery.apply_filter(Filter::parse("a"), &mut surface);
        assert!(!gallery.lightbox.is_open());
    }

    #[test]
    fn regenerate_reapplies_current_filter() {
        let mut gallery = Gallery::from_spec(&spec(4, &["a", "b"]));
        let mut surface = RecordingSurface::default();
        gallery.apply_filter(Filter::parse("a"), &mut surface);
        gallery.regenerate(&spec(6, &["a", "b"]), &mut surface);
        assert_eq!(gallery.catalog().len(), 6);
        assert_eq!(ids(gallery.active()), vec![1, 3, 5]);
    }

    #[test]
    fn find_reports_unknown_ids() {
        let gallery = Gallery::from_spec(&spec(3, &["a"]));
        assert_eq!(gallery.find(2).map(|p| p.id), Ok(2));
        assert_eq!(gallery.find(9), Err(GalleryError::UnknownPhoto(9)));
    }

    #[test]
    fn swipe_maps_to_navigation() {
        let mut gallery = Gallery::from_spec(&spec(3, &["a"]));
        gallery.open_viewer(1).unwrap();
        assert_eq!(gallery.swipe(SwipeDirection::Next).map(|p| p.id), Some(3));
        assert_eq!(
            gallery.swipe(SwipeDirection::Previous).map(|p| p.id),
            Some(2)
        );
    }

    #[test]
    fn filter_parse_handles_sentinel() {
        assert_eq!(Filter::parse(" ALL "), Filter::All);
        assert_eq!(Filter::parse("ring"), Filter::Category("ring".into()));
        assert_eq!(Filter::All.to_string(), "all");
    }
}
