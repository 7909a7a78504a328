use super::config::CatalogConfig;
use super::{filter_bar, App};
use crate::gallery::Filter;
use tracing::info;

impl App {
    /// Apply a filter, re-render the tiles and reset grid state.
    pub fn apply_filter(&mut self, filter: Filter) {
        self.gallery.apply_filter(filter, &mut self.board);
        self.ui.selected = 0;
        // Positions now refer to a different list.
        self.reset_preview_cache();
        info!(
            filter = %self.gallery.filter(),
            shown = self.gallery.active().len(),
            "filter changed"
        );
    }

    /// Replace the catalog settings, regenerate the catalog and re-apply the filter.
    pub fn regenerate_catalog(&mut self, catalog: CatalogConfig) {
        self.config.catalog = catalog;
        let spec = self.config.catalog_spec();
        self.gallery.regenerate(&spec, &mut self.board);
        self.filters = filter_bar(&spec);
        self.ui.selected = 0;
        self.reset_preview_cache();
        info!(
            photos = self.gallery.catalog().len(),
            shown = self.gallery.active().len(),
            "catalog regenerated"
        );
    }

    /// Index of the active filter within the filter bar.
    pub fn active_filter_index(&self) -> usize {
        self.filters
            .iter()
            .position(|f| f == self.gallery.filter())
            .unwrap_or(0)
    }

    /// Select the filter-bar entry at `idx` (0 = all).
    pub fn select_filter(&mut self, idx: usize) {
        if let Some(filter) = self.filters.get(idx).cloned() {
            self.apply_filter(filter);
        }
    }

    /// Cycle to the next filter, wrapping back to "all".
    pub fn next_filter(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        let idx = (self.active_filter_index() + 1) % self.filters.len();
        self.select_filter(idx);
    }

    /// Cycle to the previous filter.
    pub fn prev_filter(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        let len = self.filters.len();
        let idx = (self.active_filter_index() + len - 1) % len;
        self.select_filter(idx);
    }

    /// Filter by the first category starting with `prefix` (case-insensitive).
    pub fn filter_by_prefix(&mut self, prefix: &str) -> bool {
        let filter = Filter::parse(prefix);
        if filter == Filter::All {
            self.apply_filter(Filter::All);
            return true;
        }

        let prefix = prefix.trim().to_lowercase();
        let matched = self.filters.iter().find(|f| match f {
            Filter::Category(tag) => tag.to_lowercase().starts_with(&prefix),
            Filter::All => false,
        });

        match matched.cloned() {
            Some(filter) => {
                self.apply_filter(filter);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::test_app;
    use crate::gallery::Filter;

    fn active_ids(app: &crate::app::App) -> Vec<u32> {
        app.gallery.active().iter().map(|p| p.id).collect()
    }

    #[test]
    fn select_filter_rerenders_board() {
        let mut app = test_app(8, &["a", "b"]);
        app.ui.selected = 5;
        app.select_filter(2);

        assert_eq!(active_ids(&app), vec![2, 4, 6, 8]);
        assert_eq!(app.board.len(), 4);
        assert_eq!(app.board.tile(1).map(|t| t.photo_id), Some(4));
        assert_eq!(app.ui.selected, 0);
    }

    #[test]
    fn filter_cycle_wraps_through_all() {
        let mut app = test_app(6, &["a", "b"]);
        app.next_filter();
        assert_eq!(app.gallery.filter(), &Filter::Category("a".into()));
        app.next_filter();
        app.next_filter();
        assert_eq!(app.gallery.filter(), &Filter::All);
        app.prev_filter();
        assert_eq!(app.gallery.filter(), &Filter::Category("b".into()));
    }

    #[test]
    fn filter_by_prefix_matches_case_insensitively() {
        let mut app = test_app(6, &["Family", "candid"]);
        assert!(app.filter_by_prefix("fam"));
        assert_eq!(active_ids(&app), vec![1, 3, 5]);
        assert!(!app.filter_by_prefix("zzz"));
        assert!(app.filter_by_prefix("all"));
        assert_eq!(app.gallery.active().len(), 6);
    }

    #[test]
    fn filter_invalidates_in_flight_previews() {
        let mut app = test_app(4, &["a", "b"]);
        let before = app.board.generation;
        app.previews.loading.insert(3);
        app.select_filter(1);
        assert!(app.previews.loading.is_empty());
        assert_ne!(app.board.generation, before);
    }

    #[test]
    fn regenerate_keeps_filter_and_rebuilds_filter_bar() {
        let mut app = test_app(4, &["a", "b"]);
        app.select_filter(2);
        app.open_viewer_at(0);

        let mut catalog = app.config.catalog.clone();
        catalog.count = 9;
        catalog.categories = vec!["a".into(), "b".into(), "c".into()];
        app.regenerate_catalog(catalog);

        assert_eq!(active_ids(&app), vec![2, 5, 8]);
        assert_eq!(app.filters.len(), 4);
        assert_eq!(app.board.len(), 3);
        assert!(!app.gallery.lightbox.is_open());
    }
}
