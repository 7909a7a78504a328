use crate::catalog::Photo;
use crate::error::GalleryError;
use std::path::PathBuf;

/// Horizontal drag distance a swipe must exceed to navigate.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Full-screen viewer state: open flag plus a cursor into the active list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    open: bool,
    cursor: usize,
    /// Image source currently bound to the viewer.
    source: Option<PathBuf>,
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Open at `index`, which must be a valid position in a list of `len`.
    pub fn open(&mut self, index: usize, len: usize) -> Result<(), GalleryError> {
        if index >= len {
            return Err(GalleryError::IndexOutOfRange { index, len });
        }
        self.cursor = index;
        self.open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Advance with wraparound. Returns the new cursor, or `None` for an empty list.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % len;
        Some(self.cursor)
    }

    /// Retreat with wraparound. Returns the new cursor, or `None` for an empty list.
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor % len + len - 1) % len;
        Some(self.cursor)
    }

    /// Bind the viewer image to `photo`.
    pub fn display(&mut self, photo: &Photo) {
        self.source = Some(photo.src.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Previous,
    Next,
}

/// Tracks a horizontal drag from press to release.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swipe {
    start_x: Option<f32>,
}

impl Swipe {
    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the drag. Dragging right goes back, dragging left goes forward.
    pub fn end(&mut self, x: f32) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        if x - start > SWIPE_THRESHOLD {
            Some(SwipeDirection::Previous)
        } else if start - x > SWIPE_THRESHOLD {
            Some(SwipeDirection::Next)
        } else {
            None
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_out_of_range_index() {
        let mut lb = Lightbox::default();
        assert_eq!(
            lb.open(3, 3),
            Err(GalleryError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(!lb.is_open());
        assert!(lb.open(2, 3).is_ok());
        assert!(lb.is_open());
        assert_eq!(lb.cursor(), 2);
    }

    #[test]
    fn next_full_cycle_returns_to_start() {
        for len in 1..6 {
            for k in 0..len {
                let mut lb = Lightbox::default();
                lb.open(k, len).unwrap();
                for _ in 0..len {
                    lb.next(len);
                }
                assert_eq!(lb.cursor(), k);
            }
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut lb = Lightbox::default();
        lb.open(0, 4).unwrap();
        assert_eq!(lb.previous(4), Some(3));
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut lb = Lightbox::default();
        lb.open(1, 2).unwrap();
        let before = lb.clone();
        assert_eq!(lb.next(0), None);
        assert_eq!(lb.previous(0), None);
        assert_eq!(lb, before);
    }

    #[test]
    fn close_keeps_cursor() {
        let mut lb = Lightbox::default();
        lb.open(1, 2).unwrap();
        lb.close();
        assert!(!lb.is_open());
        assert_eq!(lb.cursor(), 1);
    }

    #[test]
    fn swipe_needs_more_than_threshold() {
        let mut swipe = Swipe::default();
        swipe.begin(100.0);
        assert_eq!(swipe.end(150.0), None);

        swipe.begin(100.0);
        assert_eq!(swipe.end(150.5), Some(SwipeDirection::Previous));

        swipe.begin(100.0);
        assert_eq!(swipe.end(40.0), Some(SwipeDirection::Next));
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn swipe_end_without_begin_is_ignored() {
        let mut swipe = Swipe::default();
        assert_eq!(swipe.end(500.0), None);
    }
}
