use super::{rect_contains, App, ViewerControl};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

impl App {
    /// Dispatch a key press. Popups and the viewer capture input first.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.ui.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.ui.show_help = false;
            }
            return;
        }

        if self.ui.command_mode {
            match key.code {
                KeyCode::Esc => self.exit_command_mode(),
                KeyCode::Enter => self.execute_command(),
                KeyCode::Backspace => self.command_backspace(),
                KeyCode::Char(c) => self.command_input(c),
                _ => {}
            }
            return;
        }

        if self.gallery.lightbox.is_open() {
            self.handle_viewer_key(key.code);
            return;
        }

        let kb = &self.config.keybindings;
        let code = key.code;

        if kb.matches(code, &kb.quit) || code == KeyCode::Esc {
            self.ui.should_quit = true;
        } else if kb.matches(code, &kb.next) || code == KeyCode::Right {
            self.select_next_tile();
        } else if kb.matches(code, &kb.prev) || code == KeyCode::Left {
            self.select_prev_tile();
        } else if kb.matches(code, &kb.open) {
            self.open_selected();
        } else if kb.matches(code, &kb.next_filter) {
            self.next_filter();
        } else if kb.matches(code, &kb.prev_filter) {
            self.prev_filter();
        } else if kb.matches(code, &kb.share) {
            if let Err(e) = self.share_focused() {
                self.ui.status_message = Some(format!("{:#}", e));
            }
        } else {
            match code {
                KeyCode::Down | KeyCode::Char('j') => self.select_tile_below(),
                KeyCode::Up | KeyCode::Char('k') => self.select_tile_above(),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    self.select_filter(c.to_digit(10).unwrap_or(0) as usize);
                }
                KeyCode::Char(':') => self.enter_command_mode(),
                KeyCode::Char('?') => self.toggle_help(),
                _ => {}
            }
        }
    }

    /// Keys while the viewer is open: dismiss and directional navigation only.
    fn handle_viewer_key(&mut self, code: KeyCode) {
        let kb = &self.config.keybindings;
        if code == KeyCode::Esc {
            self.close_viewer();
        } else if code == KeyCode::Left || kb.matches(code, &kb.prev) {
            self.viewer_prev();
        } else if code == KeyCode::Right || kb.matches(code, &kb.next) {
            self.viewer_next();
        } else if kb.matches(code, &kb.share) {
            if let Err(e) = self.share_focused() {
                self.ui.status_message = Some(format!("{:#}", e));
            }
        }
    }

    /// Dispatch a mouse event against the regions recorded by the last draw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let viewer_open = self.gallery.lightbox.is_open();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if viewer_open => {
                self.swipe.begin(mouse.column as f32);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if viewer_open {
                    match self.swipe.end(mouse.column as f32) {
                        Some(direction) => {
                            self.gallery.swipe(direction);
                            self.ui.selected = self.gallery.lightbox.cursor();
                        }
                        None => self.click_viewer(mouse.column, mouse.row),
                    }
                } else {
                    self.click_grid(mouse.column, mouse.row);
                }
            }
            MouseEventKind::ScrollDown => {
                if viewer_open {
                    self.viewer_next();
                } else {
                    self.select_tile_below();
                }
            }
            MouseEventKind::ScrollUp => {
                if viewer_open {
                    self.viewer_prev();
                } else {
                    self.select_tile_above();
                }
            }
            _ => {}
        }
    }

    fn click_viewer(&mut self, column: u16, row: u16) {
        let control = self
            .ui
            .regions
            .viewer_controls
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, control)| *control);

        match control {
            Some(ViewerControl::Previous) => self.viewer_prev(),
            Some(ViewerControl::Next) => self.viewer_next(),
            Some(ViewerControl::Close) => self.close_viewer(),
            None => {
                let on_image = self
                    .ui
                    .regions
                    .viewer_frame
                    .is_some_and(|frame| rect_contains(frame, column, row));
                // Only a click on the backdrop itself dismisses.
                if !on_image {
                    self.close_viewer();
                }
            }
        }
    }

    fn click_grid(&mut self, column: u16, row: u16) {
        let regions = &self.ui.regions;
        if let Some(&(_, idx)) = regions
            .filter_buttons
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            self.select_filter(idx);
            return;
        }

        if let Some(&(_, position)) = regions
            .tiles
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
        {
            self.open_viewer_at(position);
        }
    }
}
