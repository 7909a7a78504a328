use super::{App, AppEvent, Config, PreviewFailure, PreviewRequest, PreviewResponse};
use crate::render::TileState;
use crate::thumbnail::PreviewCache;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const PREVIEW_REQUEST_QUEUE_CAPACITY: usize = 256;
const APP_EVENT_QUEUE_CAPACITY: usize = 1024;
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run_tui(config: Config) -> Result<()> {
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Bounded queue prevents unlimited backlog while scrolling fast.
    let (preview_tx, preview_rx) =
        mpsc::sync_channel::<PreviewRequest>(PREVIEW_REQUEST_QUEUE_CAPACITY);
    let (event_tx, event_rx) = mpsc::sync_channel::<AppEvent>(APP_EVENT_QUEUE_CAPACITY);

    app.set_preview_channel(preview_tx);

    let event_tx_preview = event_tx.clone();
    let disk_cache = PreviewCache::new();
    thread::spawn(move || {
        preview_worker(preview_rx, event_tx_preview, disk_cache);
    });

    let event_tx_input = event_tx.clone();
    thread::spawn(move || {
        input_worker(event_tx_input);
    });

    info!("terminal ui started");
    let res = run_app(&mut terminal, &mut app, event_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("terminal ui stopped");

    res
}

/// Background thread that decodes and downsizes photos.
///
/// A photo that cannot be read or decoded is reported back as a failure;
/// the tile switches to its placeholder and nothing is logged.
fn preview_worker(rx: Receiver<PreviewRequest>, tx: SyncSender<AppEvent>, disk_cache: PreviewCache) {
    while let Ok(first_request) = rx.recv() {
        let requests = collect_latest_requests(first_request, &rx);

        for request in requests {
            let event = match disk_cache.load(&request.source_path) {
                Ok(image) => AppEvent::PreviewReady(PreviewResponse {
                    position: request.position,
                    image,
                    generation: request.generation,
                }),
                Err(_) => AppEvent::PreviewFailed(PreviewFailure {
                    position: request.position,
                    photo_id: request.photo_id,
                    generation: request.generation,
                }),
            };
            if !send_preview_event(&tx, event) {
                return;
            }
        }
    }
}

fn send_preview_event(tx: &SyncSender<AppEvent>, event: AppEvent) -> bool {
    tx.send(event).is_ok()
}

/// Drain queued requests, keeping the newest generation and one request per position.
fn collect_latest_requests(
    first_request: PreviewRequest,
    rx: &Receiver<PreviewRequest>,
) -> Vec<PreviewRequest> {
    let mut latest_generation = first_request.generation;
    let mut latest_by_position: HashMap<usize, PreviewRequest> = HashMap::new();
    latest_by_position.insert(first_request.position, first_request);

    while let Ok(request) = rx.try_recv() {
        if request.generation > latest_generation {
            latest_generation = request.generation;
            latest_by_position.clear();
        }

        if request.generation == latest_generation {
            latest_by_position.insert(request.position, request);
        }
    }

    let mut requests: Vec<_> = latest_by_position.into_values().collect();
    requests.sort_by_key(|r| r.position);
    requests
}

/// Background thread that polls for input events.
fn input_worker(tx: SyncSender<AppEvent>) {
    loop {
        if event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                Ok(Event::Mouse(mouse)) => Some(AppEvent::Mouse(mouse)),
                Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(event) = forwarded {
                if tx.send(event).is_err() {
                    break;
                }
            }
        } else {
            match tx.try_send(AppEvent::Tick) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}

/// Collapse a burst of preview results: older generations are dropped and a
/// later result for the same position replaces an earlier one.
fn coalesce_preview_events(events: Vec<AppEvent>) -> Vec<AppEvent> {
    let mut coalesced = Vec::with_capacity(events.len());
    let mut latest_generation: Option<u64> = None;
    let mut latest_by_position: HashMap<usize, AppEvent> = HashMap::new();

    for event in events {
        let (position, generation) = match &event {
            AppEvent::PreviewReady(r) => (r.position, r.generation),
            AppEvent::PreviewFailed(f) => (f.position, f.generation),
            _ => {
                coalesced.push(event);
                continue;
            }
        };

        match latest_generation {
            None => latest_generation = Some(generation),
            Some(gen) if generation > gen => {
                latest_generation = Some(generation);
                latest_by_position.clear();
            }
            Some(gen) if generation < gen => continue,
            Some(_) => {}
        }
        latest_by_position.insert(position, event);
    }

    if !latest_by_position.is_empty() {
        let mut previews: Vec<_> = latest_by_position.into_iter().collect();
        previews.sort_by_key(|(position, _)| *position);
        coalesced.extend(previews.into_iter().map(|(_, event)| event));
    }

    coalesced
}

/// What the event loop has to do to the screen after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redraw {
    Skip,
    Draw,
    ClearAndDraw,
}

impl App {
    fn handle_event(&mut self, event: AppEvent) -> Redraw {
        match event {
            AppEvent::Key(key) => {
                self.handle_key(key);
                Redraw::Draw
            }
            AppEvent::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Redraw::Draw
            }
            AppEvent::PreviewReady(response) => {
                self.handle_preview_ready(response);
                Redraw::Draw
            }
            AppEvent::PreviewFailed(failure) => {
                self.handle_preview_failed(failure);
                Redraw::Draw
            }
            AppEvent::Resize => {
                self.handle_resize();
                Redraw::ClearAndDraw
            }
            AppEvent::Tick if self.is_animating(Instant::now()) => Redraw::Draw,
            AppEvent::Tick => Redraw::Skip,
        }
    }

    /// Whether something on screen changes without user input.
    fn is_animating(&self, now: Instant) -> bool {
        !self.decoration.glyphs.is_empty()
            || self.board.tiles.iter().any(|tile| {
                matches!(tile.state, TileState::Loaded { .. }) && tile.fade_progress(now) < 1.0
            })
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: Receiver<AppEvent>,
) -> Result<()> {
    let auto_theme = app.config.theme.mode.eq_ignore_ascii_case("auto");
    let mut last_theme_check = Instant::now();
    let mut current_theme_is_light = ui::theme::is_light_theme();
    let mut needs_redraw = true;

    loop {
        if auto_theme && last_theme_check.elapsed() >= Duration::from_millis(500) {
            let new_is_light = ui::theme::is_light_theme();
            if new_is_light != current_theme_is_light {
                current_theme_is_light = new_is_light;
                app.ui.theme = ui::theme::gallery_theme("auto");
                terminal.clear()?;
                needs_redraw = true;
            }
            last_theme_check = Instant::now();
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw(f, app))?;
            needs_redraw = false;
        }

        let events: Vec<AppEvent> = match event_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let mut events = vec![event];
                while let Ok(e) = event_rx.try_recv() {
                    events.push(e);
                }
                coalesce_preview_events(events)
            }
            Err(_) => continue,
        };

        for event in events {
            match app.handle_event(event) {
                Redraw::Skip => {}
                Redraw::Draw => needs_redraw = true,
                Redraw::ClearAndDraw => {
                    terminal.clear()?;
                    needs_redraw = true;
                }
            }
        }

        if app.ui.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{coalesce_preview_events, collect_latest_requests, send_preview_event, Redraw};
    use crate::app::tests::test_app;
    use crate::app::{AppEvent, PreviewFailure, PreviewRequest, PreviewResponse};
    use crate::render::{TileState, FADE_DURATION};
    use std::sync::mpsc;
    use std::time::Instant;

    fn request(position: usize, generation: u64, suffix: &str) -> PreviewRequest {
        PreviewRequest {
            position,
            photo_id: position as u32 + 1,
            source_path: format!("/tmp/{suffix}.jpg").into(),
            generation,
        }
    }

    fn ready(position: usize, generation: u64) -> AppEvent {
        AppEvent::PreviewReady(PreviewResponse {
            position,
            image: image::DynamicImage::new_rgba8(1, 1),
            generation,
        })
    }

    fn failed(position: usize, generation: u64) -> AppEvent {
        AppEvent::PreviewFailed(PreviewFailure {
            position,
            photo_id: position as u32 + 1,
            generation,
        })
    }

    #[test]
    fn collect_latest_requests_keeps_newest_generation_only() {
        let (tx, rx) = mpsc::sync_channel(16);
        tx.send(request(0, 1, "old-a")).expect("send old-a");
        tx.send(request(1, 1, "old-b")).expect("send old-b");
        tx.send(request(2, 2, "new-a")).expect("send new-a");
        tx.send(request(3, 2, "new-b")).expect("send new-b");

        let first = rx.recv().expect("recv first");
        let batch = collect_latest_requests(first, &rx);

        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|r| r.generation == 2));
        assert_eq!(batch[0].position, 2);
        assert_eq!(batch[1].position, 3);
    }

    #[test]
    fn collect_latest_requests_deduplicates_position() {
        let (tx, rx) = mpsc::sync_channel(16);
        tx.send(request(7, 5, "first")).expect("send first");
        tx.send(request(7, 5, "second")).expect("send second");
        tx.send(request(8, 5, "other")).expect("send other");

        let first = rx.recv().expect("recv first");
        let batch = collect_latest_requests(first, &rx);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].position, 7);
        assert_eq!(batch[0].source_path.to_string_lossy(), "/tmp/second.jpg");
        assert_eq!(batch[1].position, 8);
    }

    #[test]
    fn send_returns_false_when_receiver_is_gone() {
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        assert!(!send_preview_event(&tx, ready(42, 9)));
    }

    #[test]
    fn coalesce_keeps_latest_generation_and_dedupes_position() {
        let events = vec![
            ready(0, 1),
            AppEvent::Tick,
            failed(1, 1),
            ready(2, 2),
            failed(2, 2),
            ready(3, 2),
        ];

        let mut kept = Vec::new();
        let mut saw_tick = false;
        for event in coalesce_preview_events(events) {
            match event {
                AppEvent::PreviewReady(r) => kept.push((r.position, r.generation, "ready")),
                AppEvent::PreviewFailed(f) => kept.push((f.position, f.generation, "failed")),
                AppEvent::Tick => saw_tick = true,
                _ => {}
            }
        }

        assert!(saw_tick);
        assert_eq!(kept, vec![(2, 2, "failed"), (3, 2, "ready")]);
    }

    #[test]
    fn animation_stops_once_tiles_settle() {
        let mut app = test_app(2, &["a"]);
        let generation = app.board.generation;
        assert!(!app.is_animating(Instant::now()));

        app.handle_preview_ready(PreviewResponse {
            position: 0,
            image: image::DynamicImage::new_rgba8(1, 1),
            generation,
        });
        assert!(app.is_animating(Instant::now()));
        assert!(!app.is_animating(Instant::now() + FADE_DURATION * 4));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut out) = self.0.lock() {
                out.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_preview_swaps_in_placeholder_without_logging() {
        let mut app = test_app(2, &["a"]);
        let generation = app.board.generation;
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let redraw = tracing::subscriber::with_default(subscriber, || {
            app.handle_event(AppEvent::PreviewFailed(PreviewFailure {
                position: 1,
                photo_id: 2,
                generation,
            }))
        });

        assert_eq!(redraw, Redraw::Draw);
        assert!(matches!(
            app.board.tile(1).map(|t| &t.state),
            Some(TileState::Failed { .. })
        ));
        let logged = captured.0.lock().map(|out| out.clone()).unwrap_or_default();
        assert!(logged.is_empty(), "{}", String::from_utf8_lossy(&logged));
    }

    #[test]
    fn idle_tick_skips_redraw() {
        let mut app = test_app(2, &["a"]);
        app.decoration.glyphs.clear();
        assert_eq!(app.handle_event(AppEvent::Tick), Redraw::Skip);
    }
}
