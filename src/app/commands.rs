use super::{App, Config};
use crate::gallery::Filter;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    All,
    Filter(&'a str),
    Go(&'a str),
    Share,
    Reload,
    Help,
    Unknown(String),
}

fn parse_command(input: &str) -> Option<Command<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let name = words.next()?;
    let command = name.to_ascii_lowercase();
    let args = trimmed[name.len()..].trim();

    Some(match command.as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "all" | "clear" => Command::All,
        "f" | "filter" | "t" | "tag" => Command::Filter(args),
        "go" | "g" => Command::Go(args),
        "share" => Command::Share,
        "reload" | "rescan" => Command::Reload,
        "h" | "help" => Command::Help,
        _ => Command::Unknown(command),
    })
}

impl App {
    /// Enter command mode.
    pub fn enter_command_mode(&mut self) {
        self.ui.command_mode = true;
        self.ui.command_buffer.clear();
    }

    /// Exit command mode without executing.
    pub fn exit_command_mode(&mut self) {
        self.ui.command_mode = false;
        self.ui.command_buffer.clear();
    }

    pub fn command_input(&mut self, c: char) {
        self.ui.command_buffer.push(c);
    }

    pub fn command_backspace(&mut self) {
        self.ui.command_buffer.pop();
    }

    /// Execute the current command.
    pub fn execute_command(&mut self) {
        let cmd = self.ui.command_buffer.trim().to_string();
        self.ui.command_mode = false;
        self.ui.command_buffer.clear();

        let Some(command) = parse_command(&cmd) else {
            return;
        };

        match command {
            Command::Quit => {
                self.ui.should_quit = true;
            }

            Command::All => {
                self.apply_filter(Filter::All);
            }

            Command::Filter(args) => {
                if args.is_empty() {
                    let tags: Vec<String> = self.filters.iter().map(|f| f.to_string()).collect();
                    self.ui.status_message = Some(format!("Filters: {}", tags.join(", ")));
                } else if !self.filter_by_prefix(args) {
                    self.ui.status_message = Some(format!("Category not found: {}", args));
                }
            }

            Command::Go(args) => match args.parse::<usize>() {
                Ok(n) if n > 0 => self.open_viewer_at(n - 1),
                _ => {
                    self.ui.status_message = Some("Usage: :go <position>".to_string());
                }
            },

            Command::Share => {
                if let Err(e) = self.share_focused() {
                    self.ui.status_message = Some(format!("{:#}", e));
                }
            }

            Command::Reload => match Config::read_from(&Config::config_path()) {
                Ok(fresh) => {
                    let mut catalog = fresh.catalog;
                    // The folder may come from --dir; keep the one in use.
                    catalog.folder = self.config.catalog.folder.clone();
                    self.regenerate_catalog(catalog);
                    self.ui.status_message =
                        Some(format!("Reloaded {} photos", self.gallery.catalog().len()));
                }
                Err(e) => {
                    self.ui.status_message = Some(format!("Reload: {:#}", e));
                }
            },

            Command::Help => {
                self.ui.show_help = true;
            }

            Command::Unknown(command) => {
                self.ui.status_message = Some(format!("Unknown command: {}", command));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use crate::app::tests::test_app;

    #[test]
    fn parse_known_aliases() {
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("QUIT"), Some(Command::Quit));
        assert_eq!(parse_command("clear"), Some(Command::All));
        assert_eq!(parse_command("share"), Some(Command::Share));
        assert_eq!(parse_command("rescan"), Some(Command::Reload));
    }

    #[test]
    fn parse_arguments_are_trimmed() {
        assert_eq!(parse_command("f   family  "), Some(Command::Filter("family")));
        assert_eq!(parse_command("go\t10"), Some(Command::Go("10")));
    }

    #[test]
    fn parse_unknown_command_is_lowercased() {
        assert_eq!(
            parse_command("FoObAr arg"),
            Some(Command::Unknown("foobar".to_string()))
        );
    }

    #[test]
    fn parse_empty_command_returns_none() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command(""), None);
    }

    fn run(app: &mut crate::app::App, line: &str) {
        app.enter_command_mode();
        for c in line.chars() {
            app.command_input(c);
        }
        app.execute_command();
    }

    #[test]
    fn go_opens_viewer_at_one_based_position() {
        let mut app = test_app(5, &["a"]);
        run(&mut app, "go 3");
        assert!(app.gallery.lightbox.is_open());
        assert_eq!(app.gallery.current_photo().map(|p| p.id), Some(3));

        run(&mut app, "go 0");
        assert_eq!(app.ui.status_message.as_deref(), Some("Usage: :go <position>"));
    }

    #[test]
    fn go_past_end_reports_range_error() {
        let mut app = test_app(2, &["a"]);
        run(&mut app, "go 9");
        assert!(!app.gallery.lightbox.is_open());
        assert!(app
            .ui
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("outside the active list")));
    }

    #[test]
    fn filter_command_applies_category() {
        let mut app = test_app(6, &["ring", "family"]);
        run(&mut app, "f fam");
        assert_eq!(app.gallery.active().len(), 3);
        run(&mut app, "f nope");
        assert_eq!(
            app.ui.status_message.as_deref(),
            Some("Category not found: nope")
        );
        run(&mut app, "all");
        assert_eq!(app.gallery.active().len(), 6);
    }
}
