use std::path::{Path, PathBuf};

/// Expand tilde (~) in path
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Truncate to `max_chars` characters, ending with an ellipsis when cut.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        String::new()
    } else if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let truncated: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde(Path::new("M")), PathBuf::from("M"));
        assert_eq!(expand_tilde(Path::new("/abs/M")), PathBuf::from("/abs/M"));
    }

    #[test]
    fn truncate_label_respects_char_boundaries() {
        assert_eq!(truncate_label("Photo 12", 20), "Photo 12");
        assert_eq!(truncate_label("Photo 123", 6), "Photo…");
        assert_eq!(truncate_label("✧✧✧✧", 3), "✧✧…");
        assert_eq!(truncate_label("abc", 0), "");
    }
}
