//! Message-sharing deep links for photos.

use crate::catalog::Photo;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

pub const DEFAULT_SHARE_SERVICE: &str = "https://wa.me";
pub const DEFAULT_SHARE_CAPTION: &str = "Check out this engagement photo 💍✨";

/// Build `<service>/?text=<caption>: <photo_url>` with the text percent-encoded.
pub fn share_link(service: &str, caption: &str, photo_url: &str) -> String {
    let text = format!("{}: {}", caption, photo_url);
    format!(
        "{}/?text={}",
        service.trim_end_matches('/'),
        urlencoding::encode(&text)
    )
}

/// Public URL for a photo: `base/src` when a base is configured, else the
/// absolute file path.
pub fn photo_url(photo: &Photo, public_base_url: Option<&str>) -> String {
    match public_base_url {
        Some(base) => {
            let src = photo.src.to_string_lossy().replace('\\', "/");
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                src.trim_start_matches('/')
            )
        }
        None => absolute(&photo.src),
    }
}

fn absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Hand `url` to the platform opener. Fire-and-forget: the child is not awaited.
pub fn open_url(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to launch URL opener")?;
    Ok(())
}

/// Percent-encoding with `encodeURIComponent` semantics.
mod urlencoding {
    pub fn encode(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' => result.push(c),
                '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' => result.push(c),
                _ => {
                    let mut buf = [0u8; 4];
                    for byte in c.encode_utf8(&mut buf).as_bytes() {
                        result.push_str(&format!("%{:02X}", byte));
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn photo() -> Photo {
        Photo {
            id: 12,
            category: "ring".to_string(),
            src: PathBuf::from("M/A (12).JPG"),
        }
    }

    #[test]
    fn encode_matches_uri_component_rules() {
        assert_eq!(urlencoding::encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(urlencoding::encode("A (1).JPG"), "A%20(1).JPG");
        assert_eq!(urlencoding::encode("x/y:z"), "x%2Fy%3Az");
        assert_eq!(urlencoding::encode("💍"), "%F0%9F%92%8D");
        assert_eq!(urlencoding::encode("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn share_link_wraps_caption_and_url() {
        let link = share_link("https://wa.me/", "Look", "https://x.test/M/A (1).JPG");
        assert_eq!(
            link,
            "https://wa.me/?text=Look%3A%20https%3A%2F%2Fx.test%2FM%2FA%20(1).JPG"
        );
    }

    #[test]
    fn default_caption_is_encoded() {
        let link = share_link(DEFAULT_SHARE_SERVICE, DEFAULT_SHARE_CAPTION, "u");
        assert!(link.starts_with("https://wa.me/?text=Check%20out%20this%20engagement%20photo%20"));
        assert!(link.ends_with("%3A%20u"));
    }

    #[test]
    fn photo_url_joins_public_base() {
        assert_eq!(
            photo_url(&photo(), Some("https://photos.example/")),
            "https://photos.example/M/A (12).JPG"
        );
    }

    #[test]
    fn photo_url_falls_back_to_absolute_path() {
        let url = photo_url(&photo(), None);
        assert!(Path::new(&url).is_absolute());
        assert!(url.ends_with("A (12).JPG"));
    }
}
