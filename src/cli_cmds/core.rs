use anyhow::{Context, Result};

use crate::catalog::Photo;
use crate::error::GalleryError;
use crate::gallery::{filter_photos, Filter, Gallery};
use crate::{app, share};

/// Resolve a CLI category argument against the catalog's categories.
fn resolve_filter(category: Option<&str>, known: &[String]) -> Result<Filter, GalleryError> {
    let Some(name) = category else {
        return Ok(Filter::All);
    };
    match Filter::parse(name) {
        Filter::All => Ok(Filter::All),
        Filter::Category(tag) if known.contains(&tag) => Ok(Filter::Category(tag)),
        Filter::Category(tag) => Err(GalleryError::UnknownCategory(tag)),
    }
}

fn format_listing(photos: &[Photo]) -> String {
    let width = photos
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(0);
    photos
        .iter()
        .map(|p| format!("{:>4}  {:<width$}  {}\n", p.id, p.category, p.src.display()))
        .collect()
}

pub fn cmd_list(config: &app::Config, category: Option<&str>, json: bool) -> Result<()> {
    let spec = config.catalog_spec();
    let gallery = Gallery::from_spec(&spec);
    let filter = resolve_filter(category, &spec.distinct_categories())?;
    let photos = filter_photos(gallery.catalog(), &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&photos)?);
        return Ok(());
    }

    if photos.is_empty() {
        println!("No photos found");
        return Ok(());
    }
    print!("{}", format_listing(&photos));
    Ok(())
}

pub fn cmd_categories(config: &app::Config) -> Result<()> {
    let spec = config.catalog_spec();
    let catalog = spec.generate();
    let categories = spec.distinct_categories();

    if categories.is_empty() {
        println!("No categories configured.");
        println!("Add them under [catalog] categories in {}", app::Config::config_path().display());
        return Ok(());
    }

    println!("Categories:");
    for tag in categories {
        let count = catalog.iter().filter(|p| p.category == tag).count();
        println!("  {} ({})", tag, count);
    }
    Ok(())
}

pub fn cmd_share(config: &app::Config, id: u32, print: bool) -> Result<()> {
    let gallery = Gallery::from_spec(&config.catalog_spec());
    let photo = gallery.find(id)?;
    let url = share::photo_url(photo, config.share.public_base_url.as_deref());
    let link = share::share_link(&config.share.service_url, &config.share.caption, &url);

    if print {
        println!("{}", link);
    } else {
        share::open_url(&link).with_context(|| format!("Failed to share {}", photo.label()))?;
        println!("✓ Opened share link for {}", photo.label());
    }
    Ok(())
}
