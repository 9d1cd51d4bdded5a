use iced::widget::image::Handle;
use image::{imageops::FilterType, DynamicImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::state::data::Product;

/// Size of generated thumbnails (square)
const THUMBNAIL_SIZE: u32 = 64;

/// Dimensions of the fixed fallback graphic
pub const PLACEHOLDER_SIZE: u32 = 40;

/// Fill color of the fallback graphic (light gray)
const PLACEHOLDER_RGBA: [u8; 4] = [0xE5, 0xE7, 0xEB, 0xFF];

/// Get the thumbnail cache directory
/// Returns ~/.cache/reward-survey/thumbnails on Linux, or None when no
/// cache location is available
fn thumbnail_cache_dir() -> Option<PathBuf> {
    let mut path = dirs_next::cache_dir().or_else(dirs_next::home_dir)?;

    path.push("reward-survey");
    path.push("thumbnails");

    // Ensure the directory exists
    fs::create_dir_all(&path).ok()?;

    Some(path)
}

/// Cache file name for a product id, with path-unfriendly characters mapped away
fn cache_file_name(product_id: &str) -> String {
    let safe: String = product_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}.png", safe)
}

/// Expected cache location for a product's resized thumbnail
fn cached_thumbnail_path(product_id: &str) -> Option<PathBuf> {
    Some(thumbnail_cache_dir()?.join(cache_file_name(product_id)))
}

/// Acquire a displayable thumbnail for a product
///
/// Tries, in order: a previously cached resize, the pre-rendered thumbnail
/// shipped with the survey, a fresh resize of the full product photo.
/// The fixed placeholder is the final tier, so this never fails.
pub fn acquire_thumbnail(product: &Product) -> RgbaImage {
    // Tier 1: cached resized copy
    if let Some(cached) = load_cached(&product.id) {
        return cached;
    }

    // Tier 2: pre-rendered thumbnail from the survey definition
    if let Some(thumb) = load_image(Path::new(&product.thumbnail_path)) {
        return thumb.to_rgba8();
    }

    // Tier 3: resize the full product photo, cache for next time
    if let Some(resized) = resize_product_photo(product) {
        return resized;
    }

    // Tier 4: fixed placeholder
    placeholder_image()
}

/// Load a cached thumbnail for a product id
fn load_cached(product_id: &str) -> Option<RgbaImage> {
    let path = cached_thumbnail_path(product_id)?;
    load_image(&path).map(|img| img.to_rgba8())
}

/// Decode an image file, treating any failure as absence
fn load_image(path: &Path) -> Option<DynamicImage> {
    image::open(path).ok()
}

/// Resize the full product photo down to thumbnail size and cache it
fn resize_product_photo(product: &Product) -> Option<RgbaImage> {
    let photo = load_image(Path::new(&product.image_path))?;
    let resized = photo.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    if let Some(path) = cached_thumbnail_path(&product.id) {
        if resized.save(&path).is_ok() {
            println!("📸 Cached thumbnail: {}", path.display());
        }
    }

    Some(resized.to_rgba8())
}

/// The fixed fallback graphic: a solid light-gray square
pub fn placeholder_image() -> RgbaImage {
    RgbaImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        image::Rgba(PLACEHOLDER_RGBA),
    )
}

/// The fallback graphic as a widget handle
pub fn placeholder_handle() -> Handle {
    let img = placeholder_image();
    Handle::from_rgba(img.width(), img.height(), img.into_raw())
}

/// Load a product's thumbnail in the background
///
/// Decoding runs on a blocking task. Always resolves with pixels; broken
/// or missing images come back as the placeholder.
pub async fn load_product_thumbnail(product: Product) -> (String, Handle) {
    let id = product.id.clone();

    let img = task::spawn_blocking(move || acquire_thumbnail(&product))
        .await
        .unwrap_or_else(|_| placeholder_image());

    let handle = Handle::from_rgba(img.width(), img.height(), img.into_raw());
    (id, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_product() -> Product {
        Product {
            id: "no-such-product".to_string(),
            name: "Ghost".to_string(),
            image_path: "/nonexistent/photo.png".to_string(),
            thumbnail_path: "/nonexistent/thumb.png".to_string(),
        }
    }

    #[test]
    fn test_placeholder_dimensions_and_color() {
        let img = placeholder_image();

        assert_eq!(img.width(), PLACEHOLDER_SIZE);
        assert_eq!(img.height(), PLACEHOLDER_SIZE);
        assert_eq!(*img.get_pixel(0, 0), image::Rgba(PLACEHOLDER_RGBA));
        assert_eq!(
            *img.get_pixel(PLACEHOLDER_SIZE - 1, PLACEHOLDER_SIZE - 1),
            image::Rgba(PLACEHOLDER_RGBA)
        );
    }

    #[test]
    fn test_missing_paths_fall_back_to_placeholder() {
        let img = acquire_thumbnail(&missing_product());

        assert_eq!(img.width(), PLACEHOLDER_SIZE);
        assert_eq!(img.height(), PLACEHOLDER_SIZE);
        assert_eq!(*img.get_pixel(0, 0), image::Rgba(PLACEHOLDER_RGBA));
    }

    #[test]
    fn test_cache_file_name_is_path_safe() {
        assert_eq!(cache_file_name("espresso-maker"), "espresso-maker.png");
        assert_eq!(cache_file_name("a/b:c"), "a_b_c.png");
    }

    #[tokio::test]
    async fn test_background_load_never_fails() {
        let (id, _handle) = load_product_thumbnail(missing_product()).await;

        assert_eq!(id, "no-such-product");
    }
}
