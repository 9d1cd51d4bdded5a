/// Product imagery module
///
/// This module handles:
/// - Thumbnail acquisition with tiered fallback (thumbnail.rs)
/// - Caching resized thumbnails to disk
/// - The fixed placeholder graphic used when nothing can be loaded

pub mod thumbnail;
