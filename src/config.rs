// Runtime configuration: where the publisher store lives and which
// gallery the API client talks to. Both come from the environment with
// sensible defaults, so tests can point the store at a temp directory.

use std::path::PathBuf;

/// Default gallery base URL when `GALLERY_URL` is not set.
pub const DEFAULT_GALLERY_URL: &str = "https://marketplace.visualstudio.com";

/// File name of the store inside the user's home directory.
pub const STORE_FILE_NAME: &str = ".publishers";

#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub gallery_url: String,
}

impl Config {
    /// Build a config from `PUBLISHER_STORE_PATH` and `GALLERY_URL`,
    /// falling back to `~/.publishers` and the public marketplace.
    pub fn from_env() -> Self {
        let store_path = std::env::var_os("PUBLISHER_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_store_path);
        let gallery_url =
            std::env::var("GALLERY_URL").unwrap_or_else(|_| DEFAULT_GALLERY_URL.into());
        Config {
            store_path,
            gallery_url,
        }
    }
}

/// `~/.publishers`, or `./.publishers` when no home directory is known.
pub fn default_store_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(STORE_FILE_NAME)
}
