//! App icons loaded from a directory of `<app_id>.png` files.

use std::path::PathBuf;

use image::DynamicImage;

use super::{HostError, IconSource};

#[derive(Debug, Clone)]
pub struct FileIconSource {
    dir: PathBuf,
}

impl FileIconSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn icon_path(&self, app_id: &str) -> Option<PathBuf> {
        // App ids are dotted names; anything with a separator is not one.
        if app_id.is_empty() || app_id.contains(['/', '\\']) || app_id.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{app_id}.png")))
    }
}

impl IconSource for FileIconSource {
    fn app_icon(&self, app_id: &str) -> Result<DynamicImage, HostError> {
        let path = self
            .icon_path(app_id)
            .filter(|p| p.is_file())
            .ok_or_else(|| HostError::IconNotFound(app_id.to_string()))?;
        image::open(&path).map_err(|source| HostError::IconDecode {
            app_id: app_id.to_string(),
            source,
        })
    }
}
