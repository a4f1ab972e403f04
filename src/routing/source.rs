//! Where page fragments come from.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use super::fragment;
use crate::error::NavError;

/// Asynchronous access to HTML fragments by site path.
///
/// Any failure (missing file, non-success status, network error) is
/// reported as an error and treated by the router as "page not found".
pub trait FragmentSource {
    /// Fetch the fragment at `path` (e.g. `/pages/about.html`).
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, NavError>>;

    /// Inner markup of the element with id `region_id` in a fetched
    /// fragment, or `None` if there is no such element.
    fn extract_region(&self, markup: &str, region_id: &str) -> Option<String> {
        fragment::extract_region(markup, region_id).map(str::to_owned)
    }
}

/// Serves fragments from a directory on disk, e.g. a built `dist/` tree.
#[derive(Debug, Clone)]
pub struct FsFragmentSource {
    root: PathBuf,
}

impl FsFragmentSource {
    /// Serve fragments below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a site path onto the root directory, refusing to escape it.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, NavError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(NavError::RouteNotFound(path.to_owned()));
        }
        Ok(self.root.join(relative))
    }

    fn read(&self, path: &str) -> Result<String, NavError> {
        let file = self.resolve(path)?;
        std::fs::read_to_string(&file).map_err(NavError::Io)
    }
}

impl FragmentSource for FsFragmentSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, NavError>> {
        std::future::ready(self.read(path))
    }
}
