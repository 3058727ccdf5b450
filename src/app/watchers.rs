use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, unbounded};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::{App, AppError};
use crate::render::RenderScene;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Texture name for a file: its file name, extension included.
pub fn texture_name_for(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Watches a directory for image files being created or rewritten.
pub struct DropWatcher {
    dir: PathBuf,
    rx: Receiver<PathBuf>,
    _watcher: RecommendedWatcher,
}

impl DropWatcher {
    pub fn spawn(dir: &Path) -> notify::Result<Self> {
        let (tx, rx) = unbounded::<PathBuf>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else {
                return;
            };
            match event.kind {
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any => {
                    for p in event.paths {
                        if is_image_path(&p) {
                            let _ = tx.send(p);
                        }
                    }
                }
                _ => {}
            }
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            rx,
            _watcher: watcher,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths reported since the last call, deduplicated.
    pub fn drain(&self) -> BTreeSet<PathBuf> {
        self.rx.try_iter().collect()
    }
}

/// Image files already present in `dir`, sorted.
fn existing_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image_path(p))
        .collect();
    out.sort();
    Ok(out)
}

impl<S: RenderScene> App<S> {
    /// Start watching `dir`: images already there are queued for decoding
    /// now, later ones as they appear. Returns how many were queued up front.
    pub fn watch_dir(&mut self, dir: &Path) -> Result<usize, AppError> {
        let watcher = DropWatcher::spawn(dir).map_err(|source| AppError::Watch {
            path: dir.to_path_buf(),
            source,
        })?;
        let existing = existing_images(dir).unwrap_or_else(|e| {
            log::warn!("listing {}: {}", dir.display(), e);
            Vec::new()
        });
        let queued = existing.len();
        for path in existing {
            self.request_texture(path, None);
        }
        log::info!("watching {} for textures ({} queued)", dir.display(), queued);
        self.drop_watch = Some(watcher);
        Ok(queued)
    }

    pub(super) fn process_drop_events(&mut self) {
        let Some(watch) = self.drop_watch.as_ref() else {
            return;
        };
        let changed = watch.drain();
        if changed.is_empty() {
            return;
        }
        log::info!("texture drop: {} file(s) in {}", changed.len(), watch.dir().display());
        for path in changed {
            log::debug!(" - {}", path.display());
            self.request_texture(path, None);
        }
    }
}
