use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::CANONICAL_TEXTURE_SIZE;
use crate::asset::TextureAsset;
use crate::error::DecodeError;

/// Name-keyed texture assets. A name always maps to its most recent ingest.
///
/// `epoch` counts how many times the store has been cleared. Decodes that
/// run off the main thread capture it up front and are only stored if no
/// clear happened in the meantime.
#[derive(Debug)]
pub struct TextureStore {
    map: HashMap<String, TextureAsset>,
    size: u32,
    epoch: u64,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    pub fn new() -> Self {
        Self::with_size(CANONICAL_TEXTURE_SIZE)
    }

    pub fn with_size(size: u32) -> Self {
        Self {
            map: HashMap::new(),
            size: size.max(1),
            epoch: 0,
        }
    }

    /// Canonical edge length of stored textures.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Decode `bytes` and store the result under `name`, replacing any
    /// previous asset of that name. Nothing is stored on failure.
    pub fn ingest(&mut self, name: &str, bytes: &[u8]) -> Result<&TextureAsset, DecodeError> {
        let asset = TextureAsset::decode(name, bytes, self.size)?;
        Ok(self.store(asset))
    }

    /// Same as [`ingest`](Self::ingest) for a persisted data URL.
    pub fn ingest_data_url(&mut self, name: &str, url: &str) -> Result<&TextureAsset, DecodeError> {
        let asset = TextureAsset::from_data_url(name, url, self.size)?;
        Ok(self.store(asset))
    }

    /// Store an asset decoded elsewhere, but only if the store has not been
    /// cleared since `epoch` was captured.
    pub fn insert_if_current(&mut self, asset: TextureAsset, epoch: u64) -> bool {
        if epoch != self.epoch {
            log::debug!(
                "dropping stale texture '{}' (epoch {} != {})",
                asset.name,
                epoch,
                self.epoch
            );
            return false;
        }
        self.store(asset);
        true
    }

    fn store(&mut self, asset: TextureAsset) -> &TextureAsset {
        match self.map.entry(asset.name.clone()) {
            Entry::Occupied(mut e) => {
                log::debug!("texture '{}' replaced", asset.name);
                e.insert(asset);
                e.into_mut()
            }
            Entry::Vacant(v) => {
                log::info!("texture '{}' added", asset.name);
                v.insert(asset)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TextureAsset> {
        self.map.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Texture names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.map.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureAsset> {
        self.map.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every asset and start a new epoch.
    pub fn clear(&mut self) {
        self.map.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Take over another store's assets and size. Counts as a clear, so
    /// decodes captured against the old contents are rejected afterwards.
    pub fn replace_with(&mut self, other: TextureStore) {
        self.clear();
        self.map = other.map;
        self.size = other.size;
    }
}
