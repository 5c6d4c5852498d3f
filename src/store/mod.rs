mod kv;

pub use kv::{FileStore, KvStore, MemoryStore};

use std::collections::BTreeSet;
use std::path::Path;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Error, Result};
use crate::render::{decode_png, encode_png};

// Saved code
//------------------------------------------------------------------------------

/// A saved QR: PNG bytes plus the text it was generated from.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct SavedQrCode {
    id: Uuid,
    #[serde(with = "png_base64")]
    image: Vec<u8>,
    text: String,
}

impl SavedQrCode {
    fn new(image: Vec<u8>, text: String) -> Self {
        Self { id: Uuid::new_v4(), image, text }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// PNG-encoded raster.
    pub fn image_bytes(&self) -> &[u8] {
        &self.image
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn decode_image(&self) -> Result<RgbImage> {
        decode_png(&self.image)
    }
}

mod png_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

// Saved code store
//------------------------------------------------------------------------------

/// Ordered saved codes, written through to a [`KvStore`] after every mutation.
///
/// A mutation only lands in memory once the write succeeded, so memory and storage
/// never disagree.
pub struct SavedCodeStore<K> {
    kv: K,
    key: String,
    codes: Vec<SavedQrCode>,
}

impl<K: KvStore> SavedCodeStore<K> {
    /// Reads the list stored under `key`. Missing or corrupt data gives an empty store.
    pub fn load(kv: K, key: impl Into<String>) -> Self {
        let mut store = Self { kv, key: key.into(), codes: Vec::new() };
        store.reload();
        store
    }

    /// Re-reads the persisted list, discarding the in-memory one.
    pub fn reload(&mut self) {
        self.codes = match self.read() {
            Ok(codes) => codes,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "Discarding unreadable saved codes");
                Vec::new()
            }
        };
        tracing::debug!(key = %self.key, count = self.codes.len(), "Loaded saved codes");
    }

    fn read(&self) -> Result<Vec<SavedQrCode>> {
        match self.kv.get(&self.key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn commit(&mut self, codes: Vec<SavedQrCode>) -> Result<()> {
        let bytes = serde_json::to_vec(&codes)?;
        self.kv.set(&self.key, &bytes)?;
        self.codes = codes;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.codes.len() {
            return Err(Error::IndexOutOfRange { index, len: self.codes.len() });
        }
        Ok(())
    }

    /// PNG-encodes `raster` and appends it with `text`.
    pub fn save(&mut self, raster: &RgbImage, text: impl Into<String>) -> Result<&SavedQrCode> {
        let png = encode_png(raster)?;
        let code = SavedQrCode::new(png, text.into());
        let id = code.id;

        let mut next = self.codes.clone();
        next.push(code);
        self.commit(next)?;

        tracing::info!(%id, count = self.codes.len(), "Saved QR code");
        Ok(&self.codes[self.codes.len() - 1])
    }

    /// Moves the entry at `from` so that it ends up at index `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let mut next = self.codes.clone();
        let code = next.remove(from);
        next.insert(to, code);
        self.commit(next)?;

        tracing::info!(from, to, "Moved saved QR code");
        Ok(())
    }

    /// Removes every listed position in one write. Any out-of-range index rejects the call.
    pub fn delete<I: IntoIterator<Item = usize>>(&mut self, indices: I) -> Result<()> {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        if let Some(&max) = indices.last() {
            self.check_index(max)?;
        } else {
            return Ok(());
        }

        let next = self
            .codes
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, c)| c.clone())
            .collect();
        self.commit(next)?;

        tracing::info!(removed = indices.len(), count = self.codes.len(), "Deleted saved QR codes");
        Ok(())
    }

    /// Empties the store and removes the persisted key altogether.
    pub fn clear_all(&mut self) -> Result<()> {
        self.kv.remove(&self.key)?;
        self.codes.clear();
        tracing::info!(key = %self.key, "Cleared saved QR codes");
        Ok(())
    }

    /// Writes the PNG of the entry at `index` to `path`.
    pub fn export_png(&self, index: usize, path: impl AsRef<Path>) -> Result<()> {
        self.check_index(index)?;
        let path = path.as_ref();
        std::fs::write(path, self.codes[index].image_bytes())
            .map_err(|e| Error::storage(path.display().to_string(), e))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SavedQrCode> {
        self.codes.get(index)
    }

    pub fn find(&self, id: Uuid) -> Option<&SavedQrCode> {
        self.codes.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedQrCode> {
        self.codes.iter()
    }

    pub fn codes(&self) -> &[SavedQrCode] {
        &self.codes
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn into_kv(self) -> K {
        self.kv
    }
}

impl<'a, K: KvStore> IntoIterator for &'a SavedCodeStore<K> {
    type Item = &'a SavedQrCode;
    type IntoIter = std::slice::Iter<'a, SavedQrCode>;
    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
