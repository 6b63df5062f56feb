//! Document store: the active animation, the layer selection, and the dirty flag.
//!
//! Every edit the UI can make goes through a named operation here, so a test
//! can drive the exact transition a click would. Replacement is
//! all-or-nothing: an operation that fails leaves the store as it was.
//!
//! Loading (upload, import, saved copy) clears the dirty flag; edits and AI
//! results set it. Every replacement resets the selection to all layers.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde_json::Value;
use tracing::debug;

use crate::color::parse_hex_rgb;
use crate::doc::{Animation, DocError};
use crate::recolor::recolor;
use crate::selection::Selection;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no animation loaded")]
    NoDocument,
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

#[derive(Debug, Default)]
pub struct DocStore {
    document: Option<Animation>,
    selection: Selection,
    dirty: bool,
}

impl DocStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    #[must_use]
    pub fn document(&self) -> Option<&Animation> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether leaving the page should warn about losing edits.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.document.is_some() && self.dirty
    }

    /// `(index, display name, selected)` for every layer of the active document.
    #[must_use]
    pub fn layer_names(&self) -> Vec<(usize, String, bool)> {
        let Some(doc) = &self.document else {
            return Vec::new();
        };
        (0..doc.layer_count())
            .filter_map(|i| doc.layer_name(i).map(|name| (i, name, self.selection.contains(i))))
            .collect()
    }

    // =========================================================================
    // REPLACEMENT
    // =========================================================================

    /// Validate `raw` and make it the active document as a fresh load.
    ///
    /// # Errors
    ///
    /// [`DocError`] when `raw` is not a document; the store is unchanged.
    pub fn load_value(&mut self, raw: Value) -> Result<(), DocError> {
        let doc = Animation::validate(raw)?;
        self.install(doc, false);
        Ok(())
    }

    /// Accept an uploaded file and make it the active document.
    ///
    /// # Errors
    ///
    /// See [`Animation::parse_upload`]; the store is unchanged on error.
    pub fn load_upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), DocError> {
        let doc = Animation::parse_upload(file_name, bytes)?;
        self.install(doc, false);
        Ok(())
    }

    /// Make an already accepted document active as a fresh load.
    pub fn load(&mut self, doc: Animation) {
        self.install(doc, false);
    }

    /// Replace the active document with a generated or edited one. The result
    /// counts as an unsaved edit.
    ///
    /// # Errors
    ///
    /// [`DocError`] when `raw` is not a document; the store is unchanged.
    pub fn replace_with_result(&mut self, raw: Value) -> Result<(), DocError> {
        let doc = Animation::validate(raw)?;
        self.install(doc, true);
        Ok(())
    }

    fn install(&mut self, doc: Animation, dirty: bool) {
        debug!(layers = doc.layer_count(), dirty, "store: document replaced");
        self.selection = Selection::all(doc.layer_count());
        self.document = Some(doc);
        self.dirty = dirty;
    }

    /// Record that the active document now matches what was saved.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    /// Set the declared canvas size.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoDocument`] when nothing is loaded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), StoreError> {
        let doc = self.document.as_ref().ok_or(StoreError::NoDocument)?;
        self.document = Some(doc.resize(width, height));
        self.dirty = true;
        Ok(())
    }

    /// Recolor every static color under the selected layers.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoDocument`] when nothing is loaded.
    pub fn recolor_selected(&mut self, rgb: (u8, u8, u8)) -> Result<(), StoreError> {
        let doc = self.document.as_ref().ok_or(StoreError::NoDocument)?;
        self.document = Some(recolor(doc, &self.selection, rgb));
        self.dirty = true;
        Ok(())
    }

    /// [`DocStore::recolor_selected`] taking `#rgb` / `#rrggbb` text.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidColor`] for unparseable text, otherwise as
    /// [`DocStore::recolor_selected`].
    pub fn recolor_selected_hex(&mut self, hex: &str) -> Result<(), StoreError> {
        let rgb = parse_hex_rgb(hex).ok_or_else(|| StoreError::InvalidColor(hex.to_string()))?;
        self.recolor_selected(rgb)
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    pub fn select_all(&mut self) {
        self.selection = Selection::all(self.layer_count());
    }

    pub fn select_none(&mut self) {
        self.selection = Selection::none();
    }

    /// Flip one layer. Out-of-range indices are ignored; returns whether the
    /// layer is selected afterwards.
    pub fn toggle_layer(&mut self, index: usize) -> bool {
        if index >= self.layer_count() {
            return false;
        }
        self.selection.toggle(index)
    }

    /// Replace the selection, dropping out-of-range indices.
    pub fn set_selection(&mut self, indices: impl IntoIterator<Item = usize>) {
        let mut selection: Selection = indices.into_iter().collect();
        selection.retain_below(self.layer_count());
        self.selection = selection;
    }

    fn layer_count(&self) -> usize {
        self.document.as_ref().map_or(0, Animation::layer_count)
    }
}
