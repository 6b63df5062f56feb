//! Animation document: the JSON tree the editor works on.
//!
//! A document is kept as the raw JSON object it arrived as. Only `w`, `h`,
//! and the `layers → shapes → it → c.k` color path are ever interpreted;
//! everything else is carried through untouched so that export reproduces
//! what was imported.
//!
//! Acceptance is presence-only: an object carrying non-null `v`, `w`, `h`,
//! and `layers` is a document. Types are not checked.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{INVALID_LOTTIE_MESSAGE, MAX_CANVAS_DIM, MIN_CANVAS_DIM, REQUIRED_FIELDS};

/// Errors raised while accepting a document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// The JSON is well formed but is not an animation document.
    #[error("not a valid Lottie file: {0}")]
    InvalidDocument(String),

    /// The bytes are not JSON at all.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The upload does not have a `.json` name.
    #[error("{}", crate::consts::NOT_JSON_FILE_MESSAGE)]
    NotJsonFile,
}

impl DocError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotJsonFile => self.to_string(),
            Self::InvalidDocument(_) | Self::InvalidJson(_) => INVALID_LOTTIE_MESSAGE.to_string(),
        }
    }
}

/// An accepted animation document.
///
/// Deserializing runs [`Animation::validate`], so a document read back from
/// storage or an import file holds the same guarantees as an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Animation(Map<String, Value>);

impl TryFrom<Value> for Animation {
    type Error = DocError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::validate(raw)
    }
}

impl From<Animation> for Value {
    fn from(doc: Animation) -> Self {
        Value::Object(doc.0)
    }
}

impl Animation {
    /// Accept `raw` as a document if it is an object carrying every required field.
    ///
    /// The object is returned unchanged. Only absence and `null` fail: falsy
    /// values such as `"w": 0` or `"v": ""` are accepted, and types are not
    /// checked.
    ///
    /// # Errors
    ///
    /// [`DocError::InvalidDocument`] naming what is missing.
    pub fn validate(raw: Value) -> Result<Self, DocError> {
        let Value::Object(map) = raw else {
            return Err(DocError::InvalidDocument("top level is not an object".into()));
        };
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| map.get(*field).is_none_or(Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(DocError::InvalidDocument(format!("missing {}", missing.join(", "))));
        }
        Ok(Self(map))
    }

    /// Parse JSON text and validate it.
    ///
    /// # Errors
    ///
    /// [`DocError::InvalidJson`] or [`DocError::InvalidDocument`].
    pub fn parse(text: &str) -> Result<Self, DocError> {
        Self::validate(serde_json::from_str(text)?)
    }

    /// Accept a dropped or picked file: the name must end in `.json`, then the
    /// contents must parse and validate.
    ///
    /// # Errors
    ///
    /// [`DocError::NotJsonFile`] before reading, otherwise as [`Animation::parse`].
    pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Self, DocError> {
        if !file_name.to_ascii_lowercase().ends_with(".json") {
            return Err(DocError::NotJsonFile);
        }
        Self::validate(serde_json::from_slice(bytes)?)
    }

    /// Declared canvas width, when it is an integer.
    #[must_use]
    pub fn width(&self) -> Option<i64> {
        self.0.get("w").and_then(Value::as_i64)
    }

    /// Declared canvas height, when it is an integer.
    #[must_use]
    pub fn height(&self) -> Option<i64> {
        self.0.get("h").and_then(Value::as_i64)
    }

    /// The `layers` sequence, or an empty slice when it is not an array.
    #[must_use]
    pub fn layers(&self) -> &[Value] {
        self.0
            .get("layers")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }

    pub(crate) fn layers_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.0.get_mut("layers").and_then(Value::as_array_mut)
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers().len()
    }

    /// Display name for the layer at `index`: its `nm`, or `Layer <index>`.
    #[must_use]
    pub fn layer_name(&self, index: usize) -> Option<String> {
        let layer = self.layers().get(index)?;
        Some(
            layer
                .get("nm")
                .and_then(Value::as_str)
                .map_or_else(|| format!("Layer {index}"), str::to_owned),
        )
    }

    /// Copy with `w`/`h` replaced. Content coordinates are not rescaled.
    #[must_use]
    pub fn resize(&self, width: u32, height: u32) -> Self {
        let mut next = self.clone();
        next.0.insert("w".into(), Value::from(width));
        next.0.insert("h".into(), Value::from(height));
        next
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Clamp a requested canvas dimension to the range the size controls offer.
#[must_use]
pub fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_CANVAS_DIM, MAX_CANVAS_DIM)
}
