//! Editing core for Lottie animation documents.
//!
//! This crate holds everything the browser editor does to a document that is
//! not drawing or DOM plumbing: accepting uploads, resizing the canvas,
//! recoloring the layers a user has selected, keeping a named library of
//! saved copies in a key-value store, and round-tripping prompts through the
//! AI proxy endpoints. Rendering is left to an external Lottie player.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Animation document type, validation, and canvas resize |
//! | [`color`] | Hex color parsing and normalized RGBA conversion |
//! | [`recolor`] | Fill-color rewrite for shapes under selected layers |
//! | [`selection`] | Set of selected layer indices |
//! | [`store`] | Active document, selection, and dirty flag |
//! | [`storage`] | Key-value store seam (memory, file, browser `localStorage`) |
//! | [`library`] | Saved-animation collection, export, and import |
//! | [`ai`] | Client for the generate/edit proxy endpoints |
//! | [`consts`] | Shared constants (storage key, canvas limits, messages) |

pub mod ai;
pub mod color;
pub mod consts;
pub mod doc;
pub mod library;
pub mod recolor;
pub mod selection;
pub mod storage;
pub mod store;

pub use doc::{Animation, DocError};
pub use library::{Library, SavedAnimation};
pub use selection::Selection;
pub use store::DocStore;
