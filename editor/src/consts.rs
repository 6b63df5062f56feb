//! Shared constants.

/// Key under which the saved-animation collection lives in the key-value store.
pub const STORAGE_KEY: &str = "lottie-animations";

/// Top-level fields an uploaded document must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["v", "w", "h", "layers"];

/// Smallest canvas dimension offered by the size controls.
pub const MIN_CANVAS_DIM: u32 = 50;

/// Largest canvas dimension offered by the size controls.
pub const MAX_CANVAS_DIM: u32 = 1000;

/// Download name for a single exported animation.
pub const SINGLE_EXPORT_FILE_NAME: &str = "animation.json";

/// Download name for the exported library.
pub const LIBRARY_EXPORT_FILE_NAME: &str = "lottie-animations.json";

/// Shown when an upload is not a `.json` file.
pub const NOT_JSON_FILE_MESSAGE: &str = "Please upload a valid .json Lottie file.";

/// Shown when an upload fails to parse or validate.
pub const INVALID_LOTTIE_MESSAGE: &str = "Invalid Lottie JSON.";

/// Shown when an AI request fails without a server-provided message.
pub const AI_FALLBACK_MESSAGE: &str = "AI request failed";
