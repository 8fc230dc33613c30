//! Lumière Portfolio Common Library
//!
//! Web(WASM)とネイティブで共有されるモデル・状態・AIクライアント

pub mod types;
pub mod error;
pub mod state;
pub mod gallery;
pub mod profile;
pub mod upload;
pub mod store;
pub mod prompts;
pub mod parser;
pub mod gemini;

pub use types::{
    seed_photos, seed_profile, ImageCaption, Notice, Photo, ProfileField, Toast, ToastKind,
    UserProfile, ViewState,
};
pub use error::{Error, Result};
pub use state::{AppState, Command, Effect, REMOVE_CONFIRMATION_PROMPT, TOAST_LIFETIME};
pub use gallery::{GridLayout, HoverState};
pub use profile::{contact_links, ContactLink, EditorMode, PolishOutcome, ProfileEditor};
pub use upload::{UploadFlow, UploadPhase, PUBLISH_DELAY, VALIDATION_MESSAGE};
pub use store::{KeyValueStore, MemoryStore, PortfolioStore, PHOTOS_KEY, PROFILE_KEY};
pub use prompts::DEFAULT_BIO_TONE;
pub use parser::{extract_json_object, parse_caption_response};
pub use gemini::{GeminiClient, Transport};
