//! Localization module - Typed message keys and the per-language catalog.

mod catalog;

pub use catalog::{text, text_or_default, MessageKey, DEFAULT_LANGUAGE};
