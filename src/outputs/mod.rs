//! Rendering of feeds and saved items for the terminal.
//!
//! # Submodules
//!
//! - [`text`]: human-readable cards with summary previews
//! - [`structured`]: JSON and YAML for piping into other tools
//!
//! Positions printed by the text renderer are the indices `saved add` and
//! `saved remove` expect.

pub mod structured;
pub mod text;

use crate::error::RenderError;
use crate::models::{ArticleRecord, SavedItem};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    Yaml,
}

pub fn render_feed(
    articles: &[&ArticleRecord],
    format: Format,
    full: bool,
) -> Result<String, RenderError> {
    match format {
        Format::Text => Ok(text::feed(articles, full)),
        Format::Json => structured::to_json(articles),
        Format::Yaml => structured::to_yaml(articles),
    }
}

pub fn render_saved(items: &[SavedItem], format: Format) -> Result<String, RenderError> {
    match format {
        Format::Text => Ok(text::saved(items)),
        Format::Json => structured::to_json(items),
        Format::Yaml => structured::to_yaml(items),
    }
}
