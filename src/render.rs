use crate::index::DistIndex;

use anyhow::{Context, Result};
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    dists: &'a [DistIndex],
}

/// Serialize the finished presentation models into the index page.
pub fn render(title: &str, dists: &[DistIndex]) -> Result<String> {
    IndexTemplate { title, dists }
        .render()
        .context("Failed to render index page")
}
