use anyhow::Result;

use crate::render::document::PrintDocument;

/// Render a print document as pretty-printed JSON
pub fn render(document: &PrintDocument) -> Result<String> {
    let json = serde_json::to_string_pretty(document)?;
    Ok(json)
}
