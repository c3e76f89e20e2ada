use anyhow::{Context as AnyhowContext, Result};
use romaneio_report::PageLayout;
use std::fs;
use std::path::Path;

pub(crate) const STORE_ENV: &str = "ROMANEIO_STORE";
pub(crate) const DEFAULT_STORE: &str = "romaneio.json";

/// Default layout, or the JSON override at `path`. Fields missing from the
/// file keep their defaults; the result is validated before use.
pub(crate) fn load_layout(path: Option<&Path>) -> Result<PageLayout> {
    let layout = match path {
        None => PageLayout::default(),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read layout {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse layout {}", path.display()))?
        }
    };
    layout.validate()?;
    Ok(layout)
}
