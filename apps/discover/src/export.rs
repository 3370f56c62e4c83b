use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::domain::GeneratedContent;

/// Writes an inline rendition into `dir` as `<slug>-rendition.<ext>`.
/// Returns `None` when there is no inline rendition to write.
pub fn save_rendition(dir: &Path, content: &GeneratedContent) -> Result<Option<PathBuf>> {
    let Some(rendition) = content.rendition_url.as_deref() else {
        return Ok(None);
    };
    let Some((mime_type, payload)) = split_data_uri(rendition) else {
        return Ok(None);
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| anyhow!("rendition payload is not valid base64: {err}"))?;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create rendition directory '{}'", dir.display()))?;

    let path = dir.join(format!(
        "{}-rendition.{}",
        slugify(&content.text_data.name),
        extension_for(mime_type)
    ));
    fs::write(&path, bytes)
        .with_context(|| format!("failed to write rendition '{}'", path.display()))?;

    Ok(Some(path))
}

fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    Some((mime_type, payload))
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "mathematician".to_string()
    } else {
        slug
    }
}
