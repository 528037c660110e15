use crate::error::{KitError, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap())
}

/// Substitute every `{{ name }}` in `template` with `values[name]`.
///
/// The whole output is built before returning; an unknown placeholder fails
/// the render and nothing is produced.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> Result<String> {
    let re = placeholder_re();
    if let Some(unknown) = re
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .find(|name| !values.contains_key(name))
    {
        return Err(KitError::UnknownPlaceholder(unknown));
    }
    let rendered = re.replace_all(template, |caps: &Captures| values[&caps[1]].clone());
    Ok(rendered.into_owned())
}
