//! Minimal `{{ variable }}` substitution for letter templates.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A parsed letter template.
#[derive(Debug, Clone)]
pub struct LetterTemplate {
    segments: Vec<Segment>,
}

impl LetterTemplate {
    /// Splits `source` into literal text and `{{ name }}` placeholders.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in placeholder_re().captures_iter(source) {
            let whole = caps.get(0).expect("group 0 always matches");
            if whole.start() > last {
                segments.push(Segment::Text(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Var(caps[1].to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Text(source[last..].to_string()));
        }

        Self { segments }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template '{}'", path.display()))?;
        Ok(Self::parse(&source))
    }

    /// Names of the placeholders, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitutes every placeholder. Values are inserted verbatim.
    pub fn render(&self, vars: &HashMap<&str, String>) -> Result<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => match vars.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => bail!("Template references unknown variable '{name}'"),
                },
            }
        }

        Ok(out)
    }
}
