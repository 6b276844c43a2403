use std::path::Path;

use tree_sitter_highlight::HighlightConfiguration;

pub struct LanguageEntry {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    config_fn: fn() -> Result<HighlightConfiguration, tree_sitter::QueryError>,
}

impl LanguageEntry {
    /// Build the highlight configuration, or `None` if the grammar's query
    /// fails to compile.
    pub fn config(&self, highlight_names: &[String]) -> Option<HighlightConfiguration> {
        match (self.config_fn)() {
            Ok(mut config) => {
                config.configure(highlight_names);
                Some(config)
            }
            Err(e) => {
                log::warn!("highlight query for {} failed to compile: {e}", self.name);
                None
            }
        }
    }
}

macro_rules! lang {
    ($name:expr, $exts:expr, $lang_fn:expr, $highlights:expr) => {
        LanguageEntry {
            name: $name,
            extensions: $exts,
            config_fn: || {
                HighlightConfiguration::new(
                    $lang_fn.into(),
                    $name,
                    $highlights,
                    "", // injections
                    "", // locals
                )
            },
        }
    };
}

pub fn language_entries() -> Vec<LanguageEntry> {
    vec![
        lang!(
            "rust",
            &["rs"],
            tree_sitter_rust::LANGUAGE,
            tree_sitter_rust::HIGHLIGHTS_QUERY
        ),
        lang!(
            "javascript",
            &["js", "jsx", "mjs", "cjs"],
            tree_sitter_javascript::LANGUAGE,
            tree_sitter_javascript::HIGHLIGHT_QUERY
        ),
        lang!(
            "typescript",
            &["ts", "tsx"],
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
            tree_sitter_typescript::HIGHLIGHTS_QUERY
        ),
        lang!(
            "python",
            &["py", "pyi"],
            tree_sitter_python::LANGUAGE,
            tree_sitter_python::HIGHLIGHTS_QUERY
        ),
        lang!(
            "json",
            &["json", "jsonc"],
            tree_sitter_json::LANGUAGE,
            tree_sitter_json::HIGHLIGHTS_QUERY
        ),
        lang!(
            "toml",
            &["toml"],
            tree_sitter_toml_ng::LANGUAGE,
            tree_sitter_toml_ng::HIGHLIGHTS_QUERY
        ),
        lang!(
            "css",
            &["css"],
            tree_sitter_css::LANGUAGE,
            tree_sitter_css::HIGHLIGHTS_QUERY
        ),
        lang!(
            "html",
            &["html", "htm"],
            tree_sitter_html::LANGUAGE,
            tree_sitter_html::HIGHLIGHTS_QUERY
        ),
        lang!(
            "go",
            &["go"],
            tree_sitter_go::LANGUAGE,
            tree_sitter_go::HIGHLIGHTS_QUERY
        ),
        lang!(
            "ruby",
            &["rb", "rake", "gemspec"],
            tree_sitter_ruby::LANGUAGE,
            tree_sitter_ruby::HIGHLIGHTS_QUERY
        ),
        lang!(
            "bash",
            &["sh", "bash", "zsh"],
            tree_sitter_bash::LANGUAGE,
            tree_sitter_bash::HIGHLIGHT_QUERY
        ),
        lang!(
            "yaml",
            &["yml", "yaml"],
            tree_sitter_yaml::LANGUAGE,
            tree_sitter_yaml::HIGHLIGHTS_QUERY
        ),
    ]
}

/// Map a user-supplied language identifier (`"rust"`, `"rs"`, `"YAML"`) to
/// the canonical name of a supported grammar.
pub fn resolve_language(id: &str) -> Option<&'static str> {
    let id = id.trim().to_ascii_lowercase();
    let aliased = match id.as_str() {
        "js" | "node" => "javascript",
        "ts" => "typescript",
        "sh" | "shell" | "zsh" => "bash",
        "yml" => "yaml",
        other => other,
    };
    language_entries()
        .into_iter()
        .find(|entry| entry.name == aliased || entry.extensions.contains(&aliased))
        .map(|entry| entry.name)
}

/// Guess a language from a file path.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if let Some(entry) = language_entries()
            .into_iter()
            .find(|entry| entry.extensions.contains(&ext))
        {
            return Some(entry.name);
        }
    }
    let filename = path.file_name()?.to_str()?;
    match filename {
        "Makefile" | "makefile" | "GNUmakefile" => Some("bash"),
        "Dockerfile" => Some("bash"),
        "Gemfile" | "Rakefile" => Some("ruby"),
        "Cargo.lock" => Some("toml"),
        _ => None,
    }
}
