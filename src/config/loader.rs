use crate::error::CatalogError;
use crate::model::ResourceType;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for accessor generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package of the generated code; overrides the manifests
    pub namespace: Option<String>,

    /// Emit accessors bound to `Context`
    pub generate_resources_extensions: bool,

    /// Emit `@Composable` accessors for the types that support them
    pub generate_compose_extensions: bool,

    /// Resource files to leave out (globs)
    pub exclude: Vec<String>,

    /// Resource types to generate nothing for, by type name
    pub skip_types: Vec<String>,

    /// Root of the generated sources, relative to the module directory
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            generate_resources_extensions: true,
            generate_compose_extensions: false,
            exclude: vec![],
            skip_types: vec![],
            output_dir: PathBuf::from("build/generated/catalog"),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config")?,
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config")?,
            _ => match serde_yaml::from_str(&contents) {
                Ok(config) => config,
                Err(_) => toml::from_str(&contents)
                    .into_diagnostic()
                    .wrap_err("Failed to parse config file")?,
            },
        };

        config
            .skipped_types()
            .wrap_err_with(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the first config file found in `module_dir`, or the defaults
    pub fn from_default_locations(module_dir: &Path) -> Result<Self> {
        let default_names = [
            ".catalog.yml",
            ".catalog.yaml",
            ".catalog.toml",
            "catalog.yml",
            "catalog.yaml",
            "catalog.toml",
        ];

        for name in &default_names {
            let path = module_dir.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Whether a resource file matches one of the exclude globs
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }

    /// `skip_types` resolved to resource types
    pub fn skipped_types(&self) -> Result<Vec<ResourceType>, CatalogError> {
        self.skip_types
            .iter()
            .map(|name| {
                ResourceType::from_name(name.trim()).ok_or_else(|| CatalogError::Config {
                    message: format!("unknown resource type '{}' in skip_types", name),
                })
            })
            .collect()
    }
}

/// Glob matching for exclude patterns.
///
/// `*` and `?` stay within one path segment, `**` crosses segments.
/// A pattern without `/` is matched against the file name only.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    if !pattern.contains('/') {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        return wildcard(pattern.as_bytes(), file_name.as_bytes());
    }
    // "**/x" also matches "x" at the start of a relative path
    wildcard(pattern.as_bytes(), path.as_bytes())
        || pattern
            .strip_prefix("**/")
            .map(|rest| wildcard(format!("**/{}", rest).as_bytes(), format!("/{}", path).as_bytes()))
            .unwrap_or(false)
}

fn wildcard(pattern: &[u8], text: &[u8]) -> bool {
    match pattern {
        [] => text.is_empty(),
        [b'*', b'*', rest @ ..] => (0..=text.len()).any(|i| wildcard(rest, &text[i..])),
        [b'*', rest @ ..] => {
            for i in 0..=text.len() {
                if wildcard(rest, &text[i..]) {
                    return true;
                }
                if text.get(i) == Some(&b'/') {
                    break;
                }
            }
            false
        }
        [b'?', rest @ ..] => match text.split_first() {
            Some((c, tail)) if *c != b'/' => wildcard(rest, tail),
            _ => false,
        },
        [p, rest @ ..] => match text.split_first() {
            Some((c, tail)) if c == p => wildcard(rest, tail),
            _ => false,
        },
    }
}
