//! Icon generation configuration
//!
//! The configuration lives in a JSON file (`react-svg-icon-components.json`
//! by default) next to where the tool is run. It is loaded once and then
//! passed by reference through the pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "react-svg-icon-components.json";

/// Errors that can occur when loading or validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file \"{}\" not found!", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the generated module binds the JSX factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsxRuntime {
    /// `import * as React from "react"`
    #[default]
    Classic,
    /// `import { h } from "preact"`
    ClassicPreact,
    /// No runtime import, the compiler injects `jsx()` calls
    Automatic,
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfig {
    /// Directory holding the source `.svg` files
    pub icons_path: PathBuf,

    /// Directory the components and the index file are written to
    pub output_dir: PathBuf,

    /// Import binding style of the generated modules
    #[serde(default)]
    pub jsx_runtime: JsxRuntime,

    /// Emit TypeScript (`.tsx` / `.ts`) instead of JavaScript
    #[serde(default = "default_typescript")]
    pub typescript: bool,

    /// Prefix prepended to every component name
    #[serde(default = "default_component_prefix")]
    pub component_prefix: String,

    /// Skip the synthesized optimization and use the transform's default
    #[serde(default)]
    pub use_default_optimization: bool,

    /// Explicit optimizer configuration, passed through untouched
    #[serde(default)]
    pub svgo_config: Option<Value>,

    /// Turn file names into PascalCase identifiers (`arrow-up` -> `ArrowUp`)
    #[serde(default)]
    pub sanitize_names: bool,
}

fn default_typescript() -> bool {
    true
}

fn default_component_prefix() -> String {
    "SvgIcon".to_string()
}

impl IconConfig {
    /// Create a configuration with default settings for the given directories
    pub fn new(icons_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons_path: icons_path.into(),
            output_dir: output_dir.into(),
            jsx_runtime: JsxRuntime::default(),
            typescript: default_typescript(),
            component_prefix: default_component_prefix(),
            use_default_optimization: false,
            svgo_config: None,
            sanitize_names: false,
        }
    }

    /// Load configuration from a JSON file
    ///
    /// Relative `iconsPath` and `outputDir` values are resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Parse configuration from a JSON string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: IconConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.icons_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("\"iconsPath\" must not be empty".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("\"outputDir\" must not be empty".into()));
        }
        if let Some(svgo) = &self.svgo_config {
            if !svgo.is_object() {
                return Err(ConfigError::Invalid(
                    "\"svgoConfig\" must be an object".into(),
                ));
            }
        }
        Ok(())
    }

    /// Resolve relative directories against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.icons_path.is_relative() {
            self.icons_path = base.join(&self.icons_path);
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        self
    }

    /// Extension of the generated component files
    pub fn component_extension(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    /// Extension of the generated index file
    pub fn index_extension(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }

    /// Set the JSX runtime
    pub fn with_jsx_runtime(mut self, runtime: JsxRuntime) -> Self {
        self.jsx_runtime = runtime;
        self
    }

    /// Set whether TypeScript is emitted
    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    /// Set the component name prefix
    pub fn with_component_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.component_prefix = prefix.into();
        self
    }

    /// Defer optimization to the transform's built-in default
    pub fn with_default_optimization(mut self, enabled: bool) -> Self {
        self.use_default_optimization = enabled;
        self
    }

    /// Set an explicit optimizer configuration
    pub fn with_svgo_config(mut self, svgo_config: Value) -> Self {
        self.svgo_config = Some(svgo_config);
        self
    }

    /// Enable or disable identifier sanitization
    pub fn with_sanitized_names(mut self, sanitize: bool) -> Self {
        self.sanitize_names = sanitize;
        self
    }
}
