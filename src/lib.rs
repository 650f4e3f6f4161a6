//! SVG Icon Components - generate React components from a folder of SVG icons
//!
//! The library reads an [`IconConfig`], optimizes each SVG in the icons
//! folder, converts it to a JSX/TSX component and writes an index module
//! re-exporting every component.
//!
//! # Example
//!
//! ```rust,no_run
//! use svg_icon_components::{generate, IconConfig};
//!
//! let config = IconConfig::new("assets/icons", "src/icons");
//! let output = generate(&config).unwrap();
//! println!("{} components", output.export_count());
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod naming;
pub mod optimization;
pub mod pipeline;
pub mod svg;
pub mod template;
pub mod transform;

pub use config::{ConfigError, IconConfig, JsxRuntime, CONFIG_FILE};
pub use error::SvgError;
pub use pipeline::{IconError, IconPipeline, StagedOutput};
pub use transform::{GenerateOptions, NativeTransform, Transform, TransformError};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating components
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configured icons folder is missing
    #[error("Icons folder \"{}\" does not exist.", .0.display())]
    MissingIconsDir(PathBuf),

    /// Reading the icons folder or writing output failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// One or more icons could not be converted
    #[error("{} icon(s) failed: {}", .0.len(), format_icon_errors(.0))]
    Icons(Vec<IconError>),
}

fn format_icon_errors(errors: &[IconError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Generate components with the built-in transform
pub fn generate(config: &IconConfig) -> Result<StagedOutput, GenerateError> {
    generate_with(config, NativeTransform)
}

/// Generate components with a custom transform
pub fn generate_with<T: Transform>(
    config: &IconConfig,
    transform: T,
) -> Result<StagedOutput, GenerateError> {
    IconPipeline::new(config, transform).run()
}
