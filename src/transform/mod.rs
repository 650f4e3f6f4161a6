//! SVG-to-component transform
//!
//! The icon pipeline only depends on the [`Transform`] trait, so the
//! conversion can be swapped out (tests inject recording fakes). The crate
//! ships [`NativeTransform`], which parses, optimizes and renders in process.

mod native;
mod options;

pub use native::NativeTransform;
pub use options::{ExpandProps, GenerateOptions};

use serde_json::Value;
use thiserror::Error;

use crate::error::SvgError;
use crate::svg::PlanError;

/// Processing stages requested from a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPlugin {
    /// Optimize the SVG before conversion
    Svgo,
    /// Convert the SVG to JSX
    Jsx,
}

/// Per-call state
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    pub component_name: String,
}

/// Everything a transform receives for one icon
#[derive(Debug, Clone)]
pub struct TransformRequest<'a> {
    pub source: &'a str,
    pub plugins: &'a [TransformPlugin],
    /// Optimization configuration; `None` means the transform's default
    pub svgo_config: Option<&'a Value>,
    pub options: &'a GenerateOptions,
    pub state: TransformState,
}

/// Errors raised while transforming a single SVG
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("{0}")]
    Svg(#[from] SvgError),

    #[error("invalid optimization config: {0}")]
    Plan(#[from] PlanError),

    #[error("unsupported option: {0}")]
    Unsupported(&'static str),

    #[error("the jsx plugin is required to generate a component")]
    MissingJsxPlugin,
}

/// Converts SVG source into component source text
pub trait Transform {
    fn transform(&self, request: &TransformRequest<'_>) -> Result<String, TransformError>;
}

impl<T: Transform + ?Sized> Transform for &T {
    fn transform(&self, request: &TransformRequest<'_>) -> Result<String, TransformError> {
        (**self).transform(request)
    }
}
