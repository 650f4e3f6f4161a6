//! Selection of the optimizer configuration handed to the transform
//!
//! Precedence: an explicit `svgoConfig` wins, then `useDefaultOptimization`
//! (no configuration at all), and otherwise a configuration is synthesized
//! per file from the color heuristic.

use serde_json::{json, Value};

use crate::color::{classify, ColorClass};
use crate::config::IconConfig;

/// Where a resolved optimizer configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationSource {
    /// Taken verbatim from the configuration file
    Explicit,
    /// None passed, the transform applies its own default
    TransformDefault,
    /// Built from the cleanup baseline and the color heuristic
    Synthesized(ColorClass),
}

/// Optimizer configuration chosen for one file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptimization {
    pub config: Option<Value>,
    pub source: OptimizationSource,
}

/// Resolve the optimizer configuration for one SVG document
pub fn resolve_optimization(config: &IconConfig, svg: &str) -> ResolvedOptimization {
    if let Some(explicit) = &config.svgo_config {
        return ResolvedOptimization {
            config: Some(explicit.clone()),
            source: OptimizationSource::Explicit,
        };
    }

    if config.use_default_optimization {
        return ResolvedOptimization {
            config: None,
            source: OptimizationSource::TransformDefault,
        };
    }

    let class = classify(svg);
    ResolvedOptimization {
        config: Some(synthesize_svgo_config(class)),
        source: OptimizationSource::Synthesized(class),
    }
}

/// Cleanup baseline, plus `currentColor` rewriting for single-color icons
pub fn synthesize_svgo_config(class: ColorClass) -> Value {
    let mut plugins = vec![
        json!({
            "name": "preset-default",
            "params": {
                "overrides": {
                    "removeViewBox": false
                }
            }
        }),
        json!("removeDimensions"),
        json!("convertStyleToAttrs"),
        json!("cleanupAttrs"),
        json!("removeEmptyContainers"),
        json!("removeHiddenElems"),
        json!("removeMetadata"),
        json!("collapseGroups"),
        json!({ "name": "cleanupIds", "remove": true }),
    ];

    if !class.is_multi_color() {
        plugins.push(json!({
            "name": "convertColors",
            "params": { "currentColor": true }
        }));
    }

    json!({ "plugins": plugins })
}
