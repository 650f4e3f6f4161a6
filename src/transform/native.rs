//! In-process transform: parse, optimize, render JSX, wrap in a template

use tracing::debug;

use crate::svg::{optimize, parse_svg, render_markup, Plan};
use crate::template::render_component;

use super::{Transform, TransformError, TransformPlugin, TransformRequest};

/// The built-in [`Transform`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTransform;

impl NativeTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Transform for NativeTransform {
    fn transform(&self, request: &TransformRequest<'_>) -> Result<String, TransformError> {
        let options = request.options;
        if options.native {
            return Err(TransformError::Unsupported("native output"));
        }
        if !request.plugins.contains(&TransformPlugin::Jsx) {
            return Err(TransformError::MissingJsxPlugin);
        }

        let mut doc = parse_svg(request.source)?;

        if request.plugins.contains(&TransformPlugin::Svgo) {
            let plan = match request.svgo_config {
                Some(config) => Plan::from_config(config)?,
                None => Plan::builtin_default(),
            };
            debug!(
                component = %request.state.component_name,
                steps = plan.steps().len(),
                "optimizing"
            );
            optimize(&mut doc, &plan);
        }

        let markup = render_markup(&doc.root, options.expand_props, options.icon);
        Ok(render_component(
            &request.state.component_name,
            &markup,
            options,
        ))
    }
}
