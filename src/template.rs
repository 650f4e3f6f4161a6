//! Component module template
//!
//! Wraps rendered JSX markup into a module with runtime imports, an arrow
//! function component and a default export.
//!
//! # Example
//!
//! ```rust
//! use svg_icon_components::template::render_component;
//! use svg_icon_components::transform::GenerateOptions;
//!
//! let markup = vec!["<svg {...props} />".to_string()];
//! let module = render_component("SvgIconDot", &markup, &GenerateOptions::default());
//! assert!(module.starts_with("import * as React from \"react\";"));
//! assert!(module.ends_with("export default SvgIconDot;\n"));
//! ```

use crate::config::JsxRuntime;
use crate::transform::{ExpandProps, GenerateOptions};

/// Render a complete component module
pub fn render_component(name: &str, markup: &[String], options: &GenerateOptions) -> String {
    let mut out = String::new();

    for import in imports(options) {
        out.push_str(import);
        out.push('\n');
    }

    out.push_str(&format!("const {} = {} => (\n", name, parameters(options)));
    for line in markup {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(");\n");
    out.push_str(&format!("export default {};\n", name));

    out
}

fn imports(options: &GenerateOptions) -> Vec<&'static str> {
    let mut imports = Vec::new();
    match options.jsx_runtime {
        JsxRuntime::Classic => imports.push("import * as React from \"react\";"),
        JsxRuntime::ClassicPreact => imports.push("import { h } from \"preact\";"),
        JsxRuntime::Automatic => {}
    }
    if options.typescript && options.expand_props != ExpandProps::None {
        match options.jsx_runtime {
            JsxRuntime::ClassicPreact => imports.push("import type { JSX } from \"preact\";"),
            _ => imports.push("import type { SVGProps } from \"react\";"),
        }
    }
    imports
}

fn parameters(options: &GenerateOptions) -> &'static str {
    if options.expand_props == ExpandProps::None {
        return "()";
    }
    match (options.typescript, options.jsx_runtime) {
        (false, _) => "(props)",
        (true, JsxRuntime::ClassicPreact) => "(props: JSX.SVGAttributes<SVGSVGElement>)",
        (true, _) => "(props: SVGProps<SVGSVGElement>)",
    }
}
