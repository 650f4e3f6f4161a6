//! SVG handling: parsing, optimization and JSX conversion

pub mod ast;
pub mod jsx;
pub mod optimize;
pub mod parse;
pub mod plan;

pub use ast::{Attribute, Document, Element, Node};
pub use jsx::render_markup;
pub use optimize::optimize;
pub use parse::parse_svg;
pub use plan::{Plan, PlanError, Plugin, PluginStep};
