//! Generation options handed to a transform

use crate::config::{IconConfig, JsxRuntime};

/// Where the `{...props}` spread goes on the root element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandProps {
    Start,
    #[default]
    End,
    /// No spread and no `props` parameter
    None,
}

/// Options controlling component generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Replace root width/height with `1em`
    pub icon: bool,
    /// Emit TypeScript (typed props, type imports)
    pub typescript: bool,
    pub jsx_runtime: JsxRuntime,
    /// React Native output (not supported by the native transform)
    pub native: bool,
    pub expand_props: ExpandProps,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            icon: false,
            typescript: true,
            jsx_runtime: JsxRuntime::Classic,
            native: false,
            expand_props: ExpandProps::End,
        }
    }
}

impl GenerateOptions {
    /// Options used by the icon pipeline for a given configuration
    pub fn from_config(config: &IconConfig) -> Self {
        Self::default()
            .with_typescript(config.typescript)
            .with_jsx_runtime(config.jsx_runtime)
    }

    pub fn with_icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_typescript(mut self, typescript: bool) -> Self {
        self.typescript = typescript;
        self
    }

    pub fn with_jsx_runtime(mut self, runtime: JsxRuntime) -> Self {
        self.jsx_runtime = runtime;
        self
    }

    pub fn with_native(mut self, native: bool) -> Self {
        self.native = native;
        self
    }

    pub fn with_expand_props(mut self, expand_props: ExpandProps) -> Self {
        self.expand_props = expand_props;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = IconConfig::new("icons", "out")
            .with_typescript(false)
            .with_jsx_runtime(JsxRuntime::Automatic);
        let options = GenerateOptions::from_config(&config);
        assert!(!options.typescript);
        assert_eq!(options.jsx_runtime, JsxRuntime::Automatic);
        assert!(!options.icon);
        assert!(!options.native);
        assert_eq!(options.expand_props, ExpandProps::End);
    }
}
