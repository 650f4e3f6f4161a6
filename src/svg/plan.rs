//! Interpretation of an svgo-style optimizer configuration
//!
//! The configuration is `{ "plugins": [...] }` where every entry is either a
//! plugin name or an object with `name` and optional `params`. The
//! `preset-default` entry expands to the default preset and accepts
//! `params.overrides` to disable (`false`) or re-parameterise (object) its
//! members. Plugins this optimizer does not implement are skipped.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Errors in the shape of an optimizer configuration
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("optimizer config must be an object")]
    NotAnObject,
    #[error("\"plugins\" must be an array")]
    PluginsNotArray,
    #[error("plugin entry {index} has no name")]
    MissingName { index: usize },
    #[error("params of plugin '{name}' must be an object")]
    InvalidParams { name: String },
}

/// Optimizer plugins this crate implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    RemoveDoctype,
    RemoveXmlProcInst,
    RemoveComments,
    RemoveMetadata,
    RemoveEditorsNsData,
    CleanupAttrs,
    CleanupIds,
    ConvertColors,
    RemoveViewBox,
    RemoveHiddenElems,
    RemoveEmptyText,
    CollapseGroups,
    RemoveEmptyAttrs,
    RemoveEmptyContainers,
    RemoveUnusedNs,
    RemoveTitle,
    RemoveDesc,
    RemoveDimensions,
    ConvertStyleToAttrs,
}

/// Members of `preset-default` that are implemented, in preset order
pub const PRESET_DEFAULT: &[Plugin] = &[
    Plugin::RemoveDoctype,
    Plugin::RemoveXmlProcInst,
    Plugin::RemoveComments,
    Plugin::RemoveMetadata,
    Plugin::RemoveEditorsNsData,
    Plugin::CleanupAttrs,
    Plugin::CleanupIds,
    Plugin::ConvertColors,
    Plugin::RemoveViewBox,
    Plugin::RemoveHiddenElems,
    Plugin::RemoveEmptyText,
    Plugin::CollapseGroups,
    Plugin::RemoveEmptyAttrs,
    Plugin::RemoveEmptyContainers,
    Plugin::RemoveUnusedNs,
    Plugin::RemoveTitle,
    Plugin::RemoveDesc,
];

impl Plugin {
    pub fn from_name(name: &str) -> Option<Self> {
        let plugin = match name {
            "removeDoctype" => Plugin::RemoveDoctype,
            "removeXMLProcInst" => Plugin::RemoveXmlProcInst,
            "removeComments" => Plugin::RemoveComments,
            "removeMetadata" => Plugin::RemoveMetadata,
            "removeEditorsNSData" => Plugin::RemoveEditorsNsData,
            "cleanupAttrs" => Plugin::CleanupAttrs,
            "cleanupIds" | "cleanupIDs" => Plugin::CleanupIds,
            "convertColors" => Plugin::ConvertColors,
            "removeViewBox" => Plugin::RemoveViewBox,
            "removeHiddenElems" => Plugin::RemoveHiddenElems,
            "removeEmptyText" => Plugin::RemoveEmptyText,
            "collapseGroups" => Plugin::CollapseGroups,
            "removeEmptyAttrs" => Plugin::RemoveEmptyAttrs,
            "removeEmptyContainers" => Plugin::RemoveEmptyContainers,
            "removeUnusedNS" => Plugin::RemoveUnusedNs,
            "removeTitle" => Plugin::RemoveTitle,
            "removeDesc" => Plugin::RemoveDesc,
            "removeDimensions" => Plugin::RemoveDimensions,
            "convertStyleToAttrs" => Plugin::ConvertStyleToAttrs,
            _ => return None,
        };
        Some(plugin)
    }

    pub fn name(self) -> &'static str {
        match self {
            Plugin::RemoveDoctype => "removeDoctype",
            Plugin::RemoveXmlProcInst => "removeXMLProcInst",
            Plugin::RemoveComments => "removeComments",
            Plugin::RemoveMetadata => "removeMetadata",
            Plugin::RemoveEditorsNsData => "removeEditorsNSData",
            Plugin::CleanupAttrs => "cleanupAttrs",
            Plugin::CleanupIds => "cleanupIds",
            Plugin::ConvertColors => "convertColors",
            Plugin::RemoveViewBox => "removeViewBox",
            Plugin::RemoveHiddenElems => "removeHiddenElems",
            Plugin::RemoveEmptyText => "removeEmptyText",
            Plugin::CollapseGroups => "collapseGroups",
            Plugin::RemoveEmptyAttrs => "removeEmptyAttrs",
            Plugin::RemoveEmptyContainers => "removeEmptyContainers",
            Plugin::RemoveUnusedNs => "removeUnusedNS",
            Plugin::RemoveTitle => "removeTitle",
            Plugin::RemoveDesc => "removeDesc",
            Plugin::RemoveDimensions => "removeDimensions",
            Plugin::ConvertStyleToAttrs => "convertStyleToAttrs",
        }
    }
}

/// One plugin invocation with its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PluginStep {
    pub plugin: Plugin,
    pub params: Map<String, Value>,
}

impl PluginStep {
    pub fn new(plugin: Plugin) -> Self {
        Self {
            plugin,
            params: Map::new(),
        }
    }

    /// Boolean parameter with a default
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.params.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// List-of-strings parameter; a single string counts as a one-item list
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.params.get(key) {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => vec![],
        }
    }
}

/// Ordered plugin invocations resolved from a configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    steps: Vec<PluginStep>,
}

impl Plan {
    /// Resolve a configuration value into a plan
    pub fn from_config(config: &Value) -> Result<Self, PlanError> {
        let object = config.as_object().ok_or(PlanError::NotAnObject)?;

        let entries = match object.get("plugins") {
            None | Some(Value::Null) => {
                return Ok(Self {
                    steps: preset_default(&Map::new())?,
                })
            }
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(PlanError::PluginsNotArray),
        };

        let mut steps = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            let (name, params) = match entry {
                Value::String(name) => (name.as_str(), Map::new()),
                Value::Object(fields) => {
                    let name = fields
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or(PlanError::MissingName { index })?;
                    let params = match fields.get("params") {
                        None | Some(Value::Null) => Map::new(),
                        Some(Value::Object(params)) => params.clone(),
                        Some(_) => {
                            return Err(PlanError::InvalidParams {
                                name: name.to_string(),
                            })
                        }
                    };
                    (name, params)
                }
                _ => return Err(PlanError::MissingName { index }),
            };

            if name == "preset-default" {
                let overrides = match params.get("overrides") {
                    Some(Value::Object(overrides)) => overrides.clone(),
                    _ => Map::new(),
                };
                steps.extend(preset_default(&overrides)?);
                continue;
            }

            match Plugin::from_name(name) {
                Some(plugin) => steps.push(PluginStep { plugin, params }),
                None => debug!(plugin = name, "skipping unsupported optimizer plugin"),
            }
        }

        Ok(Self { steps })
    }

    /// Default used when no configuration is supplied: the preset with
    /// view-box removal disabled
    pub fn builtin_default() -> Self {
        let steps = PRESET_DEFAULT
            .iter()
            .filter(|plugin| **plugin != Plugin::RemoveViewBox)
            .map(|plugin| PluginStep::new(*plugin))
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[PluginStep] {
        &self.steps
    }

    pub fn contains(&self, plugin: Plugin) -> bool {
        self.steps.iter().any(|step| step.plugin == plugin)
    }
}

fn preset_default(overrides: &Map<String, Value>) -> Result<Vec<PluginStep>, PlanError> {
    let mut steps = Vec::new();
    for plugin in PRESET_DEFAULT {
        match overrides.get(plugin.name()) {
            Some(Value::Bool(false)) => {}
            Some(Value::Object(params)) => steps.push(PluginStep {
                plugin: *plugin,
                params: params.clone(),
            }),
            None | Some(Value::Bool(true)) | Some(Value::Null) => {
                steps.push(PluginStep::new(*plugin))
            }
            Some(_) => {
                return Err(PlanError::InvalidParams {
                    name: plugin.name().to_string(),
                })
            }
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plugins(plan: &Plan) -> Vec<Plugin> {
        plan.steps().iter().map(|s| s.plugin).collect()
    }

    #[test]
    fn test_names_round_trip() {
        for plugin in PRESET_DEFAULT {
            assert_eq!(Plugin::from_name(plugin.name()), Some(*plugin));
        }
        assert_eq!(Plugin::from_name("cleanupIDs"), Some(Plugin::CleanupIds));
        assert_eq!(Plugin::from_name("convertPathData"), None);
    }

    #[test]
    fn test_missing_plugins_means_preset() {
        let plan = Plan::from_config(&json!({})).unwrap();
        assert_eq!(plugins(&plan), PRESET_DEFAULT.to_vec());
    }

    #[test]
    fn test_preset_override_disables_member() {
        let plan = Plan::from_config(&json!({
            "plugins": [{
                "name": "preset-default",
                "params": { "overrides": { "removeViewBox": false } }
            }]
        }))
        .unwrap();
        assert!(!plan.contains(Plugin::RemoveViewBox));
        assert!(plan.contains(Plugin::CollapseGroups));
        assert_eq!(plan.steps().len(), PRESET_DEFAULT.len() - 1);
    }

    #[test]
    fn test_preset_override_params() {
        let plan = Plan::from_config(&json!({
            "plugins": [{
                "name": "preset-default",
                "params": { "overrides": { "cleanupIds": { "minify": false } } }
            }]
        }))
        .unwrap();
        let step = plan
            .steps()
            .iter()
            .find(|s| s.plugin == Plugin::CleanupIds)
            .unwrap();
        assert!(!step.flag("minify", true));
    }

    #[test]
    fn test_string_and_object_entries() {
        let plan = Plan::from_config(&json!({
            "plugins": [
                "removeDimensions",
                { "name": "cleanupIds", "remove": true },
                { "name": "convertColors", "params": { "currentColor": true } }
            ]
        }))
        .unwrap();
        assert_eq!(
            plugins(&plan),
            vec![Plugin::RemoveDimensions, Plugin::CleanupIds, Plugin::ConvertColors]
        );
        assert!(plan.steps()[2].flag("currentColor", false));
    }

    #[test]
    fn test_unknown_plugins_skipped() {
        let plan = Plan::from_config(&json!({
            "plugins": ["convertPathData", "removeTitle", { "name": "prefixIds" }]
        }))
        .unwrap();
        assert_eq!(plugins(&plan), vec![Plugin::RemoveTitle]);
    }

    #[test]
    fn test_malformed_configs() {
        assert_eq!(Plan::from_config(&json!([])), Err(PlanError::NotAnObject));
        assert_eq!(
            Plan::from_config(&json!({ "plugins": "removeTitle" })),
            Err(PlanError::PluginsNotArray)
        );
        assert_eq!(
            Plan::from_config(&json!({ "plugins": [{ "params": {} }] })),
            Err(PlanError::MissingName { index: 0 })
        );
        assert_eq!(
            Plan::from_config(&json!({ "plugins": [{ "name": "removeDesc", "params": 1 }] })),
            Err(PlanError::InvalidParams {
                name: "removeDesc".to_string()
            })
        );
    }

    #[test]
    fn test_builtin_default_keeps_view_box() {
        let plan = Plan::builtin_default();
        assert!(!plan.contains(Plugin::RemoveViewBox));
        assert!(plan.contains(Plugin::RemoveMetadata));
    }

    #[test]
    fn test_strings_param() {
        let step = PluginStep {
            plugin: Plugin::CleanupIds,
            params: json!({ "preserve": ["a", "b"], "preservePrefixes": "icon-" })
                .as_object()
                .cloned()
                .unwrap(),
        };
        assert_eq!(step.strings("preserve"), vec!["a", "b"]);
        assert_eq!(step.strings("preservePrefixes"), vec!["icon-"]);
        assert!(step.strings("missing").is_empty());
    }
}
