//! End-to-end tests for component generation

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use svg_icon_components::transform::{TransformPlugin, TransformRequest};
use svg_icon_components::{
    generate, generate_with, GenerateError, IconConfig, JsxRuntime, Transform, TransformError,
};

const ARROW_UP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none"><path stroke="#333333" stroke-width="2" stroke-linecap="round" d="M12 19V5m-7 7 7-7 7 7"/></svg>"##;

const FLAG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 3 2"><rect width="3" height="1" fill="#000"/><rect y="1" width="3" height="1" fill="#ffce00"/></svg>"##;

const BADGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><circle cx="5" cy="5" r="5" fill="rgb(255, 0, 0)"/><path d="M3 5h4" stroke="#fff"/></svg>"##;

/// Records every request and returns a marker instead of real output
#[derive(Default)]
struct RecordingTransform {
    calls: RefCell<Vec<Recorded>>,
}

#[derive(Debug, Clone)]
struct Recorded {
    component: String,
    plugins: Vec<TransformPlugin>,
    svgo_config: Option<Value>,
}

impl Transform for RecordingTransform {
    fn transform(&self, request: &TransformRequest<'_>) -> Result<String, TransformError> {
        self.calls.borrow_mut().push(Recorded {
            component: request.state.component_name.clone(),
            plugins: request.plugins.to_vec(),
            svgo_config: request.svgo_config.cloned(),
        });
        Ok(format!("// {}\n", request.state.component_name))
    }
}

fn setup(files: &[(&str, &str)]) -> (TempDir, IconConfig) {
    let dir = TempDir::new().unwrap();
    let icons = dir.path().join("icons");
    fs::create_dir(&icons).unwrap();
    for (name, contents) in files {
        fs::write(icons.join(name), contents).unwrap();
    }
    let config = IconConfig::new(icons, dir.path().join("generated"));
    (dir, config)
}

fn plugin_names(config: &Value) -> Vec<String> {
    config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| match p {
            Value::String(name) => name.clone(),
            other => other["name"].as_str().unwrap().to_string(),
        })
        .collect()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join("generated").join(name)).unwrap()
}

#[test]
fn test_arrow_up_component() {
    let (dir, config) = setup(&[("arrow-up.svg", ARROW_UP)]);
    generate(&config).unwrap();

    insta::assert_snapshot!(read(dir.path(), "SvgIconArrow-up.tsx"), @r###"
    import * as React from "react";
    import type { SVGProps } from "react";
    const SvgIconArrow-up = (props: SVGProps<SVGSVGElement>) => (
      <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" {...props}>
        <path stroke="currentColor" strokeWidth="2" strokeLinecap="round" d="M12 19V5m-7 7 7-7 7 7" />
      </svg>
    );
    export default SvgIconArrow-up;
    "###);

    let index = read(dir.path(), "index.ts");
    assert_eq!(
        index,
        r#"export { default as SvgIconArrow-up } from "./SvgIconArrow-up";"#
    );
    assert_eq!(index.lines().count(), 1);
}

#[test]
fn test_multi_color_icons_keep_colors() {
    let (dir, config) = setup(&[("flag.svg", FLAG), ("badge.svg", BADGE)]);
    let recorder = RecordingTransform::default();
    let output = generate_with(&config, &recorder).unwrap();
    assert_eq!(output.export_count(), 2);

    let calls = recorder.calls.borrow();
    let components: Vec<_> = calls.iter().map(|c| c.component.as_str()).collect();
    assert_eq!(components, vec!["SvgIconBadge", "SvgIconFlag"]);

    for call in calls.iter() {
        assert_eq!(call.plugins, vec![TransformPlugin::Svgo, TransformPlugin::Jsx]);
        let names = plugin_names(call.svgo_config.as_ref().unwrap());
        assert_eq!(names.first().map(String::as_str), Some("preset-default"));
        assert!(!names.iter().any(|n| n == "convertColors"));
    }

    assert_eq!(
        read(dir.path(), "index.ts"),
        "export { default as SvgIconBadge } from \"./SvgIconBadge\";\n\
         export { default as SvgIconFlag } from \"./SvgIconFlag\";"
    );
    assert_eq!(read(dir.path(), "SvgIconFlag.tsx"), "// SvgIconFlag\n");
}

#[test]
fn test_single_color_gets_current_color() {
    let (_dir, config) = setup(&[("arrow-up.svg", ARROW_UP)]);
    let recorder = RecordingTransform::default();
    generate_with(&config, &recorder).unwrap();

    let calls = recorder.calls.borrow();
    let svgo = calls[0].svgo_config.as_ref().unwrap();
    let names = plugin_names(svgo);
    assert_eq!(names.last().map(String::as_str), Some("convertColors"));
    assert_eq!(
        svgo["plugins"][0]["params"]["overrides"]["removeViewBox"],
        json!(false)
    );
}

#[test]
fn test_explicit_config_is_passed_through() {
    let explicit = json!({ "plugins": ["removeTitle"], "multipass": true });
    let (_dir, config) = setup(&[("flag.svg", FLAG), ("arrow-up.svg", ARROW_UP)]);
    let config = config.with_svgo_config(explicit.clone());

    let recorder = RecordingTransform::default();
    generate_with(&config, &recorder).unwrap();

    for call in recorder.calls.borrow().iter() {
        assert_eq!(call.svgo_config.as_ref(), Some(&explicit));
    }
}

#[test]
fn test_default_optimization_passes_no_config() {
    let (_dir, config) = setup(&[("arrow-up.svg", ARROW_UP)]);
    let config = config.with_default_optimization(true);

    let recorder = RecordingTransform::default();
    generate_with(&config, &recorder).unwrap();
    assert_eq!(recorder.calls.borrow()[0].svgo_config, None);
}

#[test]
fn test_javascript_automatic_output() {
    let (dir, config) = setup(&[("arrow-up.svg", ARROW_UP)]);
    let config = config
        .with_typescript(false)
        .with_jsx_runtime(JsxRuntime::Automatic)
        .with_sanitized_names(true);
    generate(&config).unwrap();

    let component = read(dir.path(), "SvgIconArrowUp.jsx");
    assert!(component.starts_with("const SvgIconArrowUp = (props) => (\n"));
    assert!(component.ends_with("export default SvgIconArrowUp;\n"));
    assert_eq!(
        read(dir.path(), "index.js"),
        r#"export { default as SvgIconArrowUp } from "./SvgIconArrowUp";"#
    );
}

#[test]
fn test_regeneration_is_idempotent() {
    let (dir, config) = setup(&[("arrow-up.svg", ARROW_UP), ("flag.svg", FLAG)]);
    generate(&config).unwrap();
    let first: Vec<String> = ["SvgIconArrow-up.tsx", "SvgIconFlag.tsx", "index.ts"]
        .iter()
        .map(|name| read(dir.path(), name))
        .collect();

    generate(&config).unwrap();
    let second: Vec<String> = ["SvgIconArrow-up.tsx", "SvgIconFlag.tsx", "index.ts"]
        .iter()
        .map(|name| read(dir.path(), name))
        .collect();

    assert_eq!(first, second);
    assert_eq!(
        fs::read_dir(dir.path().join("generated")).unwrap().count(),
        3
    );
}

#[test]
fn test_failure_writes_nothing() {
    let (dir, config) = setup(&[("arrow-up.svg", ARROW_UP), ("broken.svg", "<svg><path></svg>")]);
    let err = generate(&config).unwrap_err();

    match &err {
        GenerateError::Icons(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].file.ends_with("broken.svg"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().starts_with("1 icon(s) failed: "));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_missing_icons_dir() {
    let dir = TempDir::new().unwrap();
    let config = IconConfig::new(dir.path().join("missing"), dir.path().join("generated"));
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, GenerateError::MissingIconsDir(_)));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_config_file_resolves_relative_paths() {
    let (dir, _) = setup(&[("arrow-up.svg", ARROW_UP)]);
    let config_path = dir.path().join("react-svg-icon-components.json");
    fs::write(
        &config_path,
        r#"{ "iconsPath": "icons", "outputDir": "generated", "componentPrefix": "Icon" }"#,
    )
    .unwrap();

    let config = IconConfig::load(&config_path).unwrap();
    generate(&config).unwrap();
    assert!(dir.path().join("generated/IconArrow-up.tsx").is_file());
}
