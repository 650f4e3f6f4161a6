//! Icon pipeline: discover SVG files, transform them, write components
//!
//! A run is staged. Every icon is read and transformed in memory first and
//! all per-file failures are collected. Files are only written once every
//! icon succeeded. Committing writes every file to a temporary file in the
//! output directory first, then renames them into place, with the index
//! renamed last.
//!
//! Each rename is atomic but the commit as a whole is not: if a rename fails
//! part way, components renamed before it are already replaced while the
//! index still holds its previous contents. Temporary files that were not
//! renamed are removed.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::IconConfig;
use crate::error::SvgError;
use crate::naming::{component_name, is_valid_identifier};
use crate::optimization::resolve_optimization;
use crate::transform::{
    GenerateOptions, Transform, TransformError, TransformPlugin, TransformRequest, TransformState,
};
use crate::GenerateError;

/// Plugins requested for every icon
const PLUGINS: &[TransformPlugin] = &[TransformPlugin::Svgo, TransformPlugin::Jsx];

/// An SVG file found in the icons directory
#[derive(Debug, Clone, PartialEq)]
pub struct IconSource {
    pub file_name: String,
    pub path: PathBuf,
    /// File name without the `.svg` suffix
    pub base_name: String,
}

/// Why a single icon failed
#[derive(Error, Debug)]
pub enum IconErrorKind {
    #[error("failed to read file: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A failure tied to one source file
#[derive(Error, Debug)]
#[error("{path}: {kind}", path = .file.display())]
pub struct IconError {
    pub file: PathBuf,
    #[source]
    pub kind: IconErrorKind,
    /// SVG text, kept for source-annotated reports
    source_text: Option<String>,
}

impl IconError {
    fn read(file: PathBuf, err: io::Error) -> Self {
        Self {
            file,
            kind: IconErrorKind::Read(err),
            source_text: None,
        }
    }

    fn transform(file: PathBuf, err: TransformError, source_text: String) -> Self {
        Self {
            file,
            kind: IconErrorKind::Transform(err),
            source_text: Some(source_text),
        }
    }

    /// The underlying SVG error, if the file failed to parse
    pub fn svg_error(&self) -> Option<&SvgError> {
        match &self.kind {
            IconErrorKind::Transform(TransformError::Svg(err)) => Some(err),
            _ => None,
        }
    }

    /// Human readable report, annotated with the SVG source when available
    pub fn report(&self) -> String {
        match (self.svg_error(), &self.source_text) {
            (Some(err), Some(source)) => err.format(source, &self.file.display().to_string()),
            _ => self.to_string(),
        }
    }
}

/// A file waiting to be written
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// The complete output of a run, held in memory until committed
#[derive(Debug, Clone, PartialEq)]
pub struct StagedOutput {
    pub output_dir: PathBuf,
    /// Component modules in processing order
    pub components: Vec<StagedFile>,
    pub index: StagedFile,
}

impl StagedOutput {
    /// Number of export lines in the index
    pub fn export_count(&self) -> usize {
        self.components.len()
    }

    /// Write every staged file, components first and the index last
    ///
    /// All temporary files are written before the first rename, so write
    /// failures (full disk, permissions) leave existing output untouched.
    pub fn commit(&self) -> Result<(), GenerateError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| GenerateError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let files: Vec<&StagedFile> = self
            .components
            .iter()
            .chain(std::iter::once(&self.index))
            .collect();

        let mut prepared = Vec::with_capacity(files.len());
        for file in files {
            prepared.push((prepare_temp(&self.output_dir, file)?, file));
        }

        for (tmp, file) in prepared {
            tmp.persist(&file.path).map_err(|e| GenerateError::Io {
                path: file.path.clone(),
                source: e.error,
            })?;
            debug!(path = %file.path.display(), "written");
        }
        Ok(())
    }
}

/// Write a file's contents to a temporary file next to its target
fn prepare_temp(dir: &Path, file: &StagedFile) -> Result<NamedTempFile, GenerateError> {
    let io_err = |source: io::Error| GenerateError::Io {
        path: file.path.clone(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(file.contents.as_bytes()).map_err(io_err)?;
    #[cfg(unix)]
    {
        tmp.as_file()
            .set_permissions(output_permissions(&file.path))
            .map_err(io_err)?;
    }
    Ok(tmp)
}

/// Mode for a generated file: the existing target's, or 0644 for new files
///
/// Temporary files are created 0600, which would otherwise carry over.
#[cfg(unix)]
fn output_permissions(target: &Path) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        Err(_) => fs::Permissions::from_mode(0o644),
    }
}

/// List `*.svg` regular files directly inside `dir`, sorted by file name
pub fn discover_icons(dir: &Path) -> Result<Vec<IconSource>, GenerateError> {
    let io_err = |source: io::Error| GenerateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut icons = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(file = ?raw, "skipping file with a non UTF-8 name");
                continue;
            }
        };
        if let Some(base_name) = file_name.strip_suffix(".svg") {
            icons.push(IconSource {
                base_name: base_name.to_string(),
                file_name: file_name.clone(),
                path,
            });
        }
    }

    icons.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(icons)
}

/// Index line re-exporting a component's default export
pub fn export_statement(name: &str) -> String {
    format!("export {{ default as {} }} from \"./{}\";", name, name)
}

/// Runs a [`Transform`] over every icon of a configuration
pub struct IconPipeline<'a, T: Transform> {
    config: &'a IconConfig,
    transform: T,
}

impl<'a, T: Transform> IconPipeline<'a, T> {
    pub fn new(config: &'a IconConfig, transform: T) -> Self {
        Self { config, transform }
    }

    /// Transform every icon in memory without touching the output directory
    pub fn stage(&self) -> Result<StagedOutput, GenerateError> {
        let config = self.config;
        if !config.icons_path.is_dir() {
            return Err(GenerateError::MissingIconsDir(config.icons_path.clone()));
        }

        let icons = discover_icons(&config.icons_path)?;
        info!(
            count = icons.len(),
            dir = %config.icons_path.display(),
            "found icons"
        );

        let options = GenerateOptions::from_config(config);
        let mut components = Vec::with_capacity(icons.len());
        let mut exports = Vec::with_capacity(icons.len());
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for icon in &icons {
            let name = component_name(
                &config.component_prefix,
                &icon.base_name,
                config.sanitize_names,
            );
            if !is_valid_identifier(&name) {
                warn!(
                    component = %name,
                    file = %icon.file_name,
                    "component name is not a valid identifier"
                );
            }
            if !seen.insert(name.clone()) {
                warn!(
                    component = %name,
                    file = %icon.file_name,
                    "component name collides with an earlier icon: the earlier component is overwritten and the index will contain a duplicate export, which is invalid JavaScript"
                );
            }

            match self.stage_icon(icon, &name, &options) {
                Ok(contents) => {
                    info!(component = %name, file = %icon.file_name, "generated component");
                    components.push(StagedFile {
                        path: config
                            .output_dir
                            .join(format!("{}.{}", name, config.component_extension())),
                        contents,
                    });
                    exports.push(export_statement(&name));
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(GenerateError::Icons(errors));
        }

        Ok(StagedOutput {
            output_dir: config.output_dir.clone(),
            components,
            index: StagedFile {
                path: config
                    .output_dir
                    .join(format!("index.{}", config.index_extension())),
                contents: exports.join("\n"),
            },
        })
    }

    fn stage_icon(
        &self,
        icon: &IconSource,
        name: &str,
        options: &GenerateOptions,
    ) -> Result<String, IconError> {
        let source =
            fs::read_to_string(&icon.path).map_err(|e| IconError::read(icon.path.clone(), e))?;

        let optimization = resolve_optimization(self.config, &source);
        debug!(
            component = %name,
            source = ?optimization.source,
            "resolved optimization"
        );

        let request = TransformRequest {
            source: &source,
            plugins: PLUGINS,
            svgo_config: optimization.config.as_ref(),
            options,
            state: TransformState {
                component_name: name.to_string(),
            },
        };

        match self.transform.transform(&request) {
            Ok(code) => {
                debug!(component = %name, "{}", code);
                Ok(code)
            }
            Err(err) => Err(IconError::transform(icon.path.clone(), err, source)),
        }
    }

    /// Stage every icon, then write the result
    pub fn run(&self) -> Result<StagedOutput, GenerateError> {
        let staged = self.stage()?;
        staged.commit()?;
        Ok(staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::NativeTransform;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DOT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8"><circle cx="4" cy="4" r="4"/></svg>"#;

    fn icons_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_export_statement() {
        assert_eq!(
            export_statement("SvgIconHome"),
            r#"export { default as SvgIconHome } from "./SvgIconHome";"#
        );
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = icons_dir(&[
            ("b.svg", DOT),
            ("a.svg", DOT),
            ("notes.txt", "x"),
            ("upper.SVG", DOT),
        ]);
        fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let icons = discover_icons(dir.path()).unwrap();
        let names: Vec<_> = icons.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.svg", "b.svg"]);
        assert_eq!(icons[0].base_name, "a");
        assert_eq!(icons[0].path, dir.path().join("a.svg"));
    }

    #[test]
    fn test_missing_icons_dir() {
        let out = TempDir::new().unwrap();
        let config = IconConfig::new(out.path().join("nope"), out.path().join("gen"));
        let err = IconPipeline::new(&config, NativeTransform)
            .stage()
            .unwrap_err();
        assert!(matches!(err, GenerateError::MissingIconsDir(_)));
    }

    #[test]
    fn test_stage_writes_nothing() {
        let icons = icons_dir(&[("dot.svg", DOT)]);
        let out = TempDir::new().unwrap();
        let config = IconConfig::new(icons.path(), out.path().join("gen"));

        let staged = IconPipeline::new(&config, NativeTransform).stage().unwrap();
        assert_eq!(staged.export_count(), 1);
        assert_eq!(
            staged.components[0].path,
            out.path().join("gen").join("SvgIconDot.tsx")
        );
        assert_eq!(staged.index.path, out.path().join("gen").join("index.ts"));
        assert!(!out.path().join("gen").exists());
    }

    #[test]
    fn test_commit_replaces_existing_files() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("index.js");
        fs::write(&target, "old").unwrap();

        let staged = StagedOutput {
            output_dir: out.path().to_path_buf(),
            components: vec![],
            index: StagedFile {
                path: target.clone(),
                contents: "new".to_string(),
            },
        };
        staged.commit().unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_file_modes() {
        use std::os::unix::fs::PermissionsExt;

        let out = TempDir::new().unwrap();
        let index = out.path().join("index.ts");
        fs::write(&index, "old").unwrap();
        fs::set_permissions(&index, fs::Permissions::from_mode(0o640)).unwrap();

        let staged = StagedOutput {
            output_dir: out.path().to_path_buf(),
            components: vec![StagedFile {
                path: out.path().join("SvgIconDot.tsx"),
                contents: "dot".to_string(),
            }],
            index: StagedFile {
                path: index.clone(),
                contents: "new".to_string(),
            },
        };
        staged.commit().unwrap();

        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&out.path().join("SvgIconDot.tsx")), 0o644);
        assert_eq!(mode(&index), 0o640);
    }

    #[test]
    fn test_failed_rename_keeps_old_index() {
        let out = TempDir::new().unwrap();
        let index = out.path().join("index.ts");
        fs::create_dir(&index).unwrap();
        fs::write(index.join("keep"), "").unwrap();

        let staged = StagedOutput {
            output_dir: out.path().to_path_buf(),
            components: vec![StagedFile {
                path: out.path().join("SvgIconDot.tsx"),
                contents: "dot".to_string(),
            }],
            index: StagedFile {
                path: index.clone(),
                contents: "export".to_string(),
            },
        };

        match staged.commit().unwrap_err() {
            GenerateError::Io { path, .. } => assert_eq!(path, index),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            fs::read_to_string(out.path().join("SvgIconDot.tsx")).unwrap(),
            "dot"
        );
        assert!(index.is_dir());
        // no temporary files left behind
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_name_collision_overwrites_and_duplicates_export() {
        let icons = icons_dir(&[
            ("arrow-up.svg", DOT),
            (
                "arrow_up.svg",
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8"><rect width="8" height="8"/></svg>"#,
            ),
        ]);
        let out = TempDir::new().unwrap();
        let config = IconConfig::new(icons.path(), out.path()).with_sanitized_names(true);

        let staged = IconPipeline::new(&config, NativeTransform).run().unwrap();
        assert_eq!(staged.export_count(), 2);

        let component = fs::read_to_string(out.path().join("SvgIconArrowUp.tsx")).unwrap();
        assert!(component.contains("<rect"));
        assert!(!component.contains("<circle"));

        let index = fs::read_to_string(out.path().join("index.ts")).unwrap();
        let line = export_statement("SvgIconArrowUp");
        assert_eq!(index, format!("{}\n{}", line, line));
    }

    #[test]
    fn test_failures_are_collected() {
        let icons = icons_dir(&[
            ("a.svg", "<svg><g></svg>"),
            ("b.svg", DOT),
            ("c.svg", "not xml"),
        ]);
        let out = TempDir::new().unwrap();
        let config = IconConfig::new(icons.path(), out.path());

        let err = IconPipeline::new(&config, NativeTransform).run().unwrap_err();
        match err {
            GenerateError::Icons(errors) => {
                let files: Vec<_> = errors
                    .iter()
                    .map(|e| e.file.file_name().unwrap().to_string_lossy().into_owned())
                    .collect();
                assert_eq!(files, vec!["a.svg", "c.svg"]);
                assert!(errors[0].svg_error().is_some());
                assert!(errors[0].report().contains("a.svg"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
