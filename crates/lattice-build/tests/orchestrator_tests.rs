//! End-to-end orchestrator scenarios against a synthetic source tree.
//!
//! The bundler and minifier are in-process fakes: the bundler writes
//! plausible artifacts for each format (including the IIFE global symbol)
//! and the minifier collapses whitespace, which is idempotent like a real
//! one. What is under test is the orchestration itself: discovery, matrix
//! shape, output layout, the post pass and failure aggregation.

use async_trait::async_trait;
use lattice_build::{
    BuildProfile, BuildTask, Bundler, Error, Minifier, ModuleFormat, Orchestrator,
    bundler::BundleError, minifier::MinifyError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Writes format-appropriate artifact text instead of invoking esbuild.
struct FakeBundler;

fn fake_artifact(task: &BuildTask) -> String {
    let body = match task.format {
        ModuleFormat::Cjs => "\"use strict\";\nmodule.exports  =  {};".to_string(),
        ModuleFormat::Esm => "export  default  {};".to_string(),
        ModuleFormat::Iife => format!(
            "var  {}  =  (function () {{ return {{}}; }})();",
            task.global_name.as_deref().unwrap_or("unnamed")
        ),
    };
    format!("{body}\n")
}

#[async_trait]
impl Bundler for FakeBundler {
    async fn bundle(&self, task: &BuildTask) -> Result<(), BundleError> {
        tokio::fs::write(&task.output_path, fake_artifact(task))
            .await
            .map_err(|e| BundleError::Failed {
                status: "io".to_string(),
                stderr: e.to_string(),
            })
    }
}

/// Fails exactly the task whose output file name matches, succeeds otherwise.
struct FailOneBundler {
    fail_file: &'static str,
}

#[async_trait]
impl Bundler for FailOneBundler {
    async fn bundle(&self, task: &BuildTask) -> Result<(), BundleError> {
        let name = task
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name == self.fail_file {
            return Err(BundleError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "transform error".to_string(),
            });
        }
        FakeBundler.bundle(task).await
    }
}

/// Whitespace-collapsing minifier; applying it twice changes nothing.
struct SquashMinifier;

#[async_trait]
impl Minifier for SquashMinifier {
    async fn minify(&self, source: &str) -> Result<String, MinifyError> {
        Ok(source.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

fn scaffold(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, "export const x = 1;\n").expect("write source");
    }
    dir
}

fn profile_for(project: &TempDir) -> BuildProfile {
    BuildProfile {
        display_name: "Foobar".to_string(),
        source_root: project.path().join("src"),
        out_dir: project.path().join("dist"),
        ..BuildProfile::default()
    }
}

fn orchestrator(project: &TempDir) -> Orchestrator {
    Orchestrator::new(
        profile_for(project),
        Arc::new(FakeBundler),
        Arc::new(SquashMinifier),
    )
}

fn emitted_files(dist: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dist)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(dist)
                .ok()
                .map(|p| p.to_string_lossy().into_owned())
        })
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn main_entry_only_emits_the_six_artifact_matrix() {
    let project = scaffold(&["src/index.ts"]);

    let report = orchestrator(&project).run().await.expect("run");
    assert!(report.is_success());
    assert_eq!(report.artifact_count(), 6);

    let files = emitted_files(&project.path().join("dist"));
    assert_eq!(
        files,
        vec![
            "index.iife.js",
            "index.iife.min.js",
            "index.js",
            "index.min.js",
            "index.min.mjs",
            "index.mjs",
        ]
    );

    for file in &files {
        let contents = fs::read(project.path().join("dist").join(file)).expect("read artifact");
        assert!(!contents.is_empty(), "{file} should be non-empty");
    }

    let iife = fs::read_to_string(project.path().join("dist/index.iife.js")).expect("iife");
    assert!(iife.contains("Foobar"));
}

#[tokio::test]
async fn sub_module_gets_its_own_group_and_global() {
    let project = scaffold(&["src/index.ts", "src/modules/widget.ts"]);

    let report = orchestrator(&project).run().await.expect("run");
    assert!(report.is_success());
    assert_eq!(report.artifact_count(), 12);

    let files = emitted_files(&project.path().join("dist"));
    for expected in [
        "modules/widget.js",
        "modules/widget.min.js",
        "modules/widget.mjs",
        "modules/widget.min.mjs",
        "modules/widget.iife.js",
        "modules/widget.iife.min.js",
    ] {
        assert!(files.contains(&expected.to_string()), "missing {expected}");
    }

    let iife =
        fs::read_to_string(project.path().join("dist/modules/widget.iife.js")).expect("iife");
    assert!(iife.contains("FoobarModulesWidget"));
}

#[tokio::test]
async fn aggregator_index_never_joins_the_sub_module_set() {
    let project = scaffold(&[
        "src/index.ts",
        "src/modules/index.ts",
        "src/modules/widget.ts",
    ]);

    let report = orchestrator(&project).run().await.expect("run");
    assert!(report.is_success());
    // Main entry plus the single widget sub-module.
    assert_eq!(report.artifact_count(), 12);

    let files = emitted_files(&project.path().join("dist"));
    assert!(!files.iter().any(|f| f.starts_with("modules/index.")));
}

#[tokio::test]
async fn post_pass_reminifies_only_declared_minified_artifacts() {
    let project = scaffold(&["src/index.ts"]);

    let report = orchestrator(&project).run().await.expect("run");
    assert!(report.is_success());

    // Declared-minified artifacts went through the squash pass.
    let min = fs::read_to_string(project.path().join("dist/index.iife.min.js")).expect("min");
    assert!(!min.contains("  "));
    assert!(min.contains("Foobar"));

    // Plain artifacts kept the bundler's spacing.
    let plain = fs::read_to_string(project.path().join("dist/index.iife.js")).expect("plain");
    assert!(plain.contains("  "));
}

#[tokio::test]
async fn running_twice_is_idempotent() {
    let project = scaffold(&["src/index.ts", "src/modules/widget.ts"]);

    orchestrator(&project).run().await.expect("first run");
    let dist = project.path().join("dist");
    let first: Vec<(String, Vec<u8>)> = emitted_files(&dist)
        .into_iter()
        .map(|f| {
            let bytes = fs::read(dist.join(&f)).expect("read");
            (f, bytes)
        })
        .collect();

    orchestrator(&project).run().await.expect("second run");
    let second: Vec<(String, Vec<u8>)> = emitted_files(&dist)
        .into_iter()
        .map(|f| {
            let bytes = fs::read(dist.join(&f)).expect("read");
            (f, bytes)
        })
        .collect();

    assert_eq!(first, second);
}

#[tokio::test]
async fn one_failing_task_still_leaves_sibling_artifacts() {
    let project = scaffold(&["src/index.ts"]);

    let orchestrator = Orchestrator::new(
        profile_for(&project),
        Arc::new(FailOneBundler {
            fail_file: "index.iife.min.js",
        }),
        Arc::new(SquashMinifier),
    );
    let report = orchestrator.run().await.expect("run completes");

    assert!(!report.is_success());
    assert_eq!(report.artifact_count(), 5);

    let failures: Vec<(PathBuf, String)> = report
        .failures()
        .map(|(p, r)| (p.to_path_buf(), r.to_string()))
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("index.iife.min.js"));
    assert!(failures[0].1.contains("transform error"));

    // The five siblings all made it to disk.
    let files = emitted_files(&project.path().join("dist"));
    assert_eq!(files.len(), 5);
    assert!(!files.contains(&"index.iife.min.js".to_string()));
}

#[tokio::test]
async fn missing_source_root_fails_fast() {
    let project = TempDir::new().expect("temp dir");

    let err = orchestrator(&project).run().await.unwrap_err();
    assert!(matches!(err, Error::Discovery { .. }));

    // Nothing was written.
    assert!(!project.path().join("dist").exists());
}

#[tokio::test]
async fn globals_are_unique_across_the_whole_matrix() {
    let project = scaffold(&[
        "src/index.ts",
        "src/modules/widget.ts",
        "src/modules/toggle.ts",
        "src/util/widget.ts",
    ]);

    let report = orchestrator(&project).run().await.expect("run");
    assert!(report.is_success());

    let mut globals: Vec<String> = report
        .bundle_results
        .iter()
        .filter_map(|r| r.task.global_name.clone())
        .collect();
    globals.sort();
    globals.dedup();
    // 4 entries, each with one global shared by its two IIFE tasks.
    assert_eq!(globals.len(), 4);
}
