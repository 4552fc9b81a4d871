//! Task matrix expansion.
//!
//! Expands the main entry plus every discovered sub-module entry into the
//! full cross-product of formats and minification states: six tasks per
//! entry. Output-path uniqueness across the whole set is a hard invariant;
//! a collision means discovery handed us duplicate logical names and the
//! run must abort before any file is written.

use path_clean::PathClean;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::global::derive_global_name;
use crate::name::format_artifact;
use crate::profile::BuildProfile;
use crate::task::{BuildTask, ModuleFormat};
use crate::{Error, Result};

/// Expand the full set of build tasks for one run.
///
/// The main entry's IIFE global is the display name itself; sub-module
/// globals are derived from display name, group path and logical name.
pub fn expand(
    profile: &BuildProfile,
    main_entry: &Entry,
    sub_entries: &[Entry],
) -> Result<Vec<BuildTask>> {
    let mut tasks = Vec::with_capacity((1 + sub_entries.len()) * ModuleFormat::ALL.len() * 2);
    let mut seen: FxHashSet<PathBuf> = FxHashSet::default();

    push_entry_tasks(
        profile,
        main_entry,
        profile.display_name.clone(),
        &mut tasks,
        &mut seen,
    )?;
    for sub in sub_entries {
        let global = derive_global_name(&profile.display_name, &sub.group_path, &sub.logical_name);
        push_entry_tasks(profile, sub, global, &mut tasks, &mut seen)?;
    }

    tracing::debug!(tasks = tasks.len(), "expanded build matrix");
    Ok(tasks)
}

fn push_entry_tasks(
    profile: &BuildProfile,
    entry: &Entry,
    global_name: String,
    tasks: &mut Vec<BuildTask>,
    seen: &mut FxHashSet<PathBuf>,
) -> Result<()> {
    let out_dir = if entry.group_path.is_empty() {
        profile.out_dir.clone()
    } else {
        profile.out_dir.join(Path::new(&entry.group_path))
    };
    let target = (!profile.target.is_empty()).then(|| profile.target.clone());

    for format in ModuleFormat::ALL {
        for minify in [false, true] {
            let file_name = format_artifact(
                &entry.logical_name,
                format.suffix(),
                minify,
                format.extension(),
            );
            let output_path = out_dir.join(file_name).clean();
            if !seen.insert(output_path.clone()) {
                return Err(Error::DuplicateOutput { path: output_path });
            }
            tasks.push(BuildTask {
                source_path: entry.absolute_path.clone(),
                output_path,
                format,
                minify,
                target: target.clone(),
                global_name: (format == ModuleFormat::Iife).then(|| global_name.clone()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BuildProfile {
        BuildProfile {
            display_name: "Foobar".to_string(),
            out_dir: PathBuf::from("dist"),
            ..BuildProfile::default()
        }
    }

    fn main_entry() -> Entry {
        Entry::main(PathBuf::from("/proj/src/index.ts"))
    }

    fn sub(group: &str, name: &str) -> Entry {
        Entry {
            absolute_path: PathBuf::from(format!("/proj/src/{}/{}.ts", group, name)),
            logical_name: name.to_string(),
            group_path: group.to_string(),
        }
    }

    #[test]
    fn main_entry_expands_to_six_tasks() {
        let tasks = expand(&profile(), &main_entry(), &[]).expect("expand");
        assert_eq!(tasks.len(), 6);

        let outputs: Vec<_> = tasks
            .iter()
            .map(|t| t.output_path.to_string_lossy().into_owned())
            .collect();
        for expected in [
            "dist/index.js",
            "dist/index.min.js",
            "dist/index.mjs",
            "dist/index.min.mjs",
            "dist/index.iife.js",
            "dist/index.iife.min.js",
        ] {
            assert!(outputs.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn every_entry_contributes_exactly_six_tasks() {
        let subs = vec![sub("modules", "widget"), sub("modules", "toggle")];
        let tasks = expand(&profile(), &main_entry(), &subs).expect("expand");
        assert_eq!(tasks.len(), 18);
    }

    #[test]
    fn output_paths_are_unique() {
        let subs = vec![sub("modules", "widget"), sub("util", "widget")];
        let tasks = expand(&profile(), &main_entry(), &subs).expect("expand");
        let unique: FxHashSet<_> = tasks.iter().map(|t| t.output_path.clone()).collect();
        assert_eq!(unique.len(), tasks.len());
    }

    #[test]
    fn sub_entries_land_under_their_group() {
        let tasks = expand(&profile(), &main_entry(), &[sub("modules", "widget")]).expect("expand");
        assert!(
            tasks
                .iter()
                .any(|t| t.output_path == PathBuf::from("dist/modules/widget.min.mjs"))
        );
    }

    #[test]
    fn iife_tasks_carry_globals_and_others_do_not() {
        let tasks = expand(&profile(), &main_entry(), &[sub("modules", "widget")]).expect("expand");
        for task in &tasks {
            match task.format {
                ModuleFormat::Iife => assert!(task.global_name.is_some()),
                _ => assert!(task.global_name.is_none()),
            }
        }
        let main_iife = tasks
            .iter()
            .find(|t| t.output_path == PathBuf::from("dist/index.iife.js"))
            .expect("main iife task");
        assert_eq!(main_iife.global_name.as_deref(), Some("Foobar"));

        let widget_iife = tasks
            .iter()
            .find(|t| t.output_path == PathBuf::from("dist/modules/widget.iife.js"))
            .expect("widget iife task");
        assert_eq!(
            widget_iife.global_name.as_deref(),
            Some("FoobarModulesWidget")
        );
    }

    #[test]
    fn duplicate_logical_names_in_one_group_are_rejected() {
        // Two discovery hits collapsing onto the same output file, as would
        // happen if include patterns matched both foo.ts and foo.tsx.
        let a = Entry {
            absolute_path: PathBuf::from("/proj/src/modules/widget.ts"),
            logical_name: "widget".to_string(),
            group_path: "modules".to_string(),
        };
        let b = Entry {
            absolute_path: PathBuf::from("/proj/src/modules/widget.tsx"),
            logical_name: "widget".to_string(),
            group_path: "modules".to_string(),
        };
        let err = expand(&profile(), &main_entry(), &[a, b]).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { .. }));
    }

    #[test]
    fn tasks_carry_the_profile_target() {
        let tasks = expand(&profile(), &main_entry(), &[]).expect("expand");
        assert!(tasks.iter().all(|t| t.target.as_deref() == Some("es2018")));

        let no_target = BuildProfile {
            target: String::new(),
            ..profile()
        };
        let tasks = expand(&no_target, &main_entry(), &[]).expect("expand");
        assert!(tasks.iter().all(|t| t.target.is_none()));
    }
}
