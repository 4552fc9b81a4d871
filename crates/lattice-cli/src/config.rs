//! Configuration loading.
//!
//! Sources merge in priority order: CLI flags > `LATTICE_*` environment
//! variables > `lattice.toml` > built-in defaults. The result converts into
//! the core [`BuildProfile`] plus the CLI-only knobs (external binaries,
//! clean behavior).

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use lattice_build::BuildProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "lattice.toml";

/// Full CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub display_name: String,
    pub target: String,
    pub source_root: PathBuf,
    pub out_dir: PathBuf,
    pub main_entry: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub max_parallel_builds: Option<usize>,
    /// Bundler binary invoked once per task.
    pub bundler_bin: PathBuf,
    /// Minifier binary the post pass pipes text through.
    pub minifier_bin: PathBuf,
    /// Remove the output directory before building.
    pub clean: bool,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        let profile = BuildProfile::default();
        Self {
            display_name: profile.display_name,
            target: profile.target,
            source_root: profile.source_root,
            out_dir: profile.out_dir,
            main_entry: profile.main_entry,
            include: profile.include,
            exclude: profile.exclude,
            max_parallel_builds: profile.max_parallel_builds,
            bundler_bin: PathBuf::from("esbuild"),
            minifier_bin: PathBuf::from("terser"),
            clean: false,
        }
    }
}

impl LatticeConfig {
    /// Load configuration from defaults, config file and environment.
    ///
    /// An explicitly passed config path must exist; the default
    /// `lattice.toml` is only merged when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => {
                let default_path = Path::new(CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("LATTICE_"));

        figment
            .extract()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Apply CLI flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&mut self, args: &BuildArgs) {
        if let Some(source_root) = &args.source_root {
            self.source_root = source_root.clone();
        }
        if let Some(out_dir) = &args.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(display_name) = &args.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(target) = &args.target {
            self.target = target.clone();
        }
        if let Some(max_parallel) = args.max_parallel {
            self.max_parallel_builds = Some(max_parallel);
        }
        if let Some(bundler_bin) = &args.bundler_bin {
            self.bundler_bin = bundler_bin.clone();
        }
        if let Some(minifier_bin) = &args.minifier_bin {
            self.minifier_bin = minifier_bin.clone();
        }
        if args.clean {
            self.clean = true;
        }
    }

    /// The core build profile slice of this configuration.
    pub fn to_profile(&self) -> BuildProfile {
        BuildProfile {
            display_name: self.display_name.clone(),
            target: self.target.clone(),
            source_root: self.source_root.clone(),
            out_dir: self.out_dir.clone(),
            main_entry: self.main_entry.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            max_parallel_builds: self.max_parallel_builds,
        }
    }
}
