use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::editor::{self, Prompter};
use crate::env;
use crate::error::ParafileError;
use crate::file;
use crate::overrides::{self, Overrides, SWITCH_VALUE};
use crate::params::Params;
use crate::types::{EditTarget, SearchPath};

/// Override key naming the parameter file to load.
pub const FILE_KEY: &str = "para";
/// Override key requesting an edit session (`true` for all keys, or one key).
pub const EDIT_KEY: &str = "edit";
/// File name used when nothing else names one.
pub const DEFAULT_FILE_NAME: &str = "input.para";

/// Builder for locating, loading and overriding a parameter file.
///
/// ```ignore
/// let params = Params::builder()
///     .args(std::env::args())
///     .load()?;
/// let timeout = params.get("timeout")?;
/// ```
pub struct ParamsBuilder {
    app_name: Option<String>,
    file_name: Option<String>,
    program: Option<String>,
    args: Vec<String>,
    search_paths: Option<Vec<SearchPath>>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    strict: bool,
    injected: Vec<(String, String)>,
}

impl ParamsBuilder {
    pub(crate) fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            program: None,
            args: Vec::new(),
            search_paths: None,
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            strict: false,
            injected: Vec::new(),
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.para"`
    /// - `env_prefix` → `"{APP_NAME}"` (uppercased, `-` becomes `_`)
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the parameter file name. A name without an extension gets
    /// `.para` appended.
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Process arguments, program name first (pass `std::env::args()`).
    ///
    /// The program name supplies the file name when nothing else does
    /// (`train.py` → `train.para`). The rest are parsed as `-key value`
    /// overrides.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        self.program = args.next();
        self.args = args.collect();
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority. The default is a [`SearchPath::Tree`] walk of the
    /// current working directory.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(default_search_paths)
            .push(path);
        self
    }

    /// Override the environment variable prefix (default: derived from `app_name`).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable overrides entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Enable or disable strict argument parsing (default: `false`).
    /// In strict mode, a value with no `-key` before it is an error.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Inject an override programmatically. `None` values are ignored.
    /// Injected overrides take precedence over process arguments.
    pub fn override_value<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.injected.push((key.to_lowercase(), v.to_string()));
        }
        self
    }

    /// Name used for platform directories: app name, else program stem.
    fn effective_app_name(&self) -> String {
        if let Some(name) = &self.app_name {
            return name.clone();
        }
        self.program
            .as_deref()
            .and_then(|p| Path::new(p).file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    /// Resolve the effective file name. `requested` is the `-para` override.
    fn effective_file_name(&self, requested: Option<&str>) -> String {
        if let Some(name) = requested.or(self.file_name.as_deref()) {
            return file::normalize_file_name(name);
        }
        if let Some(app) = &self.app_name {
            return file::normalize_file_name(app);
        }
        if let Some(stem) = self
            .program
            .as_deref()
            .and_then(|p| Path::new(p).file_stem())
        {
            return format!("{}.{}", stem.to_string_lossy(), file::FILE_EXTENSION);
        }
        DEFAULT_FILE_NAME.to_string()
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        if let Some(paths) = &self.search_paths {
            return paths.clone();
        }
        default_search_paths()
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        if let Some(prefix) = &self.env_prefix {
            return Some(prefix.clone());
        }
        self.app_name
            .as_ref()
            .map(|app| app.to_uppercase().replace('-', "_"))
    }

    /// Environment first, then arguments, then injected values: later wins.
    fn collect_overrides(&self) -> Result<Overrides, ParafileError> {
        let mut merged = Overrides::new();
        if let Some(prefix) = self.effective_env_prefix() {
            let vars = match &self.env_vars {
                Some(vars) => vars.clone(),
                None => std::env::vars().collect(),
            };
            merged.extend(env::env_to_overrides(&prefix, vars));
        }
        merged.extend(overrides::parse_args(&self.args, self.strict)?);
        merged.extend(self.injected.iter().cloned());
        Ok(merged)
    }

    /// Parse overrides, locate the file and decode it.
    pub fn load(self) -> Result<Params, ParafileError> {
        let (overrides, file_name, edit) = self.prepare()?;
        let path = file::locate(
            &self.effective_search_paths(),
            &file_name,
            &self.effective_app_name(),
        )?;
        let store = codec::read_file(&path)?;
        Ok(Params::new(path, store, overrides, edit))
    }

    /// Like [`load`](Self::load), but when no file is found, ask for
    /// parameter definitions and create one in the highest-priority search
    /// path.
    pub fn load_or_create<P: Prompter + ?Sized>(
        self,
        prompter: &mut P,
    ) -> Result<Params, ParafileError> {
        let (overrides, file_name, edit) = self.prepare()?;
        let search_paths = self.effective_search_paths();
        let app_name = self.effective_app_name();

        let path = match file::locate(&search_paths, &file_name, &app_name) {
            Ok(path) => path,
            Err(ParafileError::FileNotFound { name }) => {
                let dir = search_paths
                    .last()
                    .and_then(|sp| file::resolve_search_path(sp, &app_name))
                    .ok_or(ParafileError::FileNotFound { name })?;
                let path = dir.join(&file_name);
                debug!(path = %path.display(), "creating parameter file");
                let entries = editor::create_entries(prompter)?;
                let store = codec::create_file(&path, entries)?;
                return Ok(Params::new(path, store, overrides, edit));
            }
            Err(e) => return Err(e),
        };
        let store = codec::read_file(&path)?;
        Ok(Params::new(path, store, overrides, edit))
    }

    /// Split the reserved `-para` / `-edit` keys out of the overrides.
    fn prepare(&self) -> Result<(Overrides, String, Option<EditTarget>), ParafileError> {
        let mut overrides = self.collect_overrides()?;
        let requested = overrides.shift_remove(FILE_KEY);
        let file_name = self.effective_file_name(requested.as_deref());
        let edit = overrides
            .shift_remove(EDIT_KEY)
            .map(|target| match target.as_str() {
                SWITCH_VALUE => EditTarget::All,
                key => EditTarget::Key(key.to_lowercase()),
            });
        Ok((overrides, file_name, edit))
    }
}

fn default_search_paths() -> Vec<SearchPath> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    vec![SearchPath::Tree(root)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{SAMPLE, ScriptedPrompter};
    use crate::value::Value;
    use std::fs;
    use tempfile::TempDir;

    fn in_dir(dir: &TempDir) -> ParamsBuilder {
        Params::builder()
            .search_paths(vec![SearchPath::Tree(dir.path().to_path_buf())])
            .no_env()
    }

    fn sample_dir(file_name: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(file_name), SAMPLE).unwrap();
        dir
    }

    #[test]
    fn file_name_from_program() {
        let builder = Params::builder().args(["/usr/local/bin/train.py"]);
        assert_eq!(builder.effective_file_name(None), "train.para");
    }

    #[test]
    fn file_name_from_app_name() {
        let builder = Params::builder().app_name("myapp").args(["prog"]);
        assert_eq!(builder.effective_file_name(None), "myapp.para");
    }

    #[test]
    fn explicit_file_name_wins_over_app_name() {
        let builder = Params::builder().app_name("myapp").file_name("custom");
        assert_eq!(builder.effective_file_name(None), "custom.para");
    }

    #[test]
    fn requested_file_name_wins() {
        let builder = Params::builder().file_name("custom.para");
        assert_eq!(builder.effective_file_name(Some("other")), "other.para");
    }

    #[test]
    fn file_name_fallback() {
        let builder = Params::builder();
        assert_eq!(builder.effective_file_name(None), DEFAULT_FILE_NAME);
    }

    #[test]
    fn env_prefix_derived_from_app_name() {
        let builder = Params::builder().app_name("my-app");
        assert_eq!(builder.effective_env_prefix(), Some("MY_APP".to_string()));
    }

    #[test]
    fn env_prefix_absent_without_app_name() {
        assert_eq!(Params::builder().effective_env_prefix(), None);
    }

    #[test]
    fn no_env_disables_prefix() {
        let builder = Params::builder().app_name("myapp").no_env();
        assert_eq!(builder.effective_env_prefix(), None);
    }

    #[test]
    fn add_search_path_appends_to_defaults() {
        let builder = Params::builder().add_search_path(SearchPath::Cwd);
        let paths = builder.effective_search_paths();
        assert_eq!(paths.len(), 2);
        assert!(matches!(paths[0], SearchPath::Tree(_)));
        assert_eq!(paths[1], SearchPath::Cwd);
    }

    #[test]
    fn load_finds_file_in_tree() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("jobs");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("train.para"), SAMPLE).unwrap();

        let params = in_dir(&dir).args(["train.py"]).load().unwrap();
        assert_eq!(params.path(), nested.join("train.para"));
        assert_eq!(params.get("timeout").unwrap(), Value::Integer(30));
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let result = in_dir(&dir).args(["train.py"]).load();
        assert!(matches!(result, Err(ParafileError::FileNotFound { .. })));
    }

    #[test]
    fn para_override_selects_file() {
        let dir = sample_dir("other.para");
        let params = in_dir(&dir)
            .args(["train.py", "-para", "other"])
            .load()
            .unwrap();
        assert_eq!(params.path(), dir.path().join("other.para"));
        assert!(!params.overrides().contains_key(FILE_KEY));
    }

    #[test]
    fn edit_switch_targets_all() {
        let dir = sample_dir("train.para");
        let params = in_dir(&dir).args(["train.py", "-edit"]).load().unwrap();
        assert_eq!(params.edit_target(), Some(&EditTarget::All));
        assert!(!params.overrides().contains_key(EDIT_KEY));
    }

    #[test]
    fn edit_with_key_targets_one() {
        let dir = sample_dir("train.para");
        let params = in_dir(&dir)
            .args(["train.py", "-edit", "Mode"])
            .load()
            .unwrap();
        assert_eq!(params.edit_target(), Some(&EditTarget::Key("mode".into())));
    }

    #[test]
    fn args_override_env_and_injected_override_args() {
        let dir = sample_dir("train.para");
        let params = Params::builder()
            .search_paths(vec![SearchPath::Tree(dir.path().to_path_buf())])
            .app_name("train")
            .env_vars(vec![
                ("TRAIN__TIMEOUT".into(), "40".into()),
                ("TRAIN__RATE".into(), "0.1".into()),
            ])
            .args(["train.py", "-timeout", "50", "-mode", "slow"])
            .override_value("mode", Some("fast"))
            .load()
            .unwrap();
        assert_eq!(params.get("timeout").unwrap(), Value::Integer(50));
        assert_eq!(params.get("rate").unwrap(), Value::Float(0.1));
        assert_eq!(params.get("mode").unwrap(), Value::Text("fast".into()));
    }

    #[test]
    fn override_value_none_skipped() {
        let builder = Params::builder()
            .override_value("mode", Some("slow"))
            .override_value::<&str>("rate", None);
        assert_eq!(builder.injected.len(), 1);
        assert_eq!(builder.injected[0].0, "mode");
    }

    #[test]
    fn strict_rejects_stray_argument() {
        let dir = sample_dir("train.para");
        let result = in_dir(&dir).strict(true).args(["train.py", "oops"]).load();
        assert!(matches!(result, Err(ParafileError::UnexpectedArgument(_))));
    }

    #[test]
    fn load_or_create_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new(&["timeout", "Timeout", "30", "n", "", ""]);
        let params = Params::builder()
            .search_paths(vec![SearchPath::Path(dir.path().to_path_buf())])
            .no_env()
            .args(["job.py"])
            .load_or_create(&mut prompter)
            .unwrap();

        assert_eq!(params.path(), dir.path().join("job.para"));
        assert!(params.path().exists());
        assert_eq!(params.get("timeout").unwrap(), Value::Integer(30));
    }

    #[test]
    fn load_or_create_loads_existing_without_prompting() {
        let dir = sample_dir("job.para");
        let mut prompter = ScriptedPrompter::new(&[]);
        let params = in_dir(&dir)
            .args(["job.py"])
            .load_or_create(&mut prompter)
            .unwrap();
        assert_eq!(params.list_keys().len(), 4);
        assert!(prompter.questions().is_empty());
    }
}
