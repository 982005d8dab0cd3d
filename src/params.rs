//! The query facade scripts talk to.
//!
//! [`Params`] owns a decoded [`ParamStore`], the path it came from and the
//! overrides collected at load time. Lookups prefer overrides, then stored
//! values, then the caller's default.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::warn;

use crate::builder::ParamsBuilder;
use crate::codec;
use crate::editor::{self, Prompter};
use crate::error::ParafileError;
use crate::ops::{self, ParamResult};
use crate::overrides::Overrides;
use crate::param::{self, Param};
use crate::store::ParamStore;
use crate::types::{EditTarget, ParamAction};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Params {
    path: PathBuf,
    store: ParamStore,
    overrides: Overrides,
    edit: Option<EditTarget>,
}

impl Params {
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::new()
    }

    pub(crate) fn new(
        path: PathBuf,
        store: ParamStore,
        overrides: Overrides,
        edit: Option<EditTarget>,
    ) -> Self {
        Self {
            path,
            store,
            overrides,
            edit,
        }
    }

    /// Wrap an already decoded store, with no overrides.
    pub fn from_store(path: impl Into<PathBuf>, store: ParamStore) -> Self {
        Self::new(path.into(), store, Overrides::new(), None)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The edit session requested with `-edit`, if any.
    pub fn edit_target(&self) -> Option<&EditTarget> {
        self.edit.as_ref()
    }

    /// Resolve `key`: override, else stored value, else an empty string.
    pub fn get(&self, key: &str) -> Result<Value, ParafileError> {
        self.get_or(key, None)
    }

    /// Resolve `key`: override, else stored value, else `default`, else an
    /// empty string.
    ///
    /// An override for a stored parameter is parsed like an edit of that
    /// parameter (class and options apply). If it does not parse, the stored
    /// value is returned and a warning is logged.
    pub fn get_or(&self, key: &str, default: Option<Value>) -> Result<Value, ParafileError> {
        if key.is_empty() {
            return Err(ParafileError::KeyRequired);
        }
        let key = key.to_lowercase();

        if let Some(raw) = self.overrides.get(&key) {
            return Ok(match self.store.get(&key) {
                Some(param) => resolve_override(param, raw),
                None => Value::infer(raw),
            });
        }
        if let Some(param) = self.store.get(&key) {
            return Ok(param.value().clone());
        }
        Ok(default.unwrap_or_default())
    }

    /// Resolve `key` and split it on commas.
    ///
    /// Each trimmed token is inferred to its own class, or kept as text when
    /// `as_strings` is set. An empty value gives an empty list.
    pub fn get_array(
        &self,
        key: &str,
        default: Option<Value>,
        as_strings: bool,
    ) -> Result<Vec<Value>, ParafileError> {
        let resolved = self.get_or(key, default)?.to_string();
        if resolved.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(resolved
            .split(',')
            .map(str::trim)
            .map(|token| {
                if as_strings {
                    Value::Text(token.to_string())
                } else {
                    Value::infer(token)
                }
            })
            .collect())
    }

    /// Current stored value of every parameter, in file order.
    pub fn get_all(&self) -> IndexMap<String, Value> {
        self.store
            .iter()
            .map(|param| (param.key().to_string(), param.value().clone()))
            .collect()
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.store.keys().map(str::to_string).collect()
    }

    pub fn param(&self, key: &str) -> Option<&Param> {
        self.store.get(&key.to_lowercase())
    }

    pub fn param_mut(&mut self, key: &str) -> Option<&mut Param> {
        self.store.get_mut(&key.to_lowercase())
    }

    /// Add or replace a parameter. New parameters are appended to the file on
    /// the next [`save`](Self::save).
    pub fn insert(&mut self, param: Param) -> Option<Param> {
        self.store.insert(param)
    }

    /// Parse `raw` into the stored parameter `key`.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<Value, ParafileError> {
        let param = self
            .param_mut(key)
            .ok_or_else(|| ParafileError::KeyNotFound(key.into()))?;
        Ok(param.parse(raw)?.clone())
    }

    /// Write every override that names a stored parameter into the store, so
    /// the next save makes it the new default. Returns how many were applied.
    pub fn apply_overrides(&mut self) -> usize {
        let mut applied = 0;
        for (key, raw) in &self.overrides {
            let Some(param) = self.store.get_mut(key) else {
                continue;
            };
            let resolved = resolve_override(param, raw);
            match param.set_value(resolved) {
                Ok(()) => applied += 1,
                Err(e) => warn!(error = %e, "ignoring override"),
            }
        }
        applied
    }

    /// Run an interactive edit session over the store.
    pub fn edit<P: Prompter + ?Sized>(
        &mut self,
        target: &EditTarget,
        prompter: &mut P,
    ) -> Result<usize, ParafileError> {
        let title = self.path.display().to_string();
        editor::edit(&mut self.store, target, &title, prompter)
    }

    /// If `-edit` was given, run that session and save. Returns whether an
    /// edit session ran.
    pub fn run_requested_edit<P: Prompter + ?Sized>(
        &mut self,
        prompter: &mut P,
    ) -> Result<bool, ParafileError> {
        let Some(target) = self.edit.clone() else {
            return Ok(false);
        };
        self.edit(&target, prompter)?;
        self.save()?;
        Ok(true)
    }

    /// Write the store back to its file.
    pub fn save(&mut self) -> Result<(), ParafileError> {
        codec::write_file(&self.path, &mut self.store)
    }

    /// Stored values as a JSON object.
    pub fn to_json(&self) -> Result<String, ParafileError> {
        Ok(serde_json::to_string_pretty(&self.get_all())?)
    }

    /// Handle a [`ParamAction`]. Mutating actions save the file.
    pub fn handle<P: Prompter + ?Sized>(
        &mut self,
        action: &ParamAction,
        prompter: &mut P,
    ) -> Result<ParamResult, ParafileError> {
        match action {
            ParamAction::List { json: false } => Ok(ops::list_values(self)),
            ParamAction::List { json: true } => Ok(ParamResult::Json(self.to_json()?)),
            ParamAction::Get { key } => ops::get_value(self, key),
            ParamAction::Set { key, value } => {
                let parsed = self.set(key, value)?;
                self.save()?;
                Ok(ParamResult::ValueSet {
                    key: key.to_lowercase(),
                    value: parsed.to_string(),
                })
            }
            ParamAction::Add {
                key,
                name,
                default,
                flag,
                options,
            } => {
                for cell in [key, name, default].into_iter().chain(options) {
                    param::check_cell(key, cell)?;
                }
                let param = Param::new(key, name.as_str(), default, *flag, options.clone());
                let key = param.key().to_string();
                self.insert(param);
                self.save()?;
                Ok(ParamResult::ParamAdded { key })
            }
            ParamAction::Edit { target } => {
                let count = self.edit(target, prompter)?;
                self.save()?;
                Ok(ParamResult::Edited {
                    path: self.path.clone(),
                    count,
                })
            }
        }
    }
}

fn resolve_override(param: &Param, raw: &str) -> Value {
    let mut candidate = param.clone();
    match candidate.parse(raw) {
        Ok(value) => value.clone(),
        Err(e) => {
            warn!(error = %e, "ignoring override");
            param.value().clone()
        }
    }
}
