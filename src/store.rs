//! In-memory parameter store.
//!
//! Holds parameters in insertion order along with the physical line each one
//! was read from, so the codec can write values back in place.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;

use crate::error::ParafileError;
use crate::param::Param;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStore {
    params: IndexMap<String, Param>,
    lines: BTreeMap<usize, String>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.params.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Param> {
        self.params.get_mut(key)
    }

    /// Insert a parameter under its key.
    ///
    /// Replacing an existing key keeps its position and its recorded line.
    /// Returns the replaced parameter, if any.
    pub fn insert(&mut self, param: Param) -> Option<Param> {
        self.params.insert(param.key().to_string(), param)
    }

    /// Record that `key` occupies physical line `line`.
    pub fn set_line(&mut self, line: usize, key: &str) -> Result<(), ParafileError> {
        if !self.exists(key) {
            return Err(ParafileError::KeyNotFound(key.into()));
        }
        self.lines.insert(line, key.to_string());
        Ok(())
    }

    pub fn key_at_line(&self, line: usize) -> Option<&str> {
        self.lines.get(&line).map(String::as_str)
    }

    /// The line `key` was last written to. Lines a key was moved away from
    /// (a duplicate key later in the file) are not reported.
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .rev()
            .find(|(_, k)| k.as_str() == key)
            .map(|(line, _)| *line)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Param> {
        self.params.values_mut()
    }

    /// `(line, key)` pairs in ascending line order.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().map(|(line, key)| (*line, key.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Insert `param` as the owner of `line`. A key seen again takes over the
    /// new line; its previous line is released.
    pub(crate) fn insert_at_line(&mut self, line: usize, param: Param) {
        let key = param.key().to_string();
        if let Some(previous) = self.line_of(&key) {
            self.lines.remove(&previous);
        }
        self.insert(param);
        self.lines.insert(line, key);
    }

    pub(crate) fn replace_lines(&mut self, lines: BTreeMap<usize, String>) {
        self.lines = lines;
    }
}

impl fmt::Display for ParamStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in self.params.values() {
            writeln!(f, "{param}")?;
        }
        Ok(())
    }
}
