//! Reading and writing parameter files.
//!
//! A parameter file is line-oriented. Data lines carry exactly five
//! pipe-separated columns:
//!
//! ```text
//! timeout | Timeout | 30   |      |
//! mode    | Mode    | fast | flag | fast, slow
//! ```
//!
//! Everything else (comments starting with `#` or `/`, blank lines, lines with
//! the wrong number of columns) is ignored on read and written back
//! untouched. The pure functions [`decode`] and [`encode`] do the work; the
//! `*_file` wrappers add the I/O.
//!
//! Encoding rewrites only the lines owned by a parameter, re-aligning every
//! column to its widest entry. Parameters created in memory have no line yet
//! and are appended to the end of the file.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::ParafileError;
use crate::param::Param;
use crate::store::ParamStore;

/// First characters that mark a comment line.
pub const COMMENT_MARKERS: [char; 2] = ['#', '/'];

/// First line of a newly created parameter file.
pub const HEADER: &str = "# key | name | default | flag | options\n";

const FIELD_COUNT: usize = 5;

/// Decode file content into a store, recording each parameter's line.
///
/// Never fails: lines that are not valid parameter lines are skipped. When a
/// key appears twice, the later line wins and the earlier one becomes an
/// ordinary preserved line.
pub fn decode(content: &str) -> ParamStore {
    let mut store = ParamStore::new();
    for (idx, raw) in content.split_inclusive('\n').enumerate() {
        if let Some(param) = decode_line(raw) {
            store.insert_at_line(idx, param);
        }
    }
    store
}

fn decode_line(raw: &str) -> Option<Param> {
    let line = raw.trim();
    if line.chars().count() < 2 || line.starts_with(COMMENT_MARKERS) {
        return None;
    }

    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [key, name, default, flag, options] = fields.as_slice() else {
        trace!(
            line,
            fields = fields.len(),
            expected = FIELD_COUNT,
            "skipping line with wrong column count"
        );
        return None;
    };

    let values = options.split(',').map(|o| o.trim().to_string()).collect();
    Some(Param::new(key, *name, default, !flag.is_empty(), values))
}

/// Read and decode a parameter file.
///
/// A missing file is [`ParafileError::FileNotFound`]. Any other failure while
/// reading (permissions, invalid UTF-8) is [`ParafileError::FileParse`] with
/// the cause attached; no partial store is returned.
pub fn read_file(path: &Path) -> Result<ParamStore, ParafileError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ParafileError::FileNotFound {
                name: path.display().to_string(),
            });
        }
        Err(e) => {
            return Err(ParafileError::FileParse {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let store = decode(&content);
    debug!(path = %path.display(), params = store.len(), "decoded parameter file");
    Ok(store)
}

/// Pure function: write the store's current values into `content`.
///
/// If `content` is `None` (no file yet), starts from [`HEADER`]. Rewritten
/// lines keep their line ending; appended lines use `\r\n` when the content
/// already does. Parameters
/// without a recorded line are given the next free lines at the end, and the
/// store's line map is updated to where every parameter ended up.
///
/// Returns the new file content.
pub fn encode(content: Option<&str>, store: &mut ParamStore) -> String {
    let mut lines: Vec<String> = match content {
        Some(c) => c.split_inclusive('\n').map(str::to_string).collect(),
        None => vec![HEADER.to_string()],
    };
    let eol = if content.is_some_and(|c| c.contains("\r\n")) {
        "\r\n"
    } else {
        "\n"
    };

    // Give in-memory parameters a line past everything already recorded.
    let mut next = store
        .lines()
        .last()
        .map_or(lines.len(), |(line, _)| lines.len().max(line + 1));
    let unplaced: Vec<String> = store
        .keys()
        .filter(|key| store.line_of(key).is_none())
        .map(str::to_string)
        .collect();
    let mut recorded: Vec<(usize, String)> = store
        .lines()
        .map(|(line, key)| (line, key.to_string()))
        .collect();
    for key in unplaced {
        recorded.push((next, key));
        next += 1;
    }

    let rendered: IndexMap<String, [String; FIELD_COUNT]> = store
        .iter()
        .map(|param| (param.key().to_string(), param.render()))
        .collect();
    let widths = column_widths(rendered.values());

    let mut placed = BTreeMap::new();
    for (line, key) in recorded {
        let Some(fields) = rendered.get(&key) else {
            continue;
        };
        let at = if line < lines.len() {
            let terminator = line_ending(&lines[line]).unwrap_or(eol);
            lines[line] = format_line(fields, &widths, terminator);
            line
        } else {
            if let Some(last) = lines.last_mut()
                && line_ending(last).is_none()
            {
                last.push_str(eol);
            }
            lines.push(format_line(fields, &widths, eol));
            lines.len() - 1
        };
        placed.insert(at, key);
    }
    store.replace_lines(placed);

    lines.concat()
}

/// Widest entry of each column, in characters.
fn column_widths<'a>(rows: impl Iterator<Item = &'a [String; FIELD_COUNT]>) -> [usize; FIELD_COUNT] {
    let mut widths = [0; FIELD_COUNT];
    for row in rows {
        for (width, field) in widths.iter_mut().zip(row) {
            *width = (*width).max(field.chars().count());
        }
    }
    widths
}

fn format_line(fields: &[String; FIELD_COUNT], widths: &[usize; FIELD_COUNT], eol: &str) -> String {
    let cells: Vec<String> = fields
        .iter()
        .zip(widths)
        .map(|(field, width)| format!("{field:<width$} ", width = *width))
        .collect();
    let mut line = cells.join("| ");
    line.push_str(eol);
    line
}

fn line_ending(line: &str) -> Option<&'static str> {
    if line.ends_with("\r\n") {
        Some("\r\n")
    } else if line.ends_with('\n') {
        Some("\n")
    } else {
        None
    }
}

/// I/O wrapper: reads the file (if it exists), encodes the store into it,
/// writes it back. Creates parent directories if needed.
pub fn write_file(path: &Path, store: &mut ParamStore) -> Result<(), ParafileError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(ParafileError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let new_content = encode(content.as_deref(), store);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ParafileError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, &new_content).map_err(|e| ParafileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), params = store.len(), "wrote parameter file");
    Ok(())
}

/// Create a new parameter file holding `params`, below a [`HEADER`] line.
///
/// Refuses to overwrite an existing file.
pub fn create_file(
    path: &Path,
    params: impl IntoIterator<Item = Param>,
) -> Result<ParamStore, ParafileError> {
    if path.exists() {
        return Err(ParafileError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let mut store = ParamStore::new();
    for param in params {
        store.insert(param);
    }
    write_file(path, &mut store)?;
    Ok(store)
}
