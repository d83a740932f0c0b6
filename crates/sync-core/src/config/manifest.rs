//! Parsing and validation of `.sync-files.toml`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sync_fs::NormalizedPath;
use toml::{Table, Value};

use crate::{Error, Mode, Result};

/// One canonical-to-local file mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePair {
    /// Path inside the source repository
    pub src: NormalizedPath,
    /// Path inside the consumer repository
    pub dst: NormalizedPath,
}

/// The validated configuration for one run.
///
/// Built once by [`SyncConfig::parse`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    source_repo: String,
    source_ref: String,
    file_pairs: Vec<FilePair>,
    default_mode: Mode,
}

impl SyncConfig {
    /// Parse and validate `content`, read from `path`.
    ///
    /// `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: Table = toml::from_str(content).map_err(|e| {
            let (line, column) = match e.span() {
                Some(span) => {
                    let (line, column) = line_column(content, span.start);
                    (Some(line), Some(column))
                }
                None => (None, None),
            };
            Error::ConfigParse {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().trim().to_string(),
            }
        })?;

        Validator { path }.validate(raw)
    }

    /// Location of the source repository (URL or local path).
    pub fn source_repo(&self) -> &str {
        &self.source_repo
    }

    /// Branch, tag or commit id to materialize.
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    /// File pairs in configured order.
    pub fn file_pairs(&self) -> &[FilePair] {
        &self.file_pairs
    }

    /// Mode used when the caller does not override it.
    pub fn default_mode(&self) -> Mode {
        self.default_mode
    }
}

struct Validator<'a> {
    path: &'a Path,
}

impl Validator<'_> {
    fn fail(&self, field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::ConfigValidation {
            path: PathBuf::from(self.path),
            field: field.into(),
            message: message.into(),
        }
    }

    fn table<'v>(&self, value: Option<&'v Value>, field: &str) -> Result<Option<&'v Table>> {
        match value {
            None => Ok(None),
            Some(Value::Table(table)) => Ok(Some(table)),
            Some(other) => Err(self.fail(
                field,
                format!("must be a table, found {}", other.type_str()),
            )),
        }
    }

    /// A string that is present and not blank. The value is kept as written.
    fn required(&self, value: Option<&Value>, field: &str) -> Result<String> {
        match value {
            Some(Value::String(v)) if !v.trim().is_empty() => Ok(v.clone()),
            Some(Value::String(_)) => Err(self.fail(field, "must not be empty")),
            Some(other) => Err(self.fail(
                field,
                format!("must be a string, found {}", other.type_str()),
            )),
            None => Err(self.fail(field, "missing required field")),
        }
    }

    fn relative(&self, value: Option<&Value>, field: &str) -> Result<NormalizedPath> {
        let raw = self.required(value, field)?;
        NormalizedPath::relative(&raw).map_err(|e| self.fail(field, e.to_string()))
    }

    fn validate(&self, raw: Table) -> Result<SyncConfig> {
        let source = self
            .table(raw.get("source"), "source")?
            .ok_or_else(|| self.fail("source", "missing required table [source]"))?;
        let source_repo = self.required(source.get("repo"), "source.repo")?;
        let source_ref = self.required(source.get("ref"), "source.ref")?;
        if source_ref.starts_with('-') {
            return Err(self.fail("source.ref", "must not start with '-'"));
        }

        let files = match raw.get("files") {
            None => return Err(self.fail("files", "at least one [[files]] entry is required")),
            Some(Value::Array(files)) => files,
            Some(other) => {
                return Err(self.fail(
                    "files",
                    format!("must be an array of tables, found {}", other.type_str()),
                ));
            }
        };
        if files.is_empty() {
            return Err(self.fail("files", "at least one [[files]] entry is required"));
        }

        let mut seen: HashMap<NormalizedPath, NormalizedPath> = HashMap::new();
        let mut file_pairs = Vec::with_capacity(files.len());
        for (i, entry) in files.iter().enumerate() {
            let entry_field = format!("files[{}]", i);
            let entry = self
                .table(Some(entry), &entry_field)?
                .ok_or_else(|| self.fail(&entry_field, "missing file mapping"))?;
            let src = self.relative(entry.get("src"), &format!("{}.src", entry_field))?;
            let dst_field = format!("{}.dst", entry_field);
            let dst = self.relative(entry.get("dst"), &dst_field)?;

            match seen.get(&dst) {
                Some(existing) if *existing == src => {
                    tracing::debug!(%src, %dst, "Skipping repeated file mapping");
                    continue;
                }
                Some(existing) => {
                    return Err(self.fail(
                        dst_field,
                        format!(
                            "destination '{}' is already mapped from '{}'",
                            dst, existing
                        ),
                    ));
                }
                None => {
                    seen.insert(dst.clone(), src.clone());
                }
            }
            file_pairs.push(FilePair { src, dst });
        }

        let options = self.table(raw.get("options"), "options")?;
        let default_mode = match options.and_then(|o| o.get("mode")) {
            None => Mode::default(),
            Some(Value::String(literal)) => literal.parse::<Mode>().map_err(|_| {
                self.fail(
                    "options.mode",
                    format!("expected \"check\" or \"write\", got \"{}\"", literal),
                )
            })?,
            Some(other) => {
                return Err(self.fail(
                    "options.mode",
                    format!("must be a string, found {}", other.type_str()),
                ));
            }
        };

        Ok(SyncConfig {
            source_repo,
            source_ref,
            file_pairs,
            default_mode,
        })
    }
}

/// 1-based line and column of a byte offset.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
