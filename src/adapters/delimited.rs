//! Minimal comma-separated table reader and writer.
//!
//! Supports a header row, double-quoted fields with `""` escapes, and blank
//! lines. Quoted fields may not span lines.

use std::collections::HashMap;

use crate::domain::AppError;

/// A parsed table with case-insensitive column lookup.
#[derive(Debug, Clone)]
pub struct Table {
    columns: HashMap<String, usize>,
    rows: Vec<Row>,
}

/// One data row, with the 1-based source line it came from.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: usize,
    fields: Vec<String>,
}

impl Table {
    /// Parse `content`; `source` names the input in error messages.
    pub fn parse(source: &str, content: &str) -> Result<Self, AppError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) =
            lines.next().ok_or_else(|| AppError::table(source, "missing header row"))?;
        let header_fields = split_record(header)
            .map_err(|reason| AppError::table(source, format!("line {header_line}: {reason}")))?;

        let columns: HashMap<String, usize> = header_fields
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_lowercase(), idx))
            .collect();

        let mut rows = Vec::new();
        for (line, raw) in lines {
            let fields = split_record(raw)
                .map_err(|reason| AppError::table(source, format!("line {line}: {reason}")))?;
            if fields.len() != header_fields.len() {
                return Err(AppError::table(
                    source,
                    format!(
                        "line {line}: wrong number of fields (expected {}, found {})",
                        header_fields.len(),
                        fields.len()
                    ),
                ));
            }
            rows.push(Row { line, fields });
        }

        Ok(Self { columns, rows })
    }

    /// Fail when any of `names` is not a column.
    pub fn require_columns(&self, source: &str, names: &[&str]) -> Result<(), AppError> {
        for name in names {
            if !self.columns.contains_key(*name) {
                return Err(AppError::table(source, format!("missing required column '{name}'")));
            }
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

impl Row {
    /// Field at `column`, or an empty string when the column is absent.
    pub fn get(&self, column: Option<usize>) -> &str {
        column.and_then(|idx| self.fields.get(idx)).map(String::as_str).unwrap_or("")
    }
}

/// Join `fields` into one record, quoting fields that need it.
pub fn write_record<S: AsRef<str>>(fields: &[S]) -> String {
    fields.iter().map(|field| quote_field(field.as_ref())).collect::<Vec<_>>().join(",")
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut field_started_quoted = false;

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(ch),
            }
            continue;
        }

        match ch {
            ',' => {
                fields.push(std::mem::take(&mut current));
                field_started_quoted = false;
            }
            '"' if current.is_empty() && !field_started_quoted => {
                in_quotes = true;
                field_started_quoted = true;
            }
            '"' => return Err("bare \" in non-quoted field".to_string()),
            _ if field_started_quoted => {
                return Err("extraneous text after closing quote".to_string());
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(current);
    Ok(fields)
}
