//! Tagged tabular log reader
//!
//! Parses Zeek ASCII logs: `#`-prefixed directive lines followed by
//! separator-delimited data rows aligned to the `#fields` declaration.
//!
//! ```text
//! #separator \x09
//! #set_separator	,
//! #empty_field	(empty)
//! #unset_field	-
//! #path	ssl
//! #fields	ts	uid	version	cipher
//! #types	time	string	string	string
//! 1300475169.78	CHhAvV	TLSv12	TLS_AES_256
//! #close	2011-03-18-19-06-13
//! ```

use crate::errors::{CompareError, ExError, Result};
use crate::model::{LogHeader, LogTable, Row, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

const DIRECTIVE_SEPARATOR: &str = "separator";
const DIRECTIVE_FIELDS: &str = "fields";
const DIRECTIVE_TYPES: &str = "types";

/// Read and parse a log file.
///
/// # Errors
///
/// - `NotFound`: the file does not exist
/// - `Io`: the file exists but cannot be read
/// - `MalformedLog`: no `#fields` directive, conflicting declarations,
///   a `#types` list of the wrong length, or duplicate column names
pub fn read_log(path: &Path) -> Result<LogTable> {
    let start = Instant::now();
    let origin = path.display().to_string();
    log_op_start!("read_log", path = %origin);

    let result = load(path, &origin).and_then(|content| parse_log_str(&content, &origin));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(table) => {
            log_op_end!(
                "read_log",
                duration_ms = duration_ms,
                path = %origin,
                rows = table.len(),
                columns = table.columns().len()
            );
        }
        Err(err) => {
            log_op_error!("read_log", err.clone(), duration_ms = duration_ms, path = %origin);
        }
    }
    result
}

fn load(path: &Path, origin: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| -> ExError {
        match e.kind() {
            ErrorKind::NotFound => CompareError::LogNotFound {
                path: origin.to_string(),
            }
            .into(),
            _ => CompareError::LogUnreadable {
                path: origin.to_string(),
                reason: e.to_string(),
            }
            .into(),
        }
    })?;
    // Zeek escapes non-printable bytes as \xHH; anything else is replaced.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse log content. `origin` names the source in errors and log events.
///
/// # Errors
///
/// `MalformedLog` under the same conditions as [`read_log`].
pub fn parse_log_str(content: &str, origin: &str) -> Result<LogTable> {
    let mut header = LogHeader::default();
    let mut columns: Option<Vec<String>> = None;
    let mut types: Option<Vec<String>> = None;
    let mut rows: Vec<Row> = Vec::new();
    let mut skipped_preamble = 0usize;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        if let Some(directive) = line.strip_prefix('#') {
            apply_directive(
                directive,
                line_no,
                origin,
                &mut header,
                &mut columns,
                &mut types,
            )?;
            continue;
        }

        let Some(columns) = &columns else {
            skipped_preamble += 1;
            continue;
        };
        rows.push(parse_row(line, line_no, columns.len(), &header, origin));
    }

    if skipped_preamble > 0 {
        tracing::debug!(
            path = origin,
            lines = skipped_preamble,
            "ignored data lines preceding #fields"
        );
    }

    let columns = columns.ok_or_else(|| -> ExError {
        CompareError::MissingFieldsDirective {
            path: origin.to_string(),
        }
        .into()
    })?;

    LogTable::with_header(header, columns, types, rows).map_err(|e| e.with_path(origin))
}

fn apply_directive(
    directive: &str,
    line_no: usize,
    origin: &str,
    header: &mut LogHeader,
    columns: &mut Option<Vec<String>>,
    types: &mut Option<Vec<String>>,
) -> Result<()> {
    // `#separator` is the one directive delimited by a space, since the
    // separator itself is not known yet.
    if let Some(rest) = directive.strip_prefix(DIRECTIVE_SEPARATOR) {
        if let Some(value) = rest.strip_prefix(' ') {
            let separator = unescape(value.trim());
            if separator.is_empty() {
                return Err(malformed(origin, line_no, "empty #separator"));
            }
            header.separator = separator;
            return Ok(());
        }
    }

    let mut parts = directive.split(header.separator.as_str());
    let name = parts.next().unwrap_or_default();
    let values: Vec<String> = parts.map(str::to_string).collect();

    match name {
        DIRECTIVE_FIELDS => {
            if values.is_empty() {
                return Err(malformed(origin, line_no, "#fields declares no columns"));
            }
            match columns {
                Some(existing) if *existing != values => {
                    return Err(malformed(
                        origin,
                        line_no,
                        "conflicting #fields declarations",
                    ));
                }
                Some(_) => {}
                None => *columns = Some(values),
            }
        }
        DIRECTIVE_TYPES => {
            if let Some(cols) = columns {
                if cols.len() != values.len() {
                    return Err(malformed(
                        origin,
                        line_no,
                        &format!("{} types declared for {} fields", values.len(), cols.len()),
                    ));
                }
            }
            *types = Some(values);
        }
        "set_separator" => header.set_separator = first_value(values, &header.set_separator),
        "empty_field" => header.empty_field = first_value(values, &header.empty_field),
        "unset_field" => header.unset_field = first_value(values, &header.unset_field),
        "path" => header.path = values.into_iter().next(),
        "open" => header.open = values.into_iter().next(),
        "close" => header.close = values.into_iter().next(),
        other => {
            tracing::trace!(path = origin, line = line_no, directive = other, "ignored directive");
        }
    }
    Ok(())
}

fn parse_row(line: &str, line_no: usize, width: usize, header: &LogHeader, origin: &str) -> Row {
    let mut row: Row = line
        .split(header.separator.as_str())
        .map(|token| Value::from_token(token, &header.unset_field))
        .collect();
    if row.len() > width {
        tracing::warn!(
            path = origin,
            line = line_no,
            expected = width,
            actual = row.len(),
            "dropping extra trailing values"
        );
        row.truncate(width);
    }
    row.resize(width, Value::Null);
    row
}

fn first_value(values: Vec<String>, current: &str) -> String {
    values
        .into_iter()
        .next()
        .unwrap_or_else(|| current.to_string())
}

fn malformed(origin: &str, line: usize, reason: &str) -> ExError {
    CompareError::MalformedHeader {
        path: origin.to_string(),
        line,
        reason: reason.to_string(),
    }
    .into()
}

/// Decode `\xHH` escapes. Anything that is not a complete escape is kept
/// literally.
fn unescape(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1] == b'x'
            && bytes[i + 2].is_ascii_hexdigit()
            && bytes[i + 3].is_ascii_hexdigit()
        {
            if let Some(b) = std::str::from_utf8(&bytes[i + 2..i + 4])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
            {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
