use std::borrow::Cow;

use crate::error::ValidationError;

pub const DEFAULT_DELIMITER: char = ',';

/// Delimiters considered when guessing the separator of an uploaded file.
pub const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// A delimited file picked by the user for a file-to-database transfer.
///
/// The raw bytes are kept untouched because the transfer re-sends the whole
/// original file; only the header line is interpreted, to offer its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
    delimiter: char,
    columns: Vec<String>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, delimiter: char) -> Self {
        let columns = {
            let text = String::from_utf8_lossy(&bytes);
            split_header(header_line(&text), delimiter)
        };
        Self {
            file_name: file_name.into(),
            bytes,
            delimiter,
            columns,
        }
    }

    /// Builds the file guessing its delimiter from the header line.
    pub fn detect(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let delimiter = {
            let text = String::from_utf8_lossy(&bytes);
            detect_delimiter(header_line(&text))
        };
        Self::new(file_name, bytes, delimiter)
    }

    /// Re-reads the header with another delimiter. The content is unchanged.
    pub fn with_delimiter(&self, delimiter: char) -> Self {
        Self::new(self.file_name.clone(), self.bytes.clone(), delimiter)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Header columns, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|b| b.is_ascii_whitespace())
    }
}

/// First line of `text`, without the line terminator or a leading BOM.
pub fn header_line(text: &str) -> &str {
    text.trim_start_matches('\u{feff}')
        .lines()
        .next()
        .unwrap_or("")
}

/// Splits a header line into column names.
///
/// Cells are trimmed and unquoted; empty cells are skipped since they cannot be
/// mapped onto a table column.
pub fn split_header(line: &str, delimiter: char) -> Vec<String> {
    split_line(line, delimiter)
        .into_iter()
        .map(|cell| strip_single_quotes(&cell))
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Splits one delimited line into trimmed cells.
///
/// Double quotes group a cell, so a quoted delimiter stays inside its cell; a
/// doubled quote inside a quoted cell is a literal `"`.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }

    cells.push(current.trim().to_string());
    cells
}

fn strip_single_quotes(cell: &str) -> String {
    cell.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(cell)
        .trim()
        .to_string()
}

/// Picks the candidate delimiter that occurs most often in `header`.
///
/// Ties go to the earlier candidate; a header without any candidate falls back
/// to [`DEFAULT_DELIMITER`].
pub fn detect_delimiter(header: &str) -> char {
    let (best, count) = CANDIDATE_DELIMITERS
        .iter()
        .map(|&d| (d, header.matches(d).count()))
        .fold((DEFAULT_DELIMITER, 0), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        });
    if count == 0 { DEFAULT_DELIMITER } else { best }
}

/// Parses the delimiter input. Accepts a single character, or `\t` / `tab`.
pub fn parse_delimiter(input: &str) -> Result<char, ValidationError> {
    match input {
        "\\t" | "tab" | "TAB" => return Ok('\t'),
        _ => {}
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' && c != '\r' => Ok(c),
        _ => Err(ValidationError::InvalidDelimiter),
    }
}

/// Inverse of [`parse_delimiter`], for showing the delimiter in an input.
pub fn display_delimiter(delimiter: char) -> String {
    if delimiter == '\t' {
        "\\t".to_string()
    } else {
        delimiter.to_string()
    }
}
