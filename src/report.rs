use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::encoding::TextEncoding;
use crate::error::{PipelineError, Result};

pub const NOUN_LIST_HEADER: &str = "======= Noun List =======";
pub const VOCAB_LIST_HEADER: &str = "==== Vocabulary List ====";
pub const INTERSECTION_HEADER: &str = "=== List Intersection ===";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeaders {
    pub nouns: String,
    pub vocabulary: String,
    pub intersection: String,
}

impl Default for ReportHeaders {
    fn default() -> Self {
        Self {
            nouns: NOUN_LIST_HEADER.to_string(),
            vocabulary: VOCAB_LIST_HEADER.to_string(),
            intersection: INTERSECTION_HEADER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub nouns: Vec<String>,
    pub vocabulary: Vec<String>,
    pub intersection: BTreeSet<String>,
}

impl Report {
    pub fn new(nouns: Vec<String>, vocabulary: Vec<String>) -> Self {
        let intersection = intersect(&nouns, &vocabulary);
        Self {
            nouns,
            vocabulary,
            intersection,
        }
    }
}

/// Exact membership intersection; no case folding or normalization.
pub fn intersect(left: &[String], right: &[String]) -> BTreeSet<String> {
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    left.iter()
        .filter(|item| right.contains(item.as_str()))
        .cloned()
        .collect()
}

pub fn write_report(
    path: &Path,
    encoding: TextEncoding,
    headers: &ReportHeaders,
    report: &Report,
) -> Result<()> {
    let to_write_error = |source: io::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    write_section(&mut writer, encoding, &headers.nouns, &report.nouns).map_err(to_write_error)?;
    write_section(&mut writer, encoding, &headers.vocabulary, &report.vocabulary)
        .map_err(to_write_error)?;
    write_section(
        &mut writer,
        encoding,
        &headers.intersection,
        &report.intersection,
    )
    .map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)?;

    info!(
        path = %path.display(),
        %encoding,
        nouns = report.nouns.len(),
        vocabulary = report.vocabulary.len(),
        intersection = report.intersection.len(),
        "wrote report"
    );
    Ok(())
}

fn write_section<'a, W, I>(
    writer: &mut W,
    encoding: TextEncoding,
    header: &str,
    items: I,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    writer.write_all(&encoding.encode(&format!("{header}\n"))?)?;
    for item in items {
        writer.write_all(&encoding.encode(&format!("{item}\n"))?)?;
    }
    Ok(())
}

/// Parses a report written by [`write_report`] with the same encoding and
/// headers.
pub fn read_report(path: &Path, encoding: TextEncoding, headers: &ReportHeaders) -> Result<Report> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = encoding.decode(&bytes, path)?;
    let malformed = |message: String| PipelineError::MalformedReport {
        path: path.to_path_buf(),
        message,
    };

    let body = text
        .strip_suffix('\n')
        .ok_or_else(|| malformed("missing trailing newline".to_string()))?;
    let mut lines = body.split('\n');

    let mut report = Report::default();
    match lines.next() {
        Some(line) if line == headers.nouns => {}
        other => return Err(malformed(format!("expected noun header, found {other:?}"))),
    }

    let mut section = 0;
    for line in lines {
        if section == 0 && line == headers.vocabulary {
            section = 1;
            continue;
        }
        if section == 1 && line == headers.intersection {
            section = 2;
            continue;
        }
        match section {
            0 => report.nouns.push(line.to_string()),
            1 => report.vocabulary.push(line.to_string()),
            _ => {
                report.intersection.insert(line.to_string());
            }
        }
    }

    if section != 2 {
        return Err(malformed("missing vocabulary or intersection header".to_string()));
    }
    Ok(report)
}
