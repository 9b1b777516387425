//! Morphological analysis and noun extraction.
//!
//! MeCab runs as an external process. A [`MecabSession`] owns the resolved
//! binary and a private scratch directory; the directory is released by
//! [`MecabSession::close`] or, on any other exit path, by `Drop`.

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::tools::{MecabOptions, resolve_mecab_bin, run_mecab_parse, run_mecab_version};

/// Noun ids (名詞,*) in the `pos-id.def` shipped with MeCab's IPADIC.
pub const IPADIC_NOUN_POS_IDS: PosIdRange = PosIdRange { start: 36, end: 68 };

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    pub pos_id: u16,
}

/// Closed-open range of part-of-speech ids treated as nouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosIdRange {
    pub start: u16,
    pub end: u16,
}

impl PosIdRange {
    pub fn contains(&self, pos_id: u16) -> bool {
        (self.start..self.end).contains(&pos_id)
    }
}

impl Default for PosIdRange {
    fn default() -> Self {
        IPADIC_NOUN_POS_IDS
    }
}

impl From<Range<u16>> for PosIdRange {
    fn from(range: Range<u16>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl fmt::Display for PosIdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for PosIdRange {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let (start, end) = value
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got {value:?}"))?;
        let start: u16 = start
            .trim()
            .parse()
            .map_err(|err| format!("invalid range start {start:?}: {err}"))?;
        let end: u16 = end
            .trim()
            .parse()
            .map_err(|err| format!("invalid range end {end:?}: {err}"))?;
        if start >= end {
            return Err(format!("empty range {start}:{end}"));
        }
        Ok(Self { start, end })
    }
}

pub trait MorphologicalAnalyzer {
    fn parse(&mut self, text: &str) -> Result<Vec<Morpheme>>;
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub mecab_bin: Option<PathBuf>,
    pub options: MecabOptions,
    pub noun_pos_ids: PosIdRange,
}

pub struct MecabSession {
    bin: PathBuf,
    options: MecabOptions,
    scratch: Option<TempDir>,
}

impl MecabSession {
    pub fn open(config: &AnalyzerConfig) -> Result<Self> {
        let bin = resolve_mecab_bin(config.mecab_bin.as_deref())?;
        let version = run_mecab_version(&bin)?;
        let scratch = tempfile::Builder::new()
            .prefix("kotoba-mecab-")
            .tempdir()
            .map_err(|err| PipelineError::analyzer_io("failed to create mecab scratch dir", err))?;

        info!(bin = %bin.display(), %version, "mecab session opened");
        Ok(Self {
            bin,
            options: config.options.clone(),
            scratch: Some(scratch),
        })
    }

    fn scratch_dir(&self) -> Result<&Path> {
        self.scratch
            .as_ref()
            .map(TempDir::path)
            .ok_or_else(|| PipelineError::analyzer("mecab session already closed"))
    }

    /// Releases the scratch directory and reports any failure doing so.
    pub fn close(mut self) -> Result<()> {
        match self.scratch.take() {
            Some(scratch) => scratch
                .close()
                .map_err(|err| PipelineError::analyzer_io("failed to release mecab session", err)),
            None => Ok(()),
        }
    }
}

impl MorphologicalAnalyzer for MecabSession {
    fn parse(&mut self, text: &str) -> Result<Vec<Morpheme>> {
        let input = self.scratch_dir()?.join("document.txt");
        fs::write(&input, text).map_err(|err| {
            PipelineError::analyzer_io(format!("failed to stage {}", input.display()), err)
        })?;
        let output = run_mecab_parse(&self.bin, &self.options, &input)?;
        parse_mecab_output(&output)
    }
}

impl Drop for MecabSession {
    fn drop(&mut self) {
        if self.scratch.take().is_some() {
            debug!("mecab session released on drop");
        }
    }
}

/// Opens a session, hands it to `f`, and releases it before returning,
/// whether `f` succeeded or not.
pub fn with_session<T, F>(config: &AnalyzerConfig, f: F) -> Result<T>
where
    F: FnOnce(&mut MecabSession) -> Result<T>,
{
    let mut session = MecabSession::open(config)?;
    let result = f(&mut session);
    let closed = session.close();
    let value = result?;
    closed?;
    Ok(value)
}

pub fn parse_mecab_output(output: &str) -> Result<Vec<Morpheme>> {
    let mut morphemes = Vec::new();
    for line in output.lines() {
        if line.is_empty() || line == "EOS" {
            continue;
        }
        let (surface, pos_id) = line
            .rsplit_once('\t')
            .ok_or_else(|| PipelineError::analyzer(format!("unexpected mecab line {line:?}")))?;
        let pos_id = pos_id.trim().parse::<u16>().map_err(|err| {
            PipelineError::analyzer(format!("invalid pos id in mecab line {line:?}: {err}"))
        })?;
        morphemes.push(Morpheme {
            surface: surface.to_string(),
            pos_id,
        });
    }
    Ok(morphemes)
}

/// Noun surfaces of every document, in corpus order, repeats kept.
pub fn extract_nouns<A, I>(analyzer: &mut A, documents: I, nouns: PosIdRange) -> Result<Vec<String>>
where
    A: MorphologicalAnalyzer + ?Sized,
    I: IntoIterator<Item = Result<String>>,
{
    let mut noun_list = Vec::new();
    for document in documents {
        let text = document?;
        let before = noun_list.len();
        noun_list.extend(
            analyzer
                .parse(&text)?
                .into_iter()
                .filter(|morpheme| nouns.contains(morpheme.pos_id))
                .map(|morpheme| morpheme.surface),
        );
        debug!(nouns = noun_list.len() - before, "analyzed document");
    }
    Ok(noun_list)
}
