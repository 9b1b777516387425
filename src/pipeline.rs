use tracing::info;

use crate::analyzer::{MorphologicalAnalyzer, extract_nouns, with_session};
use crate::config::PipelineConfig;
use crate::corpus::{Corpus, resolve_corpus};
use crate::diagnostics::{RunSummary, build_summary, summarize};
use crate::error::Result;
use crate::report::{Report, write_report};
use crate::segmenter::{ScriptSegmenter, Segmenter};
use crate::vectorizer::TfidfVectorizer;
use crate::vocabulary::extract_vocabulary;

/// Runs the full pipeline with MeCab and the script-run segmenter.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let corpus = load_corpus(config)?;
    let nouns = with_session(&config.analyzer, |session| {
        extract_nouns(
            session,
            corpus.documents(config.input_encoding),
            config.analyzer.noun_pos_ids,
        )
    })?;
    info!(nouns = nouns.len(), "extracted nouns");
    finish(config, &corpus, nouns, ScriptSegmenter)
}

/// Same as [`run`] with caller-supplied analyzer and segmenter.
pub fn run_with<A, S>(config: &PipelineConfig, analyzer: &mut A, segmenter: S) -> Result<RunSummary>
where
    A: MorphologicalAnalyzer + ?Sized,
    S: Segmenter,
{
    let corpus = load_corpus(config)?;
    let nouns = extract_nouns(
        analyzer,
        corpus.documents(config.input_encoding),
        config.analyzer.noun_pos_ids,
    )?;
    info!(nouns = nouns.len(), "extracted nouns");
    finish(config, &corpus, nouns, segmenter)
}

fn load_corpus(config: &PipelineConfig) -> Result<Corpus> {
    let corpus = resolve_corpus(&config.input_directory)?;
    info!(
        dir = %config.input_directory.display(),
        files = corpus.len(),
        encoding = %config.input_encoding,
        "resolved corpus"
    );
    Ok(corpus)
}

fn finish<S: Segmenter>(
    config: &PipelineConfig,
    corpus: &Corpus,
    nouns: Vec<String>,
    segmenter: S,
) -> Result<RunSummary> {
    let mut vectorizer = TfidfVectorizer::with_options(segmenter, config.vectorizer);
    let vocabulary = extract_vocabulary(corpus, config.input_encoding, &mut vectorizer)?;

    let report = Report::new(nouns, vocabulary);
    write_report(
        &config.output_path,
        config.output_encoding,
        &config.headers,
        &report,
    )?;

    let summary = build_summary(config.output_path.clone(), corpus.len(), &report);
    info!("{}", summarize(&summary));
    Ok(summary)
}
