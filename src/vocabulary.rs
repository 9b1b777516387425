use std::collections::HashSet;

use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::segmenter::Segmenter;
use crate::vectorizer::TfidfVectorizer;

/// Fits `vectorizer` once over a fresh pass of the corpus and returns its
/// learned features, trimmed, with empty and repeated terms dropped.
pub fn extract_vocabulary<S: Segmenter>(
    corpus: &Corpus,
    encoding: TextEncoding,
    vectorizer: &mut TfidfVectorizer<S>,
) -> Result<Vec<String>> {
    vectorizer.fit(corpus.documents(encoding))?;
    let vocabulary = clean_features(vectorizer.feature_names());
    if let Some((term, idf)) = vectorizer
        .feature_names()
        .iter()
        .zip(vectorizer.idf())
        .min_by(|a, b| a.1.total_cmp(b.1))
    {
        debug!(%term, idf, "most widespread term");
    }
    info!(
        features = vectorizer.feature_names().len(),
        terms = vocabulary.len(),
        "learned vocabulary"
    );
    Ok(vocabulary)
}

pub fn clean_features(features: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    features
        .iter()
        .map(|feature| feature.trim())
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(*term))
        .map(str::to_string)
        .collect()
}
