//! TF-IDF vectorization over a pluggable segmenter.
//!
//! Defaults follow the common reference behavior: documents are lowercased
//! before tokenizing, every token becomes a feature, features are sorted and
//! IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::segmenter::Segmenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorizerOptions {
    pub lowercase: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

pub struct TfidfVectorizer<S> {
    segmenter: S,
    options: VectorizerOptions,
    features: Vec<String>,
    idf: Vec<f64>,
}

impl<S: Segmenter> TfidfVectorizer<S> {
    pub fn new(segmenter: S) -> Self {
        Self::with_options(segmenter, VectorizerOptions::default())
    }

    pub fn with_options(segmenter: S, options: VectorizerOptions) -> Self {
        Self {
            segmenter,
            options,
            features: Vec::new(),
            idf: Vec::new(),
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.features
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        if self.options.lowercase {
            self.segmenter.segment(&text.to_lowercase())
        } else {
            self.segmenter.segment(text)
        }
    }

    /// Learns the vocabulary and IDF weights from `documents`.
    pub fn fit<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut n_docs = 0usize;
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for document in documents {
            let text = document?;
            let terms: HashSet<String> = self.tokenize(&text).into_iter().collect();
            debug!(terms = terms.len(), "tokenized document");
            for term in terms {
                *document_frequency.entry(term).or_default() += 1;
            }
            n_docs += 1;
        }

        if document_frequency.is_empty() {
            return Err(PipelineError::Vectorization(format!(
                "empty vocabulary after {n_docs} document(s)"
            )));
        }

        let (features, idf): (Vec<String>, Vec<f64>) = document_frequency
            .into_iter()
            .map(|(term, df)| {
                let idf = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term, idf)
            })
            .unzip();
        self.features = features;
        self.idf = idf;
        Ok(())
    }
}
