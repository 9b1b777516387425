use std::path::PathBuf;

use crate::report::Report;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub documents: usize,
    pub nouns: usize,
    pub distinct_nouns: usize,
    pub vocabulary: usize,
    pub intersection: usize,
}

pub fn build_summary(output_path: PathBuf, documents: usize, report: &Report) -> RunSummary {
    let mut distinct: Vec<&String> = report.nouns.iter().collect();
    distinct.sort();
    distinct.dedup();

    RunSummary {
        output_path,
        documents,
        nouns: report.nouns.len(),
        distinct_nouns: distinct.len(),
        vocabulary: report.vocabulary.len(),
        intersection: report.intersection.len(),
    }
}

pub fn summarize(summary: &RunSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Report: {}\n", summary.output_path.display()));
    output.push_str(&format!("Documents processed: {}\n", summary.documents));
    output.push_str(&format!(
        "Nouns: {} ({} distinct)\n",
        summary.nouns, summary.distinct_nouns
    ));
    output.push_str(&format!("Vocabulary terms: {}\n", summary.vocabulary));
    output.push_str(&format!("Shared terms: {}\n", summary.intersection));
    output.trim_end().to_string()
}
