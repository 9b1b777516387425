use std::path::PathBuf;

use crate::analyzer::AnalyzerConfig;
use crate::cli::Cli;
use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::report::ReportHeaders;
use crate::tools::MecabOptions;
use crate::vectorizer::VectorizerOptions;

pub const DEFAULT_INPUT_ENCODING: &str = "utf-8";
pub const DEFAULT_OUTPUT_ENCODING: &str = "utf-8";
pub const DEFAULT_OUTPUT_PATH: &str = "sample_output.txt";
pub const DEFAULT_INPUT_DIRECTORY: &str = "sample_input";

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_directory: PathBuf,
    pub input_encoding: TextEncoding,
    pub output_encoding: TextEncoding,
    pub output_path: PathBuf,
    pub analyzer: AnalyzerConfig,
    pub vectorizer: VectorizerOptions,
    pub headers: ReportHeaders,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from(DEFAULT_INPUT_DIRECTORY),
            input_encoding: TextEncoding::utf_8(),
            output_encoding: TextEncoding::utf_8(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            analyzer: AnalyzerConfig::default(),
            vectorizer: VectorizerOptions::default(),
            headers: ReportHeaders::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            input_directory: cli.input_directory.clone(),
            input_encoding: TextEncoding::for_label(&cli.input_encoding)?,
            output_encoding: TextEncoding::for_output_label(&cli.output_encoding)?,
            output_path: cli.output_path.clone(),
            analyzer: AnalyzerConfig {
                mecab_bin: cli.mecab_bin.clone(),
                options: MecabOptions {
                    dicdir: cli.mecab_dicdir.clone(),
                    input_buffer_size: cli.mecab_input_buffer_size,
                },
                noun_pos_ids: cli.noun_pos_range,
            },
            vectorizer: VectorizerOptions {
                lowercase: !cli.no_lowercase,
            },
            headers: ReportHeaders::default(),
        })
    }
}
