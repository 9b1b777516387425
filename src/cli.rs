use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::analyzer::PosIdRange;
use crate::config::{
    DEFAULT_INPUT_DIRECTORY, DEFAULT_INPUT_ENCODING, DEFAULT_OUTPUT_ENCODING, DEFAULT_OUTPUT_PATH,
};

/// Single-dash two-letter flags accepted alongside their long forms.
const SHORT_FLAGS: &[(&str, &str)] = &[
    ("-ie", "--input_encoding"),
    ("-oe", "--output_encoding"),
    ("-op", "--output_path"),
    ("-id", "--input_directory"),
];

/// Long flags whose next argument is a value, never a flag.
const VALUE_FLAGS: &[&str] = &[
    "--input_encoding",
    "--output_encoding",
    "--output_path",
    "--input_directory",
    "--mecab-bin",
    "--mecab-dicdir",
    "--mecab-input-buffer-size",
    "--noun-pos-range",
];

#[derive(Parser, Debug)]
#[command(name = "kotoba-intersect")]
#[command(
    about = "Intersect MeCab nouns with a Japanese TF-IDF vocabulary",
    long_about = None
)]
pub struct Cli {
    /// Input encoding (-ie).
    #[arg(long = "input_encoding", value_name = "INPUT_ENCODING", default_value = DEFAULT_INPUT_ENCODING)]
    pub input_encoding: String,
    /// Output encoding (-oe).
    #[arg(long = "output_encoding", value_name = "OUTPUT_ENCODING", default_value = DEFAULT_OUTPUT_ENCODING)]
    pub output_encoding: String,
    /// Output file destination (-op).
    #[arg(long = "output_path", value_name = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,
    /// Folder containing the files that make up the corpus (-id).
    #[arg(long = "input_directory", value_name = "INPUT_DIRECTORY", default_value = DEFAULT_INPUT_DIRECTORY)]
    pub input_directory: PathBuf,
    /// Path to the mecab binary (falls back to MECAB_BIN, then PATH).
    #[arg(long)]
    pub mecab_bin: Option<PathBuf>,
    /// MeCab dictionary directory.
    #[arg(long)]
    pub mecab_dicdir: Option<PathBuf>,
    /// MeCab input buffer size in bytes.
    #[arg(long)]
    pub mecab_input_buffer_size: Option<usize>,
    /// Part-of-speech ids counted as nouns, as START:END (end exclusive).
    #[arg(long, default_value_t = PosIdRange::default())]
    pub noun_pos_range: PosIdRange,
    /// Keep letter case before segmenting for the vocabulary.
    #[arg(long)]
    pub no_lowercase: bool,
    /// Log every stage at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rewrites `-ie VALUE` and `-ie=VALUE` style flags to their long forms so
/// clap can parse them. Option values and everything after `--` pass through
/// untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut expects_value = false;

    while let Some(arg) = args.next() {
        if expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            normalized.push(arg);
            normalized.extend(args.by_ref());
            break;
        }
        let arg = rewrite_short_flag(arg);
        expects_value = arg.to_str().is_some_and(|text| VALUE_FLAGS.contains(&text));
        normalized.push(arg);
    }
    normalized
}

fn rewrite_short_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    for (short, long) in SHORT_FLAGS {
        if text == *short {
            return OsString::from(*long);
        }
        if let Some(value) = text
            .strip_prefix(short)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return OsString::from(format!("{long}={value}"));
        }
    }
    arg
}
