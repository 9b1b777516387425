use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{PipelineError, Result};

pub const MECAB_BIN_ENV: &str = "MECAB_BIN";

/// Node format handed to MeCab: one `surface<TAB>posid` line per morpheme,
/// unknown words included, `EOS` after every input line.
const NODE_FORMAT: &str = "--node-format=%m\\t%h\\n";
const UNK_FORMAT: &str = "--unk-format=%m\\t%h\\n";
const BOS_FORMAT: &str = "--bos-format=";
const EOS_FORMAT: &str = "--eos-format=EOS\\n";

pub fn resolve_mecab_bin(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env::var_os(MECAB_BIN_ENV) {
        return Ok(PathBuf::from(path));
    }

    which::which("mecab").map_err(|err| {
        PipelineError::analyzer(format!("mecab not found on PATH ({err})"))
    })
}

#[derive(Debug, Clone, Default)]
pub struct MecabOptions {
    pub dicdir: Option<PathBuf>,
    pub input_buffer_size: Option<usize>,
}

/// Runs `mecab -v` and returns the reported version line.
pub fn run_mecab_version(bin: &Path) -> Result<String> {
    let output = Command::new(bin)
        .arg("-v")
        .stdin(Stdio::null())
        .output()
        .map_err(|err| {
            PipelineError::analyzer_io(format!("failed to spawn mecab at {}", bin.display()), err)
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::analyzer(format!(
            "mecab -v failed (status {}):\n{}",
            output.status,
            tail_lines(&stderr, 20)
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Runs MeCab over the contents of `input` and returns its raw stdout.
pub fn run_mecab_parse(bin: &Path, options: &MecabOptions, input: &Path) -> Result<String> {
    let stdin = File::open(input).map_err(|err| {
        PipelineError::analyzer_io(format!("failed to open {}", input.display()), err)
    })?;

    let mut command = Command::new(bin);
    command
        .arg(NODE_FORMAT)
        .arg(UNK_FORMAT)
        .arg(BOS_FORMAT)
        .arg(EOS_FORMAT);
    if let Some(dicdir) = options.dicdir.as_ref() {
        command.arg("-d").arg(dicdir);
    }
    if let Some(size) = options.input_buffer_size {
        command.arg("-b").arg(size.to_string());
    }
    command.stdin(Stdio::from(stdin));

    debug!(bin = %bin.display(), ?options, "running mecab");

    let output = command.output().map_err(|err| {
        PipelineError::analyzer_io(format!("failed to spawn mecab at {}", bin.display()), err)
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::analyzer(format!(
            "mecab failed (status {}):\n{}",
            output.status,
            tail_lines(&stderr, 20)
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| PipelineError::analyzer("mecab output is not valid UTF-8"))
}

fn tail_lines(input: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = input.lines().collect();
    if lines.len() <= max_lines {
        return input.trim_end().to_string();
    }
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
