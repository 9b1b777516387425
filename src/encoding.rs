use std::fmt;
use std::io;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::PipelineError;

/// Python codec names that have no WHATWG label of their own.
const ALIASES: &[(&str, &str)] = &[
    ("cp932", "windows-31j"),
    ("ms932", "windows-31j"),
    ("mskanji", "windows-31j"),
    ("shift-jis", "shift_jis"),
    ("s_jis", "shift_jis"),
    ("eucjp", "euc-jp"),
    ("ujis", "euc-jp"),
    ("iso2022jp", "iso-2022-jp"),
];

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    inner: &'static Encoding,
}

impl TextEncoding {
    pub fn utf_8() -> Self {
        Self { inner: UTF_8 }
    }

    pub fn for_label(label: &str) -> Result<Self, PipelineError> {
        let trimmed = label.trim().to_ascii_lowercase();
        let dashed = trimmed.replace('_', "-");
        let aliased = ALIASES
            .iter()
            .find(|(alias, _)| *alias == trimmed || *alias == dashed)
            .map(|(_, target)| *target);

        [Some(trimmed.as_str()), Some(dashed.as_str()), aliased]
            .into_iter()
            .flatten()
            .find_map(|candidate| Encoding::for_label(candidate.as_bytes()))
            .map(|inner| TextEncoding { inner })
            .ok_or_else(|| PipelineError::UnknownEncoding(label.to_string()))
    }

    /// Encodings that `encoding_rs` can only decode (UTF-16, replacement)
    /// are refused for output.
    pub fn for_output_label(label: &str) -> Result<Self, PipelineError> {
        let encoding = Self::for_label(label)?;
        if encoding.inner.output_encoding() != encoding.inner {
            return Err(PipelineError::UnknownEncoding(format!(
                "{label} (cannot encode to {})",
                encoding.name()
            )));
        }
        Ok(encoding)
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Strict decode: a byte-order mark is kept as text and any malformed
    /// sequence fails the whole document.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String, PipelineError> {
        self.inner
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| PipelineError::Decoding {
                path: path.to_path_buf(),
                encoding: self.name(),
            })
    }

    pub fn encode(&self, text: &str) -> io::Result<Vec<u8>> {
        let (bytes, _, unmappable) = self.inner.encode(text);
        if unmappable {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{text:?} cannot be encoded as {}", self.name()),
            ));
        }
        Ok(bytes.into_owned())
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf_8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_python_style_labels() {
        assert_eq!(TextEncoding::for_label("utf-8").unwrap().name(), "UTF-8");
        assert_eq!(TextEncoding::for_label("UTF_8").unwrap().name(), "UTF-8");
        assert_eq!(TextEncoding::for_label("euc_jp").unwrap().name(), "EUC-JP");
        assert_eq!(
            TextEncoding::for_label("cp932").unwrap().name(),
            "Shift_JIS"
        );
    }

    #[test]
    fn rejects_unknown_label() {
        let err = TextEncoding::for_label("klingon").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownEncoding(_)));
    }

    #[test]
    fn refuses_decode_only_output_encodings() {
        assert!(TextEncoding::for_label("utf-16le").is_ok());
        assert!(TextEncoding::for_output_label("utf-16le").is_err());
    }

    #[test]
    fn strict_decode_rejects_malformed_bytes() {
        let err = TextEncoding::utf_8()
            .decode(&[0xe7, 0x8c], Path::new("bad.txt"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decoding { .. }));
    }

    #[test]
    fn shift_jis_encode_and_decode() {
        let sjis = TextEncoding::for_label("shift_jis").unwrap();
        let bytes = sjis.encode("猫").unwrap();
        assert_eq!(bytes, vec![0x94, 0x4c]);
        assert_eq!(sjis.decode(&bytes, Path::new("x")).unwrap(), "猫");
    }

    #[test]
    fn encode_fails_on_unmappable_text() {
        let sjis = TextEncoding::for_label("shift_jis").unwrap();
        assert!(sjis.encode("😺").is_err());
    }
}
