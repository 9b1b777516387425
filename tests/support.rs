use std::fs;
use std::path::{Path, PathBuf};

/// Stands in for MeCab: answers `-v`, and emits `surface<TAB>posid` lines
/// followed by `EOS` for a few known sentences.
const FAKE_MECAB: &str = r#"#!/usr/bin/env bash
set -euo pipefail
if [[ "${1:-}" == "-v" ]]; then
  echo "mecab of 0.996 (fake)"
  exit 0
fi
while IFS= read -r line || [[ -n "$line" ]]; do
  case "$line" in
    "猫が好きです")
      printf '猫\t38\nが\t13\n好き\t40\nです\t25\n'
      ;;
    "犬と猫")
      printf '犬\t38\nと\t13\n猫\t38\n'
      ;;
    "です")
      printf 'です\t25\n'
      ;;
    *)
      ;;
  esac
  printf 'EOS\n'
done
"#;

const BROKEN_MECAB: &str = r#"#!/usr/bin/env bash
if [[ "${1:-}" == "-v" ]]; then
  echo "mecab of 0.996 (fake)"
  exit 0
fi
cat > /dev/null
echo "param.cpp(69) [ifs] no such file or directory: /nowhere/dicrc" >&2
exit 1
"#;

fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }
    path
}

pub fn create_fake_mecab(dir: &Path) -> PathBuf {
    write_script(dir, "mecab", FAKE_MECAB)
}

pub fn create_broken_mecab(dir: &Path) -> PathBuf {
    write_script(dir, "mecab-broken", BROKEN_MECAB)
}

pub fn write_corpus_file(dir: &Path, name: &str, contents: &[u8]) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

pub fn scratch_entries(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect()
}
