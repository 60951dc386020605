use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

static UNSAFE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Save one downloaded schedule file under
/// `<root>/<transliterated institute>/<index>.<ext>` and return the path.
pub fn save_file(
    root: &Path,
    institute: &str,
    index: usize,
    extension: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    let dir = root.join(directory_name(institute));
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let path = dir.join(format!("{}.{}", index, extension));
    fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

/// Filesystem-safe directory name for an institute: Cyrillic is
/// transliterated, everything else non-portable collapses to `_`.
pub fn directory_name(institute: &str) -> String {
    let latin = transliterate(institute);
    let safe = UNSAFE_CHARS_RE.replace_all(&latin, "_");
    safe.trim_matches('_').to_string()
}

/// GOST-style Russian-to-Latin transliteration. Characters outside the
/// table pass through unchanged.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match romanize(ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}

fn romanize(ch: char) -> Option<&'static str> {
    let lower = match ch.to_lowercase().next().unwrap_or(ch) {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    if ch.is_uppercase() && !lower.is_empty() {
        return Some(capitalized(lower));
    }
    Some(lower)
}

fn capitalized(s: &'static str) -> &'static str {
    match s {
        "a" => "A",
        "b" => "B",
        "v" => "V",
        "g" => "G",
        "d" => "D",
        "e" => "E",
        "yo" => "Yo",
        "zh" => "Zh",
        "z" => "Z",
        "i" => "I",
        "y" => "Y",
        "k" => "K",
        "l" => "L",
        "m" => "M",
        "n" => "N",
        "o" => "O",
        "p" => "P",
        "r" => "R",
        "s" => "S",
        "t" => "T",
        "u" => "U",
        "f" => "F",
        "h" => "H",
        "ts" => "Ts",
        "ch" => "Ch",
        "sh" => "Sh",
        "shch" => "Shch",
        "yu" => "Yu",
        "ya" => "Ya",
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_institute_name() {
        assert_eq!(
            transliterate("Морской институт"),
            "Morskoy institut"
        );
    }

    #[test]
    fn directory_name_is_filesystem_safe() {
        let name = directory_name("Институт информационных технологий");
        assert_eq!(name, "Institut_informatsionnyh_tehnologiy");
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || "._-".contains(c)));
    }

    #[test]
    fn save_file_writes_under_institute_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = save_file(tmp.path(), "Морской институт", 0, "xls", b"data").unwrap();
        assert!(path.ends_with("Morskoy_institut/0.xls"));
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }
}
