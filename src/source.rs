use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read the 1-based `line` of `path`, trimmed of surrounding whitespace.
///
/// Returns `None` when the file can't be opened or has fewer lines. The file is
/// scanned sequentially and never loaded whole.
pub fn lookup(path: impl AsRef<Path>, line: u32) -> Option<String> {
    if line == 0 {
        return None;
    }
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "source file unavailable");
            return None;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut current = 0u32;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "failed reading source file");
                return None;
            }
        }
        current += 1;
        if current == line {
            return Some(String::from_utf8_lossy(&buf).trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn source_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".php")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn returns_trimmed_line() {
        let file = source_file("<?php\n\n    $this->assertEquals(4, $sum);  \r\n}\n");
        assert_eq!(
            lookup(file.path(), 3).as_deref(),
            Some("$this->assertEquals(4, $sum);")
        );
    }

    #[test]
    fn last_line_without_newline() {
        let file = source_file("first\n\tsecond");
        assert_eq!(lookup(file.path(), 2).as_deref(), Some("second"));
    }

    #[test]
    fn past_eof_is_absent() {
        let file = source_file("one\ntwo\n");
        assert_eq!(lookup(file.path(), 3), None);
        assert_eq!(lookup(file.path(), 0), None);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(lookup(dir.path().join("Nope.php"), 1), None);
    }

    #[test]
    fn repeated_lookups_agree() {
        let file = source_file("a\nb\nc\n");
        assert_eq!(lookup(file.path(), 2), lookup(file.path(), 2));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff bad\n").unwrap();
        assert_eq!(lookup(file.path(), 2).as_deref(), Some("\u{fffd} bad"));
    }
}
