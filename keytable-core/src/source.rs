use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

/// Read a `code,name` mapping from a CSV file.
pub fn read_mapping(path: &Path) -> Result<Vec<(u32, String)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let rows = parse_mapping(&text).with_context(|| format!("In {}", path.display()))?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse `code,name` rows. Blank lines and `#` comments are skipped.
pub fn parse_mapping(text: &str) -> Result<Vec<(u32, String)>> {
    let mut rows = Vec::new();

    for (n, line) in text.lines().enumerate() {
        let lineno = n + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let (code, name) = line
            .split_once(',')
            .ok_or_else(|| anyhow!("line {}: expected `code,name`", lineno))?;
        let code = parse_code(code.trim())
            .ok_or_else(|| anyhow!("line {}: invalid key code {:?}", lineno, code.trim()))?;
        let name = name.trim();
        if name.is_empty() {
            bail!("line {}: missing name for code {}", lineno, code);
        }

        rows.push((code, name.to_string()));
    }

    Ok(rows)
}

/// Parse a decimal or `0x` hexadecimal key code.
pub fn parse_code(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows() {
        let rows = parse_mapping("# scancodes\n0x1D,Left Control\n\n42, Left Shift \r\n").unwrap();
        assert_eq!(
            rows,
            vec![
                (0x1d, "Left Control".to_string()),
                (42, "Left Shift".to_string())
            ]
        );
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_mapping("1,A\nnope\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected `code,name`");

        let err = parse_mapping("1,A\n2,B\n-3,C\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3: invalid key code \"-3\"");

        let err = parse_mapping("7,\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: missing name for code 7");
    }

    #[test]
    fn codes() {
        assert_eq!(parse_code("0x9D"), Some(157));
        assert_eq!(parse_code("0Xff"), Some(255));
        assert_eq!(parse_code("221"), Some(221));
        assert_eq!(parse_code("0x"), None);
        assert_eq!(parse_code("F1"), None);
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.csv");
        fs::write(&path, "0x01,Escape\n").unwrap();
        assert_eq!(read_mapping(&path).unwrap(), vec![(1, "Escape".to_string())]);
        assert!(read_mapping(&dir.path().join("missing.csv")).is_err());
    }
}
