use std::fmt::{Display, Write as _};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::builder::NameMap;
use crate::config::CodegenConfig;

/// Format `data` as a Rust byte-string literal spread over several lines.
///
/// Lines are joined with `\`-newline continuations, so every continuation
/// line starts with `indent` and a leading space in the data is escaped.
pub fn format_data(data: &[u8], indent: &str, width: usize) -> String {
    let line_width = width.saturating_sub(indent.len() + 1).max(4);
    let mut out = String::from("b\"\\\n");
    out.push_str(indent);
    let mut rem = line_width;

    for &c in data {
        let mut piece = escape_byte(c);
        if rem < piece.len() {
            out.push_str("\\\n");
            out.push_str(indent);
            rem = line_width;
        }
        if c == b' ' && rem == line_width {
            piece = "\\x20".to_string();
        }
        out.push_str(&piece);
        rem -= piece.len();
    }

    out.push('"');
    out
}

fn escape_byte(c: u8) -> String {
    match c {
        b'\\' => "\\\\".to_string(),
        b'"' => "\\\"".to_string(),
        0 => "\\0".to_string(),
        32..=126 => (c as char).to_string(),
        _ => format!("\\x{:02x}", c),
    }
}

/// Format `numbers` as comma-terminated values, wrapping before `width`.
///
/// Every line, including the first, starts with `indent`. There is no final
/// newline.
pub fn format_numbers<N: Display>(numbers: &[N], indent: &str, width: usize) -> String {
    let line_width = width.saturating_sub(indent.len());
    let mut out = String::from(indent);
    let mut rem = line_width;

    for n in numbers {
        let item = format!("{},", n);
        if rem < item.len() && rem != line_width {
            out.push('\n');
            out.push_str(indent);
            rem = line_width;
        }
        out.push_str(&item);
        rem = rem.saturating_sub(item.len());
    }

    out
}

/// Emit a Rust module defining the table for `map` and its accessor `fname`.
pub fn make_namemap(map: &NameMap, fname: &str, config: &CodegenConfig) -> Result<String> {
    if !is_identifier(fname) {
        bail!("Invalid function name: {:?}", fname);
    }
    let lname = fname.to_lowercase();
    let uname = fname.to_uppercase();
    let otype = map.offset_width();

    let mut out = String::new();
    writeln!(out, "// This file is automatically generated. Do not edit.")?;
    writeln!(out)?;
    writeln!(out, "use {}::SparseStringTable;", config.table_path)?;
    writeln!(out)?;
    writeln!(
        out,
        "const {}_DATA: &[u8] = {};",
        uname,
        format_data(map.data(), &config.indent, config.line_width)
    )?;
    writeln!(out)?;
    writeln!(out, "#[rustfmt::skip]")?;
    writeln!(out, "const {}_OFFSET: [{}; {}] = [", uname, otype, map.count())?;
    writeln!(
        out,
        "{}",
        format_numbers(map.offsets(), &config.indent, config.line_width)
    )?;
    writeln!(out, "];")?;
    writeln!(out)?;
    writeln!(out, "pub static {}: SparseStringTable<'static, {}> =", uname, otype)?;
    writeln!(
        out,
        "{}SparseStringTable::new({}_DATA, &{}_OFFSET);",
        config.indent, uname, uname
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "pub fn {}<I: TryInto<usize>>(index: I) -> Option<&'static str> {{",
        lname
    )?;
    writeln!(out, "{}{}.get(index)", config.indent, uname)?;
    writeln!(out, "}}")?;

    Ok(out)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
}

/// Write generated source to `path`, creating parent directories.
pub fn write_namemap(path: &Path, source: &str) -> Result<()> {
    info!("Writing {}", path.display());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
    }
    fs::write(path, source)
        .with_context(|| format!("Could not create output file: {}", path.display()))?;
    Ok(())
}
