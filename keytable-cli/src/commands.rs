use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::ArgMatches;
use keytable_core::{
    GeneratorConfig, KEYCODE_WINDOWS_RAWNAME, NameMap, codegen, keycode_windows_rawname, source,
};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct Entry<'a> {
    code: usize,
    name: &'a str,
}

pub fn generate(matches: &ArgMatches, config: &GeneratorConfig) -> Result<()> {
    let input = required_path(matches, "input")?;
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| anyhow!("Missing --name"))?;

    let mut codegen_config = config.codegen.clone();
    if let Some(table_path) = matches.get_one::<String>("table-path") {
        codegen_config.table_path = table_path.clone();
    }

    let output = match matches.get_one::<PathBuf>("output") {
        Some(path) => path.clone(),
        None => default_output(name),
    };

    let rows = source::read_mapping(&input)?;
    let map = NameMap::from_entries(rows)?;
    info!(
        "Table {} covers {} codes with a {}-byte name buffer ({} offsets)",
        name,
        map.count(),
        map.data().len(),
        map.offset_width()
    );

    let text = codegen::make_namemap(&map, name, &codegen_config)?;
    codegen::write_namemap(&output, &text)?;
    Ok(())
}

fn default_output(name: &str) -> PathBuf {
    let stem = name.strip_prefix("keycode_").unwrap_or(name);
    PathBuf::from(format!("{}.rs", stem))
}

pub fn lookup(matches: &ArgMatches) -> Result<()> {
    let text = matches
        .get_one::<String>("index")
        .ok_or_else(|| anyhow!("Missing key code"))?;
    let index = parse_index(text)?;

    match keycode_windows_rawname(index) {
        Some(name) => println!("{}", name),
        None => {
            warn!("No name for key code {}", text);
            println!("Unknown");
        }
    }
    Ok(())
}

fn parse_index(text: &str) -> Result<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
            .map_err(|_| anyhow!("Invalid hexadecimal key code: {}", text))?
    } else {
        digits
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid key code: {}", text))?
    };
    Ok(if negative { -value } else { value })
}

pub fn dump(matches: &ArgMatches) -> Result<()> {
    let entries: Vec<Entry> = KEYCODE_WINDOWS_RAWNAME
        .iter()
        .map(|(code, name)| Entry { code, name })
        .collect();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("0x{:02X}\t{}", entry.code, entry.name);
        }
    }
    debug!("Listed {} of {} codes", entries.len(), KEYCODE_WINDOWS_RAWNAME.len());
    Ok(())
}

pub fn check(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let map = NameMap::from_entries(source::read_mapping(&input)?)?;

    KEYCODE_WINDOWS_RAWNAME.validate()?;

    let built: Vec<(usize, &str)> = map.table().iter().collect();
    let shipped: Vec<(usize, &str)> = KEYCODE_WINDOWS_RAWNAME.iter().collect();
    let mismatches = mismatches(&built, &shipped);
    for (code, expected, actual) in &mismatches {
        warn!(
            "Code 0x{:02X}: source has {:?}, table has {:?}",
            code, expected, actual
        );
    }
    if !mismatches.is_empty() {
        bail!("{} codes differ from {}", mismatches.len(), input.display());
    }

    info!("Table matches {} ({} names)", input.display(), built.len());
    Ok(())
}

type Mismatch<'a> = (usize, Option<&'a str>, Option<&'a str>);

fn mismatches<'a>(expected: &[(usize, &'a str)], actual: &[(usize, &'a str)]) -> Vec<Mismatch<'a>> {
    let lookup = |entries: &[(usize, &'a str)], code: usize| {
        entries
            .iter()
            .find(|(index, _)| *index == code)
            .map(|&(_, name)| name)
    };

    let mut codes: Vec<usize> = expected
        .iter()
        .chain(actual)
        .map(|&(code, _)| code)
        .collect();
    codes.sort_unstable();
    codes.dedup();

    codes
        .into_iter()
        .filter_map(|code| {
            let want = lookup(expected, code);
            let have = lookup(actual, code);
            (want != have).then_some((code, want, have))
        })
        .collect()
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing --{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_forms() {
        assert_eq!(parse_index("42").unwrap(), 42);
        assert_eq!(parse_index("0x2A").unwrap(), 42);
        assert_eq!(parse_index("-3").unwrap(), -3);
        assert_eq!(parse_index("-0x10").unwrap(), -16);
        assert!(parse_index("Left Shift").is_err());
        assert!(parse_index("0xZZ").is_err());
    }

    #[test]
    fn default_output_drops_prefix() {
        assert_eq!(
            default_output("keycode_windows_rawname"),
            PathBuf::from("windows_rawname.rs")
        );
        assert_eq!(default_output("names"), PathBuf::from("names.rs"));
    }

    #[test]
    fn reports_differences() {
        let expected = [(1, "A"), (2, "B"), (4, "D")];
        let actual = [(1, "A"), (2, "X"), (3, "C")];
        assert_eq!(
            mismatches(&expected, &actual),
            vec![
                (2, Some("B"), Some("X")),
                (3, None, Some("C")),
                (4, Some("D"), None)
            ]
        );
    }

    #[test]
    fn shipped_table_has_no_differences_with_itself() {
        let entries: Vec<_> = KEYCODE_WINDOWS_RAWNAME.iter().collect();
        assert!(mismatches(&entries, &entries).is_empty());
    }

    #[test]
    fn json_entries() {
        let entries = vec![Entry { code: 0x2a, name: "Left Shift" }];
        assert_eq!(
            serde_json::to_string(&entries).unwrap(),
            r#"[{"code":42,"name":"Left Shift"}]"#
        );
    }
}
