use std::collections::{HashMap, HashSet};
use std::fmt;

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use crate::table::SparseStringTable;

/// Pack `strings` into one zero-terminated buffer.
///
/// The buffer starts with a zero byte, so no name is ever stored at offset 0.
/// A string that is a suffix of a longer one reuses the longer string's tail.
/// Returns the buffer and the offset of every input string.
pub fn pack_strings<S: AsRef<str>>(strings: &[S]) -> (Vec<u8>, HashMap<String, usize>) {
    let mut by_length: Vec<&str> = strings.iter().map(|s| s.as_ref()).collect();
    by_length.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut suffixes: HashSet<&str> = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();
    for s in by_length {
        if suffixes.contains(s) {
            continue;
        }
        kept.push(s);
        suffixes.extend(s.char_indices().map(|(i, _)| &s[i..]));
    }
    kept.sort();

    let mut data = vec![0u8];
    for s in &kept {
        data.extend_from_slice(s.as_bytes());
        data.push(0);
    }

    let mut offsets = HashMap::new();
    for s in strings {
        let s = s.as_ref();
        if offsets.contains_key(s) {
            continue;
        }
        let mut needle = s.as_bytes().to_vec();
        needle.push(0);
        if let Some(offset) = data.windows(needle.len()).position(|w| w == needle.as_slice()) {
            offsets.insert(s.to_string(), offset);
        }
    }

    debug!(
        "Packed {} names into {} bytes ({} stored)",
        offsets.len(),
        data.len(),
        kept.len()
    );

    (data, offsets)
}

/// Smallest unsigned type able to hold every offset of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetWidth {
    U8,
    U16,
    U32,
}

impl OffsetWidth {
    pub fn for_max(max: usize) -> Self {
        if max < 1 << 8 {
            OffsetWidth::U8
        } else if max < 1 << 16 {
            OffsetWidth::U16
        } else {
            OffsetWidth::U32
        }
    }
}

impl fmt::Display for OffsetWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OffsetWidth::U8 => "u8",
            OffsetWidth::U16 => "u16",
            OffsetWidth::U32 => "u32",
        })
    }
}

/// Packed name buffer and offset table built from a code-to-name mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap {
    data: Vec<u8>,
    offsets: Vec<u32>,
}

impl NameMap {
    /// Build the table for `entries`.
    ///
    /// The same pair may appear more than once, but a code mapped to two
    /// different names is an error.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut names: HashMap<u32, String> = HashMap::new();
        let mut order: Vec<u32> = Vec::new();

        for (code, name) in entries {
            let name: String = name.into();
            validate_name(code, &name)?;
            match names.get(&code) {
                Some(existing) if *existing != name => {
                    bail!("Name conflict: code {} is {:?} and {:?}", code, name, existing);
                }
                Some(_) => {}
                None => {
                    names.insert(code, name);
                    order.push(code);
                }
            }
        }

        let count = order
            .iter()
            .max()
            .map(|&max| max as usize + 1)
            .ok_or_else(|| anyhow!("Cannot build a name table from an empty mapping"))?;

        let strings: Vec<&str> = order.iter().map(|code| names[code].as_str()).collect();
        let (data, strmap) = pack_strings(&strings);
        if data.len() > u32::MAX as usize {
            bail!("Name buffer of {} bytes does not fit 32-bit offsets", data.len());
        }

        let mut offsets = vec![0u32; count];
        for code in &order {
            offsets[*code as usize] = strmap[&names[code]] as u32;
        }

        debug!("Built name table with {} of {} codes named", order.len(), count);

        Ok(Self { data, offsets })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Number of codes in the index domain.
    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    pub fn offset_width(&self) -> OffsetWidth {
        OffsetWidth::for_max(self.offsets.iter().copied().max().unwrap_or(0) as usize)
    }

    pub fn table(&self) -> SparseStringTable<'_, u32> {
        SparseStringTable::new(&self.data, &self.offsets)
    }
}

fn validate_name(code: u32, name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Empty name for code {}", code);
    }
    if !name.is_ascii() {
        bail!("Name {:?} for code {} is not ASCII", name, code);
    }
    if name.contains('\0') {
        bail!("Name {:?} for code {} contains a zero byte", name, code);
    }
    Ok(())
}
