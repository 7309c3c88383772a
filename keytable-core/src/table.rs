use anyhow::{Result, bail};

/// Unsigned element type of an offset table.
pub trait StrOffset: Copy {
    fn to_usize(self) -> usize;
}

impl StrOffset for u8 {
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl StrOffset for u16 {
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl StrOffset for u32 {
    fn to_usize(self) -> usize {
        self as usize
    }
}

/// Maps a contiguous integer domain to names packed in one buffer.
///
/// `data` holds zero-terminated names back to back and always starts with a
/// zero byte. `offsets` has one entry per index: the start of that index's
/// name in `data`, or 0 when the index has no name.
#[derive(Debug, Clone, Copy)]
pub struct SparseStringTable<'a, O: StrOffset> {
    data: &'a [u8],
    offsets: &'a [O],
}

impl<'a, O: StrOffset> SparseStringTable<'a, O> {
    pub const fn new(data: &'a [u8], offsets: &'a [O]) -> Self {
        Self { data, offsets }
    }

    /// Look up the name for `index`.
    ///
    /// Indices outside `0..len()`, including negative ones, and unassigned
    /// indices all return `None`.
    pub fn get<I: TryInto<usize>>(&self, index: I) -> Option<&'a str> {
        let index: usize = index.try_into().ok()?;
        let offset = self.offsets.get(index)?.to_usize();
        if offset == 0 {
            return None;
        }
        self.name_at(offset)
    }

    fn name_at(&self, offset: usize) -> Option<&'a str> {
        let data: &'a [u8] = self.data;
        let tail = data.get(offset..)?;
        let end = tail.iter().position(|&b| b == 0)?;
        if end == 0 {
            return None;
        }
        std::str::from_utf8(&tail[..end]).ok()
    }

    /// Size of the index domain.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Present entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        (0..self.offsets.len()).filter_map(move |index| Some((index, self.get(index)?)))
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn offsets(&self) -> &'a [O] {
        self.offsets
    }

    /// Check the buffer and every offset against the packed format.
    pub fn validate(&self) -> Result<()> {
        match self.data {
            [] => bail!("Name buffer is empty"),
            [first, ..] if *first != 0 => bail!("Name buffer must start with a zero byte"),
            [.., last] if *last != 0 => bail!("Name buffer must end with a zero byte"),
            _ => {}
        }

        for (index, offset) in self.offsets.iter().enumerate() {
            let offset = offset.to_usize();
            if offset == 0 {
                continue;
            }
            if offset >= self.data.len() {
                bail!(
                    "Offset {} for index {} is past the end of the {}-byte name buffer",
                    offset,
                    index,
                    self.data.len()
                );
            }
            if self.name_at(offset).is_none() {
                bail!(
                    "Offset {} for index {} does not start a non-empty UTF-8 name",
                    offset,
                    index
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &[u8] = b"\0Alpha\0Beta\0\xff\0";
    const OFFSETS: [u8; 6] = [0, 1, 0, 7, 3, 12];

    fn table() -> SparseStringTable<'static, u8> {
        SparseStringTable::new(DATA, &OFFSETS)
    }

    #[test]
    fn lookup_present_and_absent() {
        let table = table();
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(1), Some("Alpha"));
        assert_eq!(table.get(2), None);
        assert_eq!(table.get(3), Some("Beta"));
    }

    #[test]
    fn shared_suffix_resolves_to_tail() {
        assert_eq!(table().get(4u8), Some("pha"));
    }

    #[test]
    fn out_of_domain_indices() {
        let table = table();
        assert_eq!(table.get(6), None);
        assert_eq!(table.get(7), None);
        assert_eq!(table.get(usize::MAX), None);
        assert_eq!(table.get(-1), None);
        assert_eq!(table.get(i64::MIN), None);
    }

    #[test]
    fn invalid_utf8_is_absent() {
        assert_eq!(table().get(5), None);
    }

    #[test]
    fn iter_skips_gaps() {
        let entries: Vec<_> = table().iter().collect();
        assert_eq!(entries, vec![(1, "Alpha"), (3, "Beta"), (4, "pha")]);
    }

    #[test]
    fn validate_flags_bad_utf8() {
        let err = table().validate().unwrap_err();
        assert!(err.to_string().contains("index 5"), "{err}");
    }

    #[test]
    fn validate_checks_buffer_bounds() {
        let offsets = [0u8, 1];
        assert!(SparseStringTable::new(b"\0A\0", &offsets).validate().is_ok());
        assert!(SparseStringTable::new(b"A\0", &offsets).validate().is_err());
        assert!(SparseStringTable::new(b"\0A", &offsets).validate().is_err());
        assert!(SparseStringTable::new(b"", &offsets).validate().is_err());

        let past_end = [0u16, 9];
        let err = SparseStringTable::new(b"\0A\0", &past_end)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("past the end"), "{err}");
    }

    #[test]
    fn offset_to_terminator_is_absent() {
        let offsets = [0u32, 2];
        let table = SparseStringTable::new(b"\0A\0", &offsets);
        assert_eq!(table.get(1), None);
        assert!(table.validate().is_err());
    }
}
