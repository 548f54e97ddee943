//! Fixed-size partitioning of an ordered log

/// Entries per closed part unless configured otherwise
pub const DEFAULT_PART_SIZE: usize = 20;

/// An ordered sequence split into full parts and a remainder
///
/// Both halves borrow from the input; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a, T> {
    /// Parts of exactly `part_size` items, oldest first
    pub closed_parts: Vec<&'a [T]>,
    /// Items after the last full part
    pub open_part: &'a [T],
}

impl<'a, T> Partition<'a, T> {
    /// Number of closed parts
    pub fn closed_count(&self) -> usize {
        self.closed_parts.len()
    }

    /// Closed part by 1-based index
    pub fn part(&self, index: usize) -> Option<&'a [T]> {
        index
            .checked_sub(1)
            .and_then(|i| self.closed_parts.get(i))
            .copied()
    }
}

/// Split `entries` (oldest first) into closed parts of `part_size` plus the rest
///
/// A `part_size` of zero closes nothing.
pub fn partition<T>(entries: &[T], part_size: usize) -> Partition<'_, T> {
    if part_size == 0 {
        return Partition {
            closed_parts: Vec::new(),
            open_part: entries,
        };
    }

    let chunks = entries.chunks_exact(part_size);
    let open_part = chunks.remainder();
    Partition {
        closed_parts: chunks.collect(),
        open_part,
    }
}

/// Number of closed parts `len` entries produce
pub fn closed_part_count(len: usize, part_size: usize) -> usize {
    len.checked_div(part_size).unwrap_or(0)
}

/// Window of entries belonging to 1-based part `index`, if that part is closed
pub fn part_window<T>(entries: &[T], part_size: usize, index: usize) -> Option<&[T]> {
    if index == 0 || index > closed_part_count(entries.len(), part_size) {
        return None;
    }
    let start = (index - 1) * part_size;
    entries.get(start..start + part_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forty_five_entries() {
        let entries: Vec<u32> = (0..45).collect();
        let p = partition(&entries, DEFAULT_PART_SIZE);

        assert_eq!(p.closed_count(), 2);
        assert!(p.closed_parts.iter().all(|part| part.len() == 20));
        assert_eq!(p.open_part, &entries[40..]);
        assert_eq!(p.open_part.len(), 5);
    }

    #[test]
    fn test_partition_properties() {
        for len in 0..70 {
            let entries: Vec<usize> = (0..len).collect();
            for size in 1..25 {
                let p = partition(&entries, size);
                assert_eq!(p.closed_count(), len / size);
                assert!(p.closed_parts.iter().all(|part| part.len() == size));
                assert_eq!(p.open_part.len(), len % size);

                let rebuilt: Vec<usize> = p
                    .closed_parts
                    .iter()
                    .flat_map(|part| part.iter().copied())
                    .chain(p.open_part.iter().copied())
                    .collect();
                assert_eq!(rebuilt, entries, "len={} size={}", len, size);
            }
        }
    }

    #[test]
    fn test_exact_multiple_leaves_empty_open_part() {
        let entries: Vec<u8> = vec![0; 40];
        let p = partition(&entries, 20);
        assert_eq!(p.closed_count(), 2);
        assert!(p.open_part.is_empty());
    }

    #[test]
    fn test_zero_part_size() {
        let entries = [1, 2, 3];
        let p = partition(&entries, 0);
        assert!(p.closed_parts.is_empty());
        assert_eq!(p.open_part, &entries);
        assert_eq!(closed_part_count(3, 0), 0);
    }

    #[test]
    fn test_part_lookup_is_one_based() {
        let entries: Vec<u32> = (0..45).collect();
        let p = partition(&entries, 20);
        assert_eq!(p.part(0), None);
        assert_eq!(p.part(1), Some(&entries[0..20]));
        assert_eq!(p.part(2), Some(&entries[20..40]));
        assert_eq!(p.part(3), None);

        assert_eq!(part_window(&entries, 20, 2), Some(&entries[20..40]));
        assert_eq!(part_window(&entries, 20, 3), None);
        assert_eq!(part_window(&entries, 20, 0), None);
    }
}
