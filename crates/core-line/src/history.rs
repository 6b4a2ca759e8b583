use std::collections::VecDeque;

/// Append-only log of accepted lines.
///
/// Empty lines are never recorded. When `max_entries` is non-zero the oldest
/// entries are dropped once the log grows past it.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<Vec<u8>>,
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Record `line`. Returns `false` if it was empty and therefore skipped.
    pub fn add(&mut self, line: &[u8]) -> bool {
        if line.is_empty() {
            return false;
        }
        self.entries.push_back(line.to_vec());
        if self.max_entries > 0 {
            while self.entries.len() > self.max_entries {
                self.entries.pop_front();
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.entries.back().map(Vec::as_slice)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_lines() {
        let mut h = History::new(0);
        assert!(!h.add(b""));
        assert!(h.is_empty());
        assert!(h.add(b"ls"));
        assert_eq!(h.last(), Some(&b"ls"[..]));
    }

    #[test]
    fn bounded_log_drops_oldest() {
        let mut h = History::new(2);
        h.add(b"one");
        h.add(b"two");
        h.add(b"three");
        let kept: Vec<&[u8]> = h.iter().collect();
        assert_eq!(kept, vec![&b"two"[..], &b"three"[..]]);
    }

    #[test]
    fn zero_bound_is_unbounded() {
        let mut h = History::new(0);
        for i in 0..100u8 {
            h.add(&[b'a' + (i % 26)]);
        }
        assert_eq!(h.len(), 100);
    }
}
