use std::ops::Range;
use std::sync::Arc;

/// Hostnames to resolve in one run, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameBatch {
    hostnames: Arc<[String]>,
}

impl HostnameBatch {
    pub fn new(hostnames: Vec<String>) -> Self {
        Self {
            hostnames: hostnames.into(),
        }
    }

    /// Builds a batch from file text: one hostname per line, blank lines and
    /// `#` comments dropped.
    pub fn parse(contents: &str) -> Self {
        let hostnames = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect::<Vec<_>>();
        Self::new(hostnames)
    }

    pub fn len(&self) -> usize {
        self.hostnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostnames.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.hostnames
    }

    /// Contiguous slices, one per worker. See [`partition`].
    pub fn partitions(&self, workers: usize) -> Vec<&[String]> {
        partition(self.len(), workers)
            .into_iter()
            .map(|range| &self.hostnames[range])
            .collect()
    }
}

impl From<Vec<String>> for HostnameBatch {
    fn from(hostnames: Vec<String>) -> Self {
        Self::new(hostnames)
    }
}

/// Splits `total` items into `workers` contiguous ranges.
///
/// The first `workers - 1` ranges hold `total / workers` items each and the
/// last one takes the remainder, so leading ranges are empty when there are
/// more workers than items. Returns no ranges for `workers == 0`.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }

    let per_worker = total / workers;
    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i + 1 < workers { start + per_worker } else { total };
            start..end
        })
        .collect()
}
