use std::cmp::Ordering;

/// A dotted version decomposed into numeric segments.
///
/// Segments that are not plain non-negative integers count as 0, so
/// `"1.x.3"` is `[1, 0, 3]`. Trailing zeros are insignificant when
/// comparing: `1.2` and `1.2.0` are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTuple(Vec<u64>);

impl VersionTuple {
    /// Parses a version string. Returns `None` for an absent (empty or
    /// whitespace-only) version.
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return None;
        }

        let segments = trimmed
            .split('.')
            .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
            .collect();

        Some(Self(segments))
    }

    pub fn segments(&self) -> &[u64] {
        &self.0
    }
}

impl Ord for VersionTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let left = self.0.get(i).copied().unwrap_or(0);
            let right = other.0.get(i).copied().unwrap_or(0);
            match left.cmp(&right) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two dotted version strings numerically.
///
/// An absent version sorts below every present one; two absent versions
/// are equal. Malformed segments degrade to 0 and never cause a failure.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (VersionTuple::parse(a), VersionTuple::parse(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}

/// Returns true when `installed` is strictly older than `available`.
pub fn is_outdated(installed: &str, available: &str) -> bool {
    compare(installed, available) == Ordering::Less
}
