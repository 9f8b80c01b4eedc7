//! Line highlight specs for code blocks (e.g. `1,3-5,10`).

use std::fmt;
use std::ops::RangeInclusive;

/// Parsed set of 1-based line numbers to highlight.
///
/// Ranges are kept sorted and merged, so `3-5,1,4-6` displays as `1,3-6`.
/// Tokens that are not a number or a `start-end` range are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightLines {
    ranges: Vec<RangeInclusive<u32>>,
}

impl HighlightLines {
    /// Parse a comma-separated highlight spec.
    pub fn parse(spec: &str) -> Self {
        let mut ranges: Vec<RangeInclusive<u32>> = spec
            .split(',')
            .filter_map(|token| parse_token(token.trim()))
            .collect();
        ranges.sort_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = merged.last_mut()
                && *range.start() <= last.end().saturating_add(1)
            {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
                continue;
            }
            merged.push(range);
        }

        Self { ranges: merged }
    }

    /// Whether no line is highlighted.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether `line` (1-based) is highlighted.
    pub fn contains(&self, line: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(&line))
    }

    /// Merged ranges in ascending order.
    pub fn ranges(&self) -> &[RangeInclusive<u32>] {
        &self.ranges
    }
}

fn parse_token(token: &str) -> Option<RangeInclusive<u32>> {
    if token.is_empty() {
        return None;
    }
    let (start, end) = match token.split_once('-') {
        Some((a, b)) => (a.trim().parse::<u32>().ok()?, b.trim().parse::<u32>().ok()?),
        None => {
            let n = token.parse::<u32>().ok()?;
            (n, n)
        }
    };
    if start == 0 || end == 0 {
        return None;
    }
    Some(start.min(end)..=start.max(end))
}

impl fmt::Display for HighlightLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if range.start() == range.end() {
                write!(f, "{}", range.start())?;
            } else {
                write!(f, "{}-{}", range.start(), range.end())?;
            }
        }
        Ok(())
    }
}
