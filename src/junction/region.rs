use crate::error::Error;
use crate::junction::{Junction, JunctionTable};
use std::fmt;
use std::str::FromStr;

/// A genomic interval written as `chrom:start-stop`.
///
/// Thousands separators are tolerated: `"chr1:146,000-655,000"` parses the
/// same as `"chr1:146000-655000"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
}

impl Region {
    /// Whether a junction lies strictly inside this region.
    ///
    /// Containment is exclusive on both ends: a junction starting exactly at
    /// `start` or ending exactly at `stop` is outside.
    pub fn contains(&self, junction: &Junction) -> bool {
        junction.chrom == self.chrom
            && self.start < junction.intron_start
            && junction.intron_stop < self.stop
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.replace(',', "");

        let mut parts = cleaned.split(':');
        let (chrom, span) = match (parts.next(), parts.next(), parts.next()) {
            (Some(chrom), Some(span), None) if !chrom.is_empty() => (chrom, span),
            _ => {
                return Err(Error::Format(format!(
                    "expected 'chrom:start-stop', got '{}'",
                    s
                )));
            }
        };

        let mut bounds = span.split('-');
        let (start, stop) = match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(start), Some(stop), None) => (start, stop),
            _ => {
                return Err(Error::Format(format!(
                    "expected 'start-stop' span in '{}'",
                    s
                )));
            }
        };

        let start = start
            .parse::<u64>()
            .map_err(|e| Error::Format(format!("invalid start '{}' in '{}': {}", start, s, e)))?;
        let stop = stop
            .parse::<u64>()
            .map_err(|e| Error::Format(format!("invalid stop '{}' in '{}': {}", stop, s, e)))?;

        Ok(Region {
            chrom: chrom.to_string(),
            start,
            stop,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.stop)
    }
}

/// Boolean mask over a table: `mask[i]` is true iff junction `i` lies
/// strictly inside the region. Pure; the table is not touched.
pub fn region_mask(table: &JunctionTable, region: &Region) -> Vec<bool> {
    table.iter().map(|j| region.contains(j)).collect()
}
