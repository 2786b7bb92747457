/// Percent spliced-in (Psi) scoring
///
/// Scores follow Pervouchine et al, Bioinformatics (2013)
/// [doi: 10.1093/bioinformatics/bts678]: for each junction, how much of the
/// read support at its donor site (5' splice site, shared intron start) does
/// it carry compared to every other junction using that donor — and the
/// same question for its acceptor site (3' splice site, shared intron stop).
///
/// With three junctions and their filtered read totals
///
/// ```text
/// chr1:100-180    90 reads
/// chr1:100-200    10 reads
/// chr1:130-200    40 reads
/// ```
///
/// donor site chr1:100 carries 100 reads, so psi5 is 0.9 for chr1:100-180
/// and 0.1 for chr1:100-200; acceptor site chr1:200 carries 50 reads, so
/// psi3 is 0.2 for chr1:100-200 and 0.8 for chr1:130-200. The remaining
/// sites are used by a single junction each, so their scores are 1.0.
mod output;

use crate::error::Error;
use crate::junction::{Junction, JunctionTable};
use std::collections::HashMap;

/// Default minimum unique-read support below which a junction's unique
/// reads are zeroed (`--minUnique`).
pub const DEFAULT_MIN_UNIQUE: i64 = 5;

/// Default minimum multimap-read support below which a junction's multimap
/// reads are zeroed (`--minMultimap`).
pub const DEFAULT_MIN_MULTIMAP: i64 = 10;

/// One scored row: the input junction plus the derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PsiRow {
    pub junction: Junction,
    /// `unique_reads` when it meets the threshold, else 0.
    pub unique_reads_filtered: u32,
    /// `multimap_reads` when it meets the threshold, else 0.
    pub multimap_reads_filtered: u32,
    /// Sum of the two filtered counts.
    pub total_filtered_reads: u64,
    /// This junction's share of its donor site's filtered reads.
    pub psi5: f64,
    /// This junction's share of its acceptor site's filtered reads.
    pub psi3: f64,
}

/// Scored junction table: one row per input junction, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsiTable {
    rows: Vec<PsiRow>,
}

impl PsiTable {
    /// Number of scored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over scored rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, PsiRow> {
        self.rows.iter()
    }

    /// Scored rows as a slice, in input order.
    pub fn as_slice(&self) -> &[PsiRow] {
        &self.rows
    }
}

/// Compute psi5/psi3 scores for every junction in the table.
///
/// Junction reads below the thresholds are zeroed (never dropped or left
/// missing), per-site totals are accumulated over the zero-filled counts,
/// and each junction's total is normalized against its donor-site and
/// acceptor-site totals. Duplicate rows are independent observations: each
/// contributes its own reads to the shared site totals.
///
/// Returns a fresh [`PsiTable`]; the input table is not modified. An empty
/// table yields an empty result. Negative thresholds are a configuration
/// error.
pub fn compute_psi(
    table: &JunctionTable,
    min_unique: i64,
    min_multimap: i64,
) -> Result<PsiTable, Error> {
    if min_unique < 0 || min_multimap < 0 {
        return Err(Error::Config(format!(
            "read-support thresholds must be non-negative (minUnique={}, minMultimap={})",
            min_unique, min_multimap
        )));
    }

    // First pass: zero-filled per-row counts.
    let filtered: Vec<(u32, u32, u64)> = table
        .iter()
        .map(|j| {
            let unique = threshold(j.unique_reads, min_unique);
            let multimap = threshold(j.multimap_reads, min_multimap);
            (unique, multimap, unique as u64 + multimap as u64)
        })
        .collect();

    // Second pass: filtered-read totals per splice site. Donor sites share
    // (chrom, intron_start), acceptor sites share (chrom, intron_stop).
    let mut donor_totals: HashMap<(&str, u64), u64> = HashMap::new();
    let mut acceptor_totals: HashMap<(&str, u64), u64> = HashMap::new();
    for (j, &(_, _, total)) in table.iter().zip(&filtered) {
        *donor_totals
            .entry((j.chrom.as_str(), j.intron_start))
            .or_insert(0) += total;
        *acceptor_totals
            .entry((j.chrom.as_str(), j.intron_stop))
            .or_insert(0) += total;
    }

    log::debug!(
        "Scoring {} junctions across {} donor and {} acceptor sites",
        table.len(),
        donor_totals.len(),
        acceptor_totals.len()
    );

    // Third pass: normalize each row against its group totals.
    let rows = table
        .iter()
        .zip(filtered)
        .map(|(j, (unique, multimap, total))| {
            let donor_total = donor_totals[&(j.chrom.as_str(), j.intron_start)];
            let acceptor_total = acceptor_totals[&(j.chrom.as_str(), j.intron_stop)];
            PsiRow {
                junction: j.clone(),
                unique_reads_filtered: unique,
                multimap_reads_filtered: multimap,
                total_filtered_reads: total,
                psi5: site_ratio(total, donor_total),
                psi3: site_ratio(total, acceptor_total),
            }
        })
        .collect();

    Ok(PsiTable { rows })
}

/// Zero a read count below its threshold.
fn threshold(count: u32, min: i64) -> u32 {
    if (count as i64) >= min {
        count
    } else {
        0
    }
}

/// Ratio of a row's filtered reads to its site total, widened to f64.
///
/// A site whose filtered total is zero has no usage preference to express;
/// its junctions score 0 rather than NaN so the column stays numeric and
/// totally ordered.
fn site_ratio(row_total: u64, site_total: u64) -> f64 {
    if site_total > 0 {
        row_total as f64 / site_total as f64
    } else {
        0.0
    }
}
