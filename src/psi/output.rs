/// Scored junction table output (tab-separated, one header row)
///
/// Columns:
/// 1. chrom
/// 2. intron_start (1-based)
/// 3. intron_stop (1-based)
/// 4. strand (`+`, `-`, `.`)
/// 5. intron_motif (strand-corrected label, e.g. `GT/AG`)
/// 6. annotated (0=no, 1=yes)
/// 7. unique_junction_reads
/// 8. multimap_junction_reads
/// 9. max_overhang
/// 10. intron_location (`chrom:start-stop:strand`)
/// 11. unique_junction_reads_filtered
/// 12. multimap_junction_reads_filtered
/// 13. total_filtered_reads
/// 14. psi5
/// 15. psi3
use crate::error::Error;
use crate::psi::PsiTable;
use std::io::Write;

const HEADER: &str = "chrom\tintron_start\tintron_stop\tstrand\tintron_motif\t\
    annotated\tunique_junction_reads\tmultimap_junction_reads\tmax_overhang\t\
    intron_location\tunique_junction_reads_filtered\t\
    multimap_junction_reads_filtered\ttotal_filtered_reads\tpsi5\tpsi3";

impl PsiTable {
    /// Write the scored table as TSV, returning the number of data rows
    /// written (the header row is not counted).
    ///
    /// `mask` selects which rows to emit; `None` emits all of them. A mask
    /// whose length does not match the table is a configuration error.
    pub fn write_tsv<W: Write>(
        &self,
        mut writer: W,
        mask: Option<&[bool]>,
    ) -> Result<usize, Error> {
        if let Some(mask) = mask {
            if mask.len() != self.len() {
                return Err(Error::Config(format!(
                    "region mask covers {} rows but the table has {}",
                    mask.len(),
                    self.len()
                )));
            }
        }

        writeln!(writer, "{}", HEADER)?;

        let mut written = 0usize;
        for (idx, row) in self.iter().enumerate() {
            if let Some(mask) = mask {
                if !mask[idx] {
                    continue;
                }
            }

            let j = &row.junction;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                j.chrom,
                j.intron_start,
                j.intron_stop,
                j.strand,
                j.intron_motif,
                if j.annotated { 1 } else { 0 },
                j.unique_reads,
                j.multimap_reads,
                j.max_overhang,
                j.intron_location(),
                row.unique_reads_filtered,
                row.multimap_reads_filtered,
                row.total_filtered_reads,
                row.psi5,
                row.psi3
            )?;
            written += 1;
        }

        writer.flush()?;
        Ok(written)
    }
}
