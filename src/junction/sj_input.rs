/// SJ.out.tab reading (STAR splice junction output)
///
/// Format (9 whitespace-separated columns, no header):
/// 1. chromosome
/// 2. intron start (1-based)
/// 3. intron end (1-based)
/// 4. strand (0=undefined, 1=+, 2=-)
/// 5. motif (0=non-canonical, 1=GT/AG, 2=CT/AC, 3=GC/AG, 4=CT/GC, 5=AT/AC, 6=GT/AT)
/// 6. annotated (0=novel, nonzero=annotated)
/// 7. unique-mapping reads
/// 8. multi-mapping reads
/// 9. maximum overhang
///
/// STAR emits tab separators; runs of spaces and/or tabs are accepted.
/// Parsing is strict: a row with the wrong field count, a non-numeric
/// numeric field, or a strand/motif code outside its table fails the whole
/// load with an error naming the line.
use crate::error::Error;
use crate::junction::{IntronMotif, Junction, JunctionTable, Strand};
use flate2::read::GzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Read an SJ.out.tab file into a [`JunctionTable`].
///
/// Paths ending in `.gz`/`.gzip` are decompressed transparently; STAR
/// writes the file uncompressed but archived runs usually gzip it.
pub fn read_sj_out_tab(path: &Path) -> Result<JunctionTable, Error> {
    let file = File::open(path).map_err(|e| Error::io(e, path))?;

    let path_str = path.to_string_lossy();
    let is_gzipped = path_str.ends_with(".gz") || path_str.ends_with(".gzip");

    let table = if is_gzipped {
        read_sj_out_tab_from(BufReader::new(GzDecoder::new(file)))?
    } else {
        read_sj_out_tab_from(BufReader::new(file))?
    };

    log::info!("Loaded {} junctions from {}", table.len(), path.display());
    Ok(table)
}

/// Read SJ.out.tab records from any buffered source.
///
/// Rows keep their input order; every line must be a valid record.
pub fn read_sj_out_tab_from<R: BufRead>(reader: R) -> Result<JunctionTable, Error> {
    let mut table = JunctionTable::new();
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line =
            line.map_err(|e| Error::Parse(format!("failed to read line {}: {}", line_num, e)))?;
        table.push(parse_sj_line(&line, line_num)?);
    }

    Ok(table)
}

/// Parse a single SJ.out.tab line.
fn parse_sj_line(line: &str, line_num: usize) -> Result<Junction, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() != 9 {
        return Err(Error::Parse(format!(
            "line {}: expected 9 fields, found {}",
            line_num,
            fields.len()
        )));
    }

    let chrom = fields[0].to_string();
    let intron_start = parse_field::<u64>(fields[1], "intron start", line_num)?;
    let intron_stop = parse_field::<u64>(fields[2], "intron stop", line_num)?;
    let strand_code = parse_field::<u8>(fields[3], "strand code", line_num)?;
    let motif_code = parse_field::<u8>(fields[4], "motif code", line_num)?;
    let annotated_code = parse_field::<u32>(fields[5], "annotated flag", line_num)?;
    let unique_reads = parse_field::<u32>(fields[6], "unique read count", line_num)?;
    let multimap_reads = parse_field::<u32>(fields[7], "multimap read count", line_num)?;
    let max_overhang = parse_field::<u32>(fields[8], "max overhang", line_num)?;

    let strand = Strand::from_code(strand_code).ok_or_else(|| {
        Error::Parse(format!(
            "line {}: strand code {} is outside the 0-2 table",
            line_num, strand_code
        ))
    })?;
    let motif = IntronMotif::from_code(motif_code).ok_or_else(|| {
        Error::Parse(format!(
            "line {}: motif code {} is outside the 0-6 table",
            line_num, motif_code
        ))
    })?;

    Ok(Junction {
        chrom,
        intron_start,
        intron_stop,
        strand,
        intron_motif: motif.canonical(strand),
        annotated: annotated_code != 0,
        unique_reads,
        multimap_reads,
        max_overhang,
    })
}

/// Parse one numeric field, naming the field and line on failure.
fn parse_field<T>(value: &str, name: &str, line_num: usize) -> Result<T, Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        Error::Parse(format!(
            "line {}: invalid {} '{}': {}",
            line_num, name, value, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line_plus_strand() {
        let j = parse_sj_line("chr1\t100\t200\t1\t1\t1\t90\t3\t40", 1).unwrap();

        assert_eq!(j.chrom, "chr1");
        assert_eq!(j.intron_start, 100);
        assert_eq!(j.intron_stop, 200);
        assert_eq!(j.strand, Strand::Forward);
        assert_eq!(j.intron_motif, IntronMotif::GtAg);
        assert!(j.annotated);
        assert_eq!(j.unique_reads, 90);
        assert_eq!(j.multimap_reads, 3);
        assert_eq!(j.max_overhang, 40);
    }

    #[test]
    fn test_parse_line_minus_strand_motif_canonicalized() {
        // Strand code 2 with motif code 2 (CT/AC) is the reverse-complement
        // spelling of GT/AG
        let j = parse_sj_line("chr1\t100\t200\t2\t2\t0\t10\t0\t20", 1).unwrap();

        assert_eq!(j.strand, Strand::Reverse);
        assert_eq!(j.intron_motif, IntronMotif::GtAg);
        assert!(!j.annotated);
    }

    #[test]
    fn test_parse_line_undefined_strand() {
        let j = parse_sj_line("chr1\t100\t200\t0\t0\t0\t1\t0\t5", 1).unwrap();

        assert_eq!(j.strand, Strand::Undefined);
        assert_eq!(j.intron_motif, IntronMotif::NonCanonical);
    }

    #[test]
    fn test_parse_line_mixed_whitespace() {
        let j = parse_sj_line("chr1   100\t200  \t 1\t1\t0\t5\t0\t10", 1).unwrap();

        assert_eq!(j.intron_start, 100);
        assert_eq!(j.intron_stop, 200);
        assert_eq!(j.unique_reads, 5);
    }

    #[test]
    fn test_parse_line_annotated_nonzero_is_true() {
        let j = parse_sj_line("chr1\t100\t200\t1\t1\t7\t5\t0\t10", 1).unwrap();
        assert!(j.annotated);

        let j = parse_sj_line("chr1\t100\t200\t1\t1\t0\t5\t0\t10", 1).unwrap();
        assert!(!j.annotated);
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        let err = parse_sj_line("chr1\t100\t200\t1\t1\t1\t90\t3", 4).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 4"));
        assert!(msg.contains("expected 9 fields, found 8"));
    }

    #[test]
    fn test_parse_line_too_many_fields() {
        let err = parse_sj_line("chr1\t100\t200\t1\t1\t1\t90\t3\t40\t0", 2).unwrap_err();
        assert!(err.to_string().contains("expected 9 fields, found 10"));
    }

    #[test]
    fn test_parse_line_blank_rejected() {
        let err = parse_sj_line("", 3).unwrap_err();
        assert!(err.to_string().contains("expected 9 fields, found 0"));
    }

    #[test]
    fn test_parse_line_non_numeric_field() {
        let err = parse_sj_line("chr1\tabc\t200\t1\t1\t1\t90\t3\t40", 7).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("intron start"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_parse_line_strand_code_out_of_table() {
        let err = parse_sj_line("chr1\t100\t200\t3\t1\t1\t90\t3\t40", 1).unwrap_err();
        assert!(err.to_string().contains("strand code 3"));
    }

    #[test]
    fn test_parse_line_motif_code_out_of_table() {
        let err = parse_sj_line("chr1\t100\t200\t1\t7\t1\t90\t3\t40", 1).unwrap_err();
        assert!(err.to_string().contains("motif code 7"));
    }

    #[test]
    fn test_read_from_reader() {
        let data = "chr1\t100\t180\t1\t1\t1\t90\t0\t40\n\
                    chr1\t100\t200\t1\t1\t0\t10\t0\t38\n\
                    chr2\t130\t200\t2\t2\t0\t40\t0\t35\n";

        let table = read_sj_out_tab_from(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        let rows = table.as_slice();
        assert_eq!(rows[0].intron_location(), "chr1:100-180:+");
        assert_eq!(rows[1].unique_reads, 10);
        assert_eq!(rows[2].chrom, "chr2");
        assert_eq!(rows[2].intron_motif, IntronMotif::GtAg);
    }

    #[test]
    fn test_read_from_reader_empty_input() {
        let table = read_sj_out_tab_from("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_error_names_failing_line() {
        let data = "chr1\t100\t180\t1\t1\t1\t90\t0\t40\n\
                    chr1\t100\tBAD\t1\t1\t0\t10\t0\t38\n";

        let err = read_sj_out_tab_from(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_read_file() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "chr1\t14830\t14969\t2\t2\t1\t0\t1\t39").unwrap();
        writeln!(tmpfile, "chr1\t329977\t334128\t1\t1\t1\t0\t2\t14").unwrap();
        tmpfile.flush().unwrap();

        let table = read_sj_out_tab(tmpfile.path()).unwrap();

        assert_eq!(table.len(), 2);
        let rows = table.as_slice();
        assert_eq!(rows[0].strand, Strand::Reverse);
        assert_eq!(rows[0].intron_motif, IntronMotif::GtAg);
        assert_eq!(rows[1].strand, Strand::Forward);
    }

    #[test]
    fn test_read_gzip_file() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let tmpfile = tempfile::Builder::new()
            .suffix(".SJ.out.tab.gz")
            .tempfile()
            .unwrap();
        let mut encoder = GzEncoder::new(tmpfile.as_file(), Compression::default());
        writeln!(encoder, "chr1\t100\t200\t1\t1\t0\t12\t4\t30").unwrap();
        encoder.finish().unwrap();

        let table = read_sj_out_tab(tmpfile.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.as_slice()[0].unique_reads, 12);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_sj_out_tab(Path::new("/no/such/SJ.out.tab")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
