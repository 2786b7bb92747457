/// Splice junction table model
///
/// This module handles:
/// - SJ.out.tab record parsing into an ordered junction table
/// - Decoding of STAR's integer strand/motif/annotated columns
/// - Strand-aware canonicalization of intron motifs
/// - Genomic region parsing and containment masks
pub mod region;
pub mod sj_input;

pub use region::{region_mask, Region};
pub use sj_input::{read_sj_out_tab, read_sj_out_tab_from};

use std::fmt;

/// Strand of a splice junction, decoded from SJ.out.tab column 4.
///
/// STAR convention: 0 = undefined, 1 = +, 2 = -.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Code 0: strand could not be determined from the motif.
    Undefined,
    /// Code 1: plus strand.
    Forward,
    /// Code 2: minus strand.
    Reverse,
}

impl Strand {
    /// Decode a STAR strand code. Codes above 2 are not part of the format.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Undefined),
            1 => Some(Self::Forward),
            2 => Some(Self::Reverse),
            _ => None,
        }
    }

    /// The STAR numeric code for this strand.
    pub fn code(self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::Forward => 1,
            Self::Reverse => 2,
        }
    }

    /// Strand symbol: `+`, `-`, or `.` for undefined (GTF convention).
    pub fn symbol(self) -> char {
        match self {
            Self::Undefined => '.',
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Intron boundary dinucleotide pair, decoded from SJ.out.tab column 5.
///
/// STAR convention:
/// 0 = non-canonical
/// 1 = GT/AG
/// 2 = CT/AC
/// 3 = GC/AG
/// 4 = CT/GC
/// 5 = AT/AC
/// 6 = GT/AT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntronMotif {
    NonCanonical,
    GtAg,
    CtAc,
    GcAg,
    CtGc,
    AtAc,
    GtAt,
}

impl IntronMotif {
    /// Decode a STAR motif code. Codes above 6 are not part of the format.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NonCanonical),
            1 => Some(Self::GtAg),
            2 => Some(Self::CtAc),
            3 => Some(Self::GcAg),
            4 => Some(Self::CtGc),
            5 => Some(Self::AtAc),
            6 => Some(Self::GtAt),
            _ => None,
        }
    }

    /// The STAR numeric code for this motif.
    pub fn code(self) -> u8 {
        match self {
            Self::NonCanonical => 0,
            Self::GtAg => 1,
            Self::CtAc => 2,
            Self::GcAg => 3,
            Self::CtGc => 4,
            Self::AtAc => 5,
            Self::GtAt => 6,
        }
    }

    /// Label as written in the output table.
    pub fn label(self) -> &'static str {
        match self {
            Self::NonCanonical => "non-canonical",
            Self::GtAg => "GT/AG",
            Self::CtAc => "CT/AC",
            Self::GcAg => "GC/AG",
            Self::CtGc => "CT/GC",
            Self::AtAc => "AT/AC",
            Self::GtAt => "GT/AT",
        }
    }

    /// Strand-independent canonical class of this motif.
    ///
    /// STAR records the motif as spelled on the forward genome, so a minus
    /// strand junction carries the reverse-complement spelling of its
    /// mechanism. Remapping CT/AC→GT/AG, CT/GC→GC/AG and GT/AT→AT/AC on the
    /// minus strand yields one label per splicing mechanism regardless of
    /// orientation; non-canonical stays non-canonical.
    pub fn canonical(self, strand: Strand) -> Self {
        if strand != Strand::Reverse {
            return self;
        }
        match self {
            Self::CtAc => Self::GtAg,
            Self::CtGc => Self::GcAg,
            Self::GtAt => Self::AtAc,
            other => other,
        }
    }
}

impl fmt::Display for IntronMotif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One splice junction record from an SJ.out.tab file.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    /// Chromosome name.
    pub chrom: String,
    /// First base of the intron (1-based).
    pub intron_start: u64,
    /// Last base of the intron (1-based).
    pub intron_stop: u64,
    /// Strand the junction was assigned to.
    pub strand: Strand,
    /// Canonical intron motif (see [`IntronMotif::canonical`]).
    pub intron_motif: IntronMotif,
    /// Whether the junction is present in the annotation database.
    pub annotated: bool,
    /// Reads crossing the junction with a unique mapping.
    pub unique_reads: u32,
    /// Reads crossing the junction with a multi-mapping.
    pub multimap_reads: u32,
    /// Maximum spliced alignment overhang.
    pub max_overhang: u32,
}

impl Junction {
    /// Canonical location key: `"{chrom}:{start}-{stop}:{strand}"`.
    ///
    /// Unique per junction as long as the input carries no duplicate rows;
    /// duplicate rows keep duplicate keys (they are not merged).
    pub fn intron_location(&self) -> String {
        format!(
            "{}:{}-{}:{}",
            self.chrom, self.intron_start, self.intron_stop, self.strand
        )
    }
}

/// Ordered collection of junctions, in input file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JunctionTable {
    junctions: Vec<Junction>,
}

impl JunctionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a junction, preserving input order.
    pub fn push(&mut self, junction: Junction) {
        self.junctions.push(junction);
    }

    /// Number of junctions in the table.
    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    /// Check whether the table holds no junctions.
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// Iterate over junctions in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Junction> {
        self.junctions.iter()
    }

    /// Junctions as a slice, in input order.
    pub fn as_slice(&self) -> &[Junction] {
        &self.junctions
    }
}

impl From<Vec<Junction>> for JunctionTable {
    fn from(junctions: Vec<Junction>) -> Self {
        Self { junctions }
    }
}

impl<'a> IntoIterator for &'a JunctionTable {
    type Item = &'a Junction;
    type IntoIter = std::slice::Iter<'a, Junction>;

    fn into_iter(self) -> Self::IntoIter {
        self.junctions.iter()
    }
}
