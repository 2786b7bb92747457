use std::path::PathBuf;

use clap::Parser;

use crate::junction::Region;
use crate::psi::{DEFAULT_MIN_MULTIMAP, DEFAULT_MIN_UNIQUE};

/// sjpsi command-line parameters, matching STAR's `--camelCase` argument
/// names since the input comes straight out of a STAR run.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sjpsi",
    about = "Percent spliced-in (psi) scores from STAR SJ.out.tab junction output",
    version
)]
pub struct Parameters {
    /// Input SJ.out.tab file; .gz input is decompressed transparently
    #[arg(long = "sjFileIn")]
    pub sj_file_in: PathBuf,

    /// Output TSV file; "-" writes to stdout
    #[arg(long = "outFile", default_value = "-")]
    pub out_file: PathBuf,

    /// Min unique-mapping reads; counts below this are zeroed, not dropped
    #[arg(long = "minUnique", default_value_t = DEFAULT_MIN_UNIQUE, allow_hyphen_values = true)]
    pub min_unique: i64,

    /// Min multi-mapping reads; counts below this are zeroed, not dropped
    #[arg(long = "minMultimap", default_value_t = DEFAULT_MIN_MULTIMAP,
          allow_hyphen_values = true)]
    pub min_multimap: i64,

    /// Only output junctions strictly inside chrom:start-stop
    /// (scores are still computed over the whole input)
    #[arg(long = "region")]
    pub region_raw: Option<String>,
}

impl Parameters {
    /// Parse the raw `--region` string into a structured `Region`.
    pub fn region(&self) -> Result<Option<Region>, crate::error::Error> {
        self.region_raw
            .as_deref()
            .map(|s| s.parse::<Region>())
            .transpose()
    }

    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.min_unique < 0 {
            return Err(crate::error::Error::Config(format!(
                "--minUnique must be >= 0, got {}",
                self.min_unique
            )));
        }

        if self.min_multimap < 0 {
            return Err(crate::error::Error::Config(format!(
                "--minMultimap must be >= 0, got {}",
                self.min_multimap
            )));
        }

        self.region()?;

        Ok(())
    }
}
