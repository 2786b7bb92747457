pub mod error;
pub mod junction;
pub mod params;
pub mod psi;

use std::fs::File;
use std::io::{self, BufWriter};

use log::info;

use crate::error::Error;
use crate::junction::{read_sj_out_tab, region_mask};
use crate::params::Parameters;
use crate::psi::compute_psi;

/// Top-level pipeline. Called from `main()` after CLI parsing.
pub fn run(params: &Parameters) -> anyhow::Result<()> {
    params.validate()?;

    info!("sjpsi v{}", env!("CARGO_PKG_VERSION"));
    info!("sjFileIn: {}", params.sj_file_in.display());
    info!(
        "minUnique: {}, minMultimap: {}",
        params.min_unique, params.min_multimap
    );

    let junctions = read_sj_out_tab(&params.sj_file_in)?;

    let scored = compute_psi(&junctions, params.min_unique, params.min_multimap)?;

    // The region restricts output rows only; scores were computed over the
    // full table above, so site totals are not truncated at region edges.
    let mask = match params.region()? {
        Some(region) => {
            info!("Restricting output to junctions inside {}", region);
            Some(region_mask(&junctions, &region))
        }
        None => None,
    };

    let to_stdout = params.out_file.as_os_str() == "-";
    let written = if to_stdout {
        scored.write_tsv(io::stdout().lock(), mask.as_deref())?
    } else {
        let file =
            File::create(&params.out_file).map_err(|e| Error::io(e, &params.out_file))?;
        scored.write_tsv(BufWriter::new(file), mask.as_deref())?
    };

    info!(
        "Wrote {} of {} junction rows to {}",
        written,
        scored.len(),
        if to_stdout {
            "stdout".to_string()
        } else {
            params.out_file.display().to_string()
        }
    );

    Ok(())
}
