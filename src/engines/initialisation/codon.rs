use crate::error::{GpError, Result};
use crate::representation::ge::Codon;
use rand::Rng;
use std::ops::Range;

/// Scales a production choice up to a random codon that selects it again.
///
/// Starting from a uniformly drawn codon in `codon_range`, searches upwards
/// (wrapping back to the start of the range) for the first codon `c` with
/// `c % production_count == production`.
pub fn codon_for_production<R: Rng + ?Sized>(
    production: usize,
    production_count: usize,
    codon_range: &Range<Codon>,
    rng: &mut R,
) -> Result<Codon> {
    if codon_range.end < 3 {
        return Err(GpError::IllegalState(format!(
            "Maximum codon value {} is below 3",
            codon_range.end
        )));
    }
    let span = u64::from(codon_range.end.saturating_sub(codon_range.start));
    if production_count == 0 || production_count as u64 > span {
        return Err(GpError::IllegalState(format!(
            "Cannot encode {} productions with codons in {:?}",
            production_count, codon_range
        )));
    }
    if production >= production_count {
        return Err(GpError::Index {
            index: production,
            length: production_count,
        });
    }

    let count = production_count as u64;
    let target = production as u64;
    let mut codon = rng.gen_range(codon_range.clone());
    while u64::from(codon) % count != target {
        codon = if codon + 1 >= codon_range.end {
            codon_range.start
        } else {
            codon + 1
        };
    }
    Ok(codon)
}
