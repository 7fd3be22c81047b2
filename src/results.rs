use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::info;

use crate::{
    dataset::{Dataset, Group},
    error::Result,
    null::NullPool,
};

pub const HEADER: [&str; 4] = ["group_id", "#_items_in_group", "lo_value", "FDR"];

/// Outcome of an RRA run
///
/// Groups are ordered ascending by lo-value, most significant first.
pub struct RraResults {
    dataset: Dataset,
    null_pool: NullPool,
}
impl RraResults {
    pub fn new(dataset: Dataset, null_pool: NullPool) -> Self {
        Self { dataset, null_pool }
    }

    pub fn groups(&self) -> &[Group] {
        self.dataset.groups()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.dataset.group(name)
    }

    /// The scored dataset, including the percentile of every item
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn null_pool(&self) -> &NullPool {
        &self.null_pool
    }

    /// Number of groups at or below an FDR threshold
    pub fn n_significant(&self, fdr: f64) -> usize {
        self.groups().iter().filter(|g| g.fdr <= fdr).count()
    }

    /// Writes one tab-delimited row per group
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", HEADER.join("\t"))?;
        for group in self.groups() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{:.6}",
                group.name,
                group.len(),
                format_scientific(group.lo_value),
                group.fdr
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_tsv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_tsv(BufWriter::new(file))?;
        info!(path = %path.as_ref().display(), groups = self.groups().len(), "Results written");
        Ok(())
    }
}

/// Formats a value like C's `%10.4e`
///
/// Rust prints exponents without sign or padding (`1.5625e-2`), while the
/// table uses a signed exponent of at least two digits (`1.5625e-02`).
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:.4e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return format!("{formatted:>10}");
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{:>10}", format!("{mantissa}e{sign}{digits:0>2}"))
}
