use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use itertools::Itertools;
use tracing::info;

use crate::{
    config::RraConfig,
    dataset::Dataset,
    error::{Result, RraError},
};

/// Number of whitespace-delimited fields per record:
/// item id, group id, list id, value
pub const N_FIELDS: usize = 4;

/// Reads whitespace-delimited records into a [`Dataset`]
///
/// The first non-empty line is a header and only its field count is checked.
/// Every later non-empty line is one `<item> <group> <list> <value>` record.
pub fn read_dataset<R: BufRead>(reader: R, config: &RraConfig) -> Result<Dataset> {
    let mut builder = Dataset::builder(config);
    let mut header_seen = false;
    let mut n_records = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        let fields = line.split_whitespace().collect_vec();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != N_FIELDS {
            return Err(RraError::InvalidInput(format!(
                "line {line_number}: expected {N_FIELDS} fields (<item id> <group id> <list id> <value>), found {}",
                fields.len()
            )));
        }
        if !header_seen {
            header_seen = true;
            continue;
        }

        let value = fields[3].parse::<f64>().map_err(|_| {
            RraError::InvalidInput(format!(
                "line {line_number}: cannot parse value {:?}",
                fields[3]
            ))
        })?;
        builder
            .push(fields[0], fields[1], fields[2], value)
            .map_err(|e| match e {
                RraError::InvalidInput(msg) => {
                    RraError::InvalidInput(format!("line {line_number}: {msg}"))
                }
                other => other,
            })?;
        n_records += 1;
    }

    let dataset = builder.build()?;
    info!(
        items = n_records,
        groups = dataset.n_groups(),
        lists = dataset.n_lists(),
        "Input read"
    );
    Ok(dataset)
}

/// Opens `path` and reads it with [`read_dataset`]
pub fn read_dataset_path<P: AsRef<Path>>(path: P, config: &RraConfig) -> Result<Dataset> {
    let file = File::open(path)?;
    read_dataset(BufReader::new(file), config)
}
