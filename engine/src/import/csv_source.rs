use super::*;
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::fs::File;

/// A directory with a `nodes.csv` (`id,lat,lon`) and an `edges.csv` (`from,to,length`).
/// Both files start with a header line.
#[derive(Debug)]
pub struct CsvSource<'a> {
    directory: &'a Path,
}

impl<'a> CsvSource<'a> {
    pub fn new(directory: &'a Path) -> CsvSource<'a> {
        CsvSource { directory }
    }
}

impl<'a> NetworkSource for CsvSource<'a> {
    fn nodes(&self) -> Result<Vec<NodeRecord>, ImportError> {
        read_records(&self.directory.join("nodes.csv"))
    }

    fn edges(&self) -> Result<Vec<EdgeRecord>, ImportError> {
        read_records(&self.directory.join("edges.csv"))
    }
}

/// Deserialize all rows of a headed CSV file. Empty fields become `None` for optional columns.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(file);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| ImportError::Csv {
            path: path.to_path_buf(),
            source,
        })
}
