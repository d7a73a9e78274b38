use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, io, path::Path, sync::Arc};
use thiserror::Error;

pub type Amount = f64;

/// Stable identity of a catalog entry
///
/// Assigned once, when the catalog is loaded, from the record's position in
/// the source collection. Never recomputed afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(usize);

impl VehicleId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub year: u32,
    pub mileage: u64,
    pub engine_size: String,
    pub fuel: String,
    pub starting_bid: Amount,
    pub auction_date_time: String,
    /// Only read once, to seed the favourites
    #[serde(default)]
    pub favourite: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: VehicleId,
    pub vehicle: VehicleRecord,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read dataset")]
    Io(#[from] io::Error),
    #[error("malformed dataset")]
    Json(#[from] serde_json::Error),
}

/// The immutable collection of listings, in source order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

pub type SharedCatalog = Arc<Catalog>;

impl Catalog {
    pub fn new(records: Vec<VehicleRecord>) -> Self {
        Self {
            entries: records
                .into_iter()
                .enumerate()
                .map(|(i, vehicle)| CatalogEntry {
                    id: VehicleId::new(i),
                    vehicle,
                })
                .collect(),
        }
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, CatalogError> {
        let records: Vec<VehicleRecord> = serde_json::from_reader(reader)?;
        Ok(Self::new(records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)
            .map_err(CatalogError::from)
            .with_context(|| format!("opening {}", path.display()))?;
        Self::from_reader(io::BufReader::new(file))
            .with_context(|| format!("loading {}", path.display()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: VehicleId) -> Option<&CatalogEntry> {
        self.entries.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
