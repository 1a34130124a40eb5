//! Dataset classification: what kind of geospatial payload the user picked
//! and which integer code the validation service expects for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use anyhow::Result;

/// Top-level dataset kind selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Vector,
    Raster,
    Geoservice,
}

impl DatasetKind {
    /// Stable lowercase segment used in object keys.
    pub fn key_segment(&self) -> &'static str {
        match self {
            DatasetKind::Vector => "vector",
            DatasetKind::Raster => "raster",
            DatasetKind::Geoservice => "geoservice",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_segment())
    }
}

/// Dataset subtype. Vector and raster subtypes map to a stable integer
/// `data_type` code consumed by the validation service; geoservice subtypes
/// carry no code because no upload takes place for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSubtype {
    Gdb,
    Polygon,
    Line,
    Point,
    DigitalTerrainModel,
    Orthoimage,
    Wfs,
    Wms,
    Wmts,
}

impl DatasetSubtype {
    pub fn kind(&self) -> DatasetKind {
        match self {
            DatasetSubtype::Gdb
            | DatasetSubtype::Polygon
            | DatasetSubtype::Line
            | DatasetSubtype::Point => DatasetKind::Vector,
            DatasetSubtype::DigitalTerrainModel | DatasetSubtype::Orthoimage => DatasetKind::Raster,
            DatasetSubtype::Wfs | DatasetSubtype::Wms | DatasetSubtype::Wmts => {
                DatasetKind::Geoservice
            }
        }
    }

    /// The `data_type` code sent to the validation service.
    ///
    /// Codes are stable; do not renumber. Geoservice subtypes return `None`.
    pub fn data_type_code(&self) -> Option<i32> {
        match self {
            DatasetSubtype::Gdb => Some(1),
            DatasetSubtype::Polygon => Some(2),
            DatasetSubtype::Line => Some(3),
            DatasetSubtype::Point => Some(4),
            DatasetSubtype::DigitalTerrainModel => Some(5),
            DatasetSubtype::Orthoimage => Some(6),
            DatasetSubtype::Wfs | DatasetSubtype::Wms | DatasetSubtype::Wmts => None,
        }
    }

    /// Stable lowercase segment used in object keys.
    pub fn key_segment(&self) -> &'static str {
        match self {
            DatasetSubtype::Gdb => "gdb",
            DatasetSubtype::Polygon => "polygon",
            DatasetSubtype::Line => "line",
            DatasetSubtype::Point => "point",
            DatasetSubtype::DigitalTerrainModel => "dtm",
            DatasetSubtype::Orthoimage => "orthoimage",
            DatasetSubtype::Wfs => "wfs",
            DatasetSubtype::Wms => "wms",
            DatasetSubtype::Wmts => "wmts",
        }
    }
}

impl fmt::Display for DatasetSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_segment())
    }
}

impl FromStr for DatasetSubtype {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gdb" => Ok(DatasetSubtype::Gdb),
            "polygon" => Ok(DatasetSubtype::Polygon),
            "line" => Ok(DatasetSubtype::Line),
            "point" => Ok(DatasetSubtype::Point),
            "dtm" | "digital_terrain_model" => Ok(DatasetSubtype::DigitalTerrainModel),
            "orthoimage" => Ok(DatasetSubtype::Orthoimage),
            "wfs" => Ok(DatasetSubtype::Wfs),
            "wms" => Ok(DatasetSubtype::Wms),
            "wmts" => Ok(DatasetSubtype::Wmts),
            _ => Err(anyhow::anyhow!("Unknown dataset subtype: {}", s)),
        }
    }
}

/// Logical address of an uploaded dataset or bundle: `s3://{bucket}/{key}`.
///
/// For a bundle this is the key prefix shared by every member, not a single
/// object key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageUri(pub String);

impl StorageUri {
    pub fn new(bucket: &str, key: &str) -> Self {
        StorageUri(format!("s3://{}/{}", bucket, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_kind_mapping() {
        assert_eq!(DatasetSubtype::Gdb.kind(), DatasetKind::Vector);
        assert_eq!(DatasetSubtype::Point.kind(), DatasetKind::Vector);
        assert_eq!(
            DatasetSubtype::DigitalTerrainModel.kind(),
            DatasetKind::Raster
        );
        assert_eq!(DatasetSubtype::Wms.kind(), DatasetKind::Geoservice);
    }

    #[test]
    fn test_geoservice_subtypes_have_no_code() {
        assert_eq!(DatasetSubtype::Wfs.data_type_code(), None);
        assert_eq!(DatasetSubtype::Wms.data_type_code(), None);
        assert_eq!(DatasetSubtype::Wmts.data_type_code(), None);
    }

    #[test]
    fn test_uploadable_subtypes_have_distinct_codes() {
        let codes: Vec<i32> = [
            DatasetSubtype::Gdb,
            DatasetSubtype::Polygon,
            DatasetSubtype::Line,
            DatasetSubtype::Point,
            DatasetSubtype::DigitalTerrainModel,
            DatasetSubtype::Orthoimage,
        ]
        .iter()
        .filter_map(|s| s.data_type_code())
        .collect();

        assert_eq!(codes.len(), 6);
        let mut deduped = codes.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }

    #[test]
    fn test_subtype_from_str() {
        assert_eq!(
            "gdb".parse::<DatasetSubtype>().unwrap(),
            DatasetSubtype::Gdb
        );
        assert_eq!(
            "DTM".parse::<DatasetSubtype>().unwrap(),
            DatasetSubtype::DigitalTerrainModel
        );
        assert!("shapefile".parse::<DatasetSubtype>().is_err());
    }

    #[test]
    fn test_storage_uri_format() {
        let uri = StorageUri::new("datasets", "files/vector/gdb/17_data.gdb");
        assert_eq!(uri.as_str(), "s3://datasets/files/vector/gdb/17_data.gdb");
    }
}
