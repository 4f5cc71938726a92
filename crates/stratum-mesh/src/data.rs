//! Named attribute arrays attached to points or cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratum_math::Vec3;

/// A typed attribute array with one tuple per point or cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataArray {
    /// One float per tuple.
    Scalar(Vec<f64>),
    /// One 3-vector per tuple.
    Vector(Vec<Vec3>),
    /// One integer per tuple, used for tags and ids.
    Int(Vec<i32>),
}

impl DataArray {
    /// Number of tuples.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(v) => v.len(),
            Self::Vector(v) => v.len(),
            Self::Int(v) => v.len(),
        }
    }

    /// Whether the array has no tuples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the tuple layout, for error messages.
    pub fn layout(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Vector(_) => "vector",
            Self::Int(_) => "int",
        }
    }

    /// Borrow as scalars.
    pub fn as_scalars(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Borrow as 3-vectors.
    pub fn as_vectors(&self) -> Option<&[Vec3]> {
        match self {
            Self::Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Borrow as integers.
    pub fn as_ints(&self) -> Option<&[i32]> {
        match self {
            Self::Int(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// A collection of named arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    arrays: BTreeMap<String, DataArray>,
}

impl FieldData {
    /// Look up an array by name.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.get(name)
    }

    /// Iterate over `(name, array)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataArray)> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v))
    }

    // Length checks are the owning mesh's job.
    pub(crate) fn insert(&mut self, name: String, array: DataArray) -> Option<DataArray> {
        self.arrays.insert(name, array)
    }
}
