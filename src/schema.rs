//! Index message types
//!
//! The artifact is a proto3 `SchoolIndex` message. The canonical schema lives in
//! `proto/school_index.proto`; the types below mirror it field-for-field and derive
//! their wire codec through `prost`.

use std::fmt;

/// Schema shape version. Bump only when a field is added, removed or renumbered.
pub const PROTOCOL_VERSION: i32 = 1;

/// Category of an adapter script
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum AdapterCategory {
    Unknown = 0,
    BachelorAndAssociate = 1,
    Postgraduate = 2,
    GeneralTool = 3,
}

/// Symbol name to category, matched exactly as written in adapter files.
const CATEGORY_LABELS: &[(&str, AdapterCategory)] = &[
    ("ADAPTER_CATEGORY_UNKNOWN", AdapterCategory::Unknown),
    ("ADAPTER_CATEGORY_BACHELOR_AND_ASSOCIATE", AdapterCategory::BachelorAndAssociate),
    ("ADAPTER_CATEGORY_POSTGRADUATE", AdapterCategory::Postgraduate),
    ("ADAPTER_CATEGORY_GENERAL_TOOL", AdapterCategory::GeneralTool),
];

impl AdapterCategory {
    /// Resolve a category label. Anything not in the table is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        CATEGORY_LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, category)| *category)
            .unwrap_or(AdapterCategory::Unknown)
    }

    /// The proto symbol name for this category
    pub fn label(&self) -> &'static str {
        CATEGORY_LABELS
            .iter()
            .find(|(_, category)| category == self)
            .map(|(name, _)| *name)
            .unwrap_or("ADAPTER_CATEGORY_UNKNOWN")
    }

    /// All known categories, in code order
    pub fn all() -> impl Iterator<Item = AdapterCategory> {
        CATEGORY_LABELS.iter().map(|(_, category)| *category)
    }
}

impl fmt::Display for AdapterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One import adapter belonging to a school
#[derive(Clone, PartialEq, prost::Message)]
pub struct Adapter {
    #[prost(string, tag = "1")]
    pub adapter_id: String,
    #[prost(string, tag = "2")]
    pub adapter_name: String,
    #[prost(enumeration = "AdapterCategory", tag = "3")]
    pub category: i32,
    #[prost(string, tag = "4")]
    pub asset_js_path: String,
    /// Explicit presence: `Some("")` is encoded, `None` is not.
    #[prost(string, optional, tag = "5")]
    pub import_url: Option<String>,
    #[prost(string, tag = "6")]
    pub description: String,
    #[prost(string, tag = "7")]
    pub maintainer: String,
}

/// A school and its adapters
#[derive(Clone, PartialEq, prost::Message)]
pub struct School {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    /// Display grouping key (e.g. pinyin initial)
    #[prost(string, tag = "3")]
    pub initial: String,
    #[prost(string, tag = "4")]
    pub resource_folder: String,
    #[prost(message, repeated, tag = "5")]
    pub adapters: Vec<Adapter>,
}

/// Root of the artifact
#[derive(Clone, PartialEq, prost::Message)]
pub struct SchoolIndex {
    #[prost(int32, tag = "1")]
    pub protocol_version: i32,
    #[prost(string, tag = "2")]
    pub version_id: String,
    #[prost(message, repeated, tag = "3")]
    pub schools: Vec<School>,
}

impl SchoolIndex {
    /// Total number of adapters across all schools
    pub fn adapter_count(&self) -> usize {
        self.schools.iter().map(|s| s.adapters.len()).sum()
    }
}
