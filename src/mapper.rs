//! Mapping from loaded catalogue entries into index messages
//!
//! Plain string fields fall back to `""`. `import_url` keeps its presence: absent
//! stays `None`, any supplied string (including `""`) becomes `Some`.

use crate::loader::{LoadedSchool, RawAdapter};
use crate::schema::{Adapter, AdapterCategory, School};

/// Convert one loaded school into its index message
pub fn map_school(loaded: &LoadedSchool) -> School {
    let entry = &loaded.entry;
    School {
        id: entry.id.clone(),
        name: entry.name.clone().unwrap_or_default(),
        initial: entry.initial.clone().unwrap_or_default(),
        resource_folder: entry.resource_folder.clone(),
        adapters: loaded.adapters.iter().map(map_adapter).collect(),
    }
}

/// Convert one raw adapter into its index message
pub fn map_adapter(raw: &RawAdapter) -> Adapter {
    let category = raw
        .category
        .as_deref()
        .map(AdapterCategory::from_label)
        .unwrap_or(AdapterCategory::Unknown);

    Adapter {
        adapter_id: raw.adapter_id.clone().unwrap_or_default(),
        adapter_name: raw.adapter_name.clone().unwrap_or_default(),
        category: category as i32,
        asset_js_path: raw.asset_js_path.clone().unwrap_or_default(),
        import_url: raw.import_url.clone(),
        description: raw.description.clone().unwrap_or_default(),
        maintainer: raw.maintainer.clone().unwrap_or_default(),
    }
}
