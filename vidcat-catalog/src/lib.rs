//! Video catalog data model types, CSV line codec, and YAML seed loading.
//!
//! This crate defines the catalog data model without any database
//! dependencies. Consumers can use these types directly for serialization,
//! display, or passing to `vidcat-db` for persistence.

pub mod csv_line;
pub mod types;
pub mod vimeo;
pub mod yaml;

pub use csv_line::{
    MULTI_VALUE_SEPARATOR, SourceRecord, UTF8_BOM, detect_separator, is_supported_separator,
    join_multi_value, parse_line, split_multi_value, split_records,
};
pub use types::*;
pub use vimeo::{PLACEHOLDER_THUMBNAIL, extract_vimeo_id, thumbnail_url};
pub use yaml::{SeedData, YamlError, load_list, load_seed};
