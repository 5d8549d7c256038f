//! Writers for the finished registry: the layered geometry store, the flat
//! bounds table, and the optional QA export.

pub mod bounds;
pub mod error;
pub mod qa;
pub mod store;

pub use bounds::{BOUNDS_COLUMNS, aoi_from_bounds, read_bounds, write_bounds};
pub use error::{OutputError, Result};
pub use qa::write_qa;
pub use store::{LayerEntry, STORE_MANIFEST, STORE_VERSION, StoreManifest, load_manifest, write_layer};
