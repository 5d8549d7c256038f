pub mod aoi;
pub mod error;
pub mod loader;

pub use aoi::aoi_from_catalog;
pub use error::{CatalogError, Result};
pub use loader::{Catalog, Selection, load_catalog, select_regions};
