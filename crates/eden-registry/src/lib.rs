//! Region registry preparation: code-field inference, geometry repair,
//! dissolve, equal-area metrics, and the pipeline tying them together.

pub mod dissolve;
pub mod error;
pub mod infer;
pub mod metrics;
pub mod pipeline;
pub mod repair;

pub use dissolve::dissolve_by_uid;
pub use error::{RegistryError, Result};
pub use infer::{FieldScore, pick_code_field, score_columns};
pub use metrics::{DEFAULT_AREA_CRS, DEFAULT_TARGET_CRS, area_km2, native_bounds, reproject};
pub use pipeline::{PrepConfig, Registry, prepare_regions};
pub use repair::{Repaired, RepairStrategy, repair};
