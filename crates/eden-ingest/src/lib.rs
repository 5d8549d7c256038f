pub mod error;
pub mod source;

pub use error::{IngestError, Result};
pub use source::read_polygon_source;
