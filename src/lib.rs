mod error;
mod gazetteer;
mod portal;
mod request;
mod resolver;
mod sampling;
mod types;
mod validator;

pub use error::AfrigridError;
pub use portal::Afrigrid;

pub use gazetteer::error::GazetteerError;
pub use gazetteer::lookup::AdminGazetteer;
pub use gazetteer::place_index::{Place, PlaceIndex, PlaceLevel};

pub use resolver::Selection;

pub use sampling::extractor::{extract_locations, ExtractOptions, Extraction, ExtractionSummary};
pub use sampling::grid::{grid_spacing_for, sample_multi_polygon, sample_polygon, SamplingConfig};

pub use request::{FetchPlan, Period};

pub use types::geometry::{AttributeValue, Feature, Geometry, GeometryKind};
pub use types::location::{LatLon, NamedLocation};
pub use types::sampling_point::SamplingPoint;

pub use validator::{validate_locations, BoundsReport, GeoBounds};
