//! Mouth-region geometry: landmark types, point extraction, stabilization.
//!
//! # Pipeline position
//!
//! ```text
//! detector callback → extract_points (lip subset, deduped, ordered)
//!                   → EmaSmoother            (live overlay only)
//!                   → SimilarityTransform    (render time only)
//! ```
//!
//! Everything here is pure geometry: no session state, no timestamps.

pub mod extract;
pub mod landmark;
pub mod stabilize;

pub use extract::{bounding_box, centroid, connector_indices, extract_points};
pub use landmark::{
    Landmark, FACE_MESH_LANDMARKS, LIP_CONNECTIONS, MOUTH_CORNER_LEFT, MOUTH_CORNER_RIGHT,
};
pub use stabilize::{EmaSmoother, SimilarityTransform};
