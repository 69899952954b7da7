//! Extractors that reject with the shared JSON error bodies.

pub mod id_path;
pub mod optional_json;
pub mod validated_json;

pub use id_path::IdPath;
pub use optional_json::OptionalJson;
pub use validated_json::ValidatedJson;
