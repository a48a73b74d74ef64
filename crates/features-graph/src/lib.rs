//! RDF graph access for the OGC API - Features service.
//!
//! Provides the [`TripleSource`] abstraction with an in-memory
//! implementation, RDF file loading, the [`GraphProjector`] that turns a
//! node's neighbourhood into display-ready properties, bbox filtering of
//! feature members and serialization to the RDF media types.

pub mod error;
pub mod labels;
pub mod loader;
pub mod prefixes;
pub mod projector;
pub mod serialize;
pub mod spatial;
pub mod store;
pub mod vocab;

pub use error::{SerializeError, SerializeResult, StoreError, StoreResult};
pub use labels::{feature_class_label, label_for, term_label};
pub use loader::{load_file, load_reader, load_str, RdfFormat};
pub use prefixes::PrefixMap;
pub use projector::{
    BlankNodeGroup, GraphProjector, ObjectValue, ProjectionRow, PropertyEntry, RawProjection,
};
pub use serialize::serialize;
pub use spatial::filter_members;
pub use store::{iri_subject, term_as_subject, term_is, MemoryStore, TripleSource};

// Re-exported so callers can build graphs without a direct oxrdf dependency.
pub use oxrdf;
