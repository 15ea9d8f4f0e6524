//! Stremio addon surface: manifest, request parsing, stream records and the
//! request handler that ties the pipeline together.

mod handler;
mod manifest;
mod request;
mod stream;

pub use handler::StreamHandler;
pub use manifest::Manifest;
pub use request::{ContentId, ContentType, StreamRequest};
pub use stream::{to_stream, BehaviorHints, Stream, STREAM_NAME};
