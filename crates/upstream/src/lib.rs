//! Collaborator services used by the copycheck pipeline.
//!
//! Two capabilities, each an async trait with an HTTP adapter and an
//! in-process stand-in:
//!
//! | trait | HTTP | in-process |
//! |---|---|---|
//! | [`BlobFetcher`] | [`HttpBlobFetcher`] | [`InMemoryBlobStore`] |
//! | [`Renderer`] | [`HttpRenderer`] | [`StaticRenderer`] |
//!
//! Every call resolves to `Result<T, UpstreamError>`, where the error tells a
//! missing resource, an unreachable service and a non-success answer apart.
//! Nothing retries; that is left to the caller.

mod blob;
mod client;
mod error;
mod render;

pub use crate::blob::{BlobFetcher, HttpBlobFetcher, InMemoryBlobStore};
pub use crate::error::UpstreamError;
pub use crate::render::{
    HttpRenderer, ImageFormat, IntensityScale, RenderOptions, RenderOverrides, RenderedImage,
    Renderer, StaticRenderer, MAX_DIMENSION,
};
pub use bytes::Bytes;
