//! Finding and downloading Klang releases
//!
//! ```text
//! ReleaseResolver::resolve ── GET <api>/repos/<owner>/<repo>/releases
//!         │                      select release, find asset
//!         ▼
//! ResolvedArtifact { tag, url, size }
//!         │
//!         ▼
//! ArtifactDownloader::download ── stream to temp file, verify size, rename
//! ```

pub mod client;
pub mod download;
pub mod resolver;

pub use download::ArtifactDownloader;
pub use resolver::{
    ReleaseAsset, ReleaseDescriptor, ReleaseQuery, ReleaseResolver, ResolvedArtifact, find_asset,
    parse_releases, select_release,
};
