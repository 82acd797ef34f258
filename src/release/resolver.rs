//! Release lookup through the GitHub releases API.
//!
//! The API lists releases most recent first, pre-releases included. By default
//! the first entry is taken as the latest; [`ReleaseSelection::HighestSemver`]
//! compares tags instead.

use super::client::api_client;
use crate::config::{NetworkConfig, ReleaseConfig, ReleaseSelection};
use crate::core::{LoomError, Result};
use serde::Deserialize;

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// A release as returned by the API. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseDescriptor {
    #[serde(rename = "tag_name")]
    pub tag: String,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Which release the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleaseQuery {
    /// The latest release according to the configured [`ReleaseSelection`].
    #[default]
    Latest,
    /// A specific tag; a leading `v` is optional.
    Tag(String),
}

impl ReleaseQuery {
    /// `Tag` when `tag` is given, `Latest` otherwise.
    #[must_use]
    pub fn from_option(tag: Option<String>) -> Self {
        tag.map_or(Self::Latest, Self::Tag)
    }
}

/// The artifact chosen for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Tag of the selected release.
    pub tag: String,
    /// Whether the release is marked as a pre-release.
    pub prerelease: bool,
    /// Asset file name.
    pub name: String,
    /// Download URL of the asset.
    pub url: String,
    /// Size advertised by the API, if any.
    pub size: Option<u64>,
}

/// Decodes a release listing.
///
/// # Errors
///
/// Returns [`LoomError::ParseError`] if `body` is not a JSON array of releases.
pub fn parse_releases(body: &str) -> Result<Vec<ReleaseDescriptor>> {
    serde_json::from_str(body).map_err(|e| LoomError::ParseError {
        what: "release listing".to_string(),
        reason: e.to_string(),
    })
}

fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Picks the release to install from a non-empty listing.
///
/// # Errors
///
/// - [`LoomError::NoReleases`] if `releases` is empty
/// - [`LoomError::ReleaseNotFound`] if a requested tag is missing
pub fn select_release<'a>(
    releases: &'a [ReleaseDescriptor],
    query: &ReleaseQuery,
    selection: ReleaseSelection,
    repository: &str,
) -> Result<&'a ReleaseDescriptor> {
    let first = releases.first().ok_or_else(|| LoomError::NoReleases {
        repository: repository.to_string(),
    })?;

    match query {
        ReleaseQuery::Tag(tag) => releases
            .iter()
            .find(|release| strip_v(&release.tag) == strip_v(tag))
            .ok_or_else(|| LoomError::ReleaseNotFound {
                tag: tag.clone(),
            }),
        ReleaseQuery::Latest => match selection {
            ReleaseSelection::First => Ok(first),
            ReleaseSelection::HighestSemver => Ok(highest_semver(releases).unwrap_or(first)),
        },
    }
}

fn highest_semver(releases: &[ReleaseDescriptor]) -> Option<&ReleaseDescriptor> {
    let mut best: Option<(semver::Version, &ReleaseDescriptor)> = None;
    for release in releases {
        let Ok(version) = semver::Version::parse(strip_v(&release.tag)) else {
            tracing::debug!("ignoring non-semver tag {}", release.tag);
            continue;
        };
        match &best {
            Some((current, _)) if *current >= version => {}
            _ => best = Some((version, release)),
        }
    }
    best.map(|(_, release)| release)
}

/// Finds the asset named exactly `asset` in `release`.
///
/// # Errors
///
/// Returns [`LoomError::AssetNotFound`] naming the release tag.
pub fn find_asset<'a>(release: &'a ReleaseDescriptor, asset: &str) -> Result<&'a ReleaseAsset> {
    release.assets.iter().find(|a| a.name == asset).ok_or_else(|| LoomError::AssetNotFound {
        asset: asset.to_string(),
        tag: release.tag.clone(),
    })
}

/// Resolves the download URL of the Klang artifact.
pub struct ReleaseResolver<'a> {
    release: &'a ReleaseConfig,
    network: &'a NetworkConfig,
}

impl<'a> ReleaseResolver<'a> {
    #[must_use]
    pub const fn new(release: &'a ReleaseConfig, network: &'a NetworkConfig) -> Self {
        Self {
            release,
            network,
        }
    }

    /// Fetches the release listing.
    ///
    /// # Errors
    ///
    /// - [`LoomError::NetworkError`] on transport failure, timeout or a status other than 200
    /// - [`LoomError::ParseError`] if the body is not a release listing
    pub async fn fetch(&self) -> Result<Vec<ReleaseDescriptor>> {
        let url = self.release.releases_url();
        tracing::debug!("fetching releases from {url}");

        let response = api_client(self.network)?
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| LoomError::network("fetch the release list", e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(LoomError::network(
                "fetch the release list",
                format!("HTTP status {status} from {url}"),
            ));
        }

        let body =
            response.text().await.map_err(|e| LoomError::network("read the release list", e))?;
        parse_releases(&body)
    }

    /// Fetches the listing and selects the artifact matching `query`.
    ///
    /// # Errors
    ///
    /// Any error of [`fetch`](Self::fetch), [`select_release`] or [`find_asset`].
    pub async fn resolve(&self, query: &ReleaseQuery) -> Result<ResolvedArtifact> {
        let releases = self.fetch().await?;
        let release =
            select_release(&releases, query, self.release.selection, &self.release.repository())?;
        let asset = find_asset(release, &self.release.asset)?;
        tracing::info!("selected {} from release {}", asset.name, release.tag);

        Ok(ResolvedArtifact {
            tag: release.tag.clone(),
            prerelease: release.prerelease,
            name: asset.name.clone(),
            url: asset.download_url.clone(),
            size: asset.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockResponse, MockServer};

    const LISTING: &str = r#"[
        {"tag_name": "v2", "prerelease": true, "assets": [
            {"name": "klang.jar", "browser_download_url": "U2", "size": 10}
        ]},
        {"tag_name": "v1", "assets": [
            {"name": "klang.jar", "browser_download_url": "U1"}
        ]}
    ]"#;

    fn latest(releases: &[ReleaseDescriptor]) -> Result<&ReleaseDescriptor> {
        select_release(releases, &ReleaseQuery::Latest, ReleaseSelection::First, "o/r")
    }

    #[test]
    fn test_first_release_is_latest() {
        let releases = parse_releases(LISTING).unwrap();
        let release = latest(&releases).unwrap();
        assert_eq!(release.tag, "v2");
        assert!(release.prerelease);
        assert_eq!(find_asset(release, "klang.jar").unwrap().download_url, "U2");
    }

    #[test]
    fn test_missing_asset_names_tag() {
        let releases = parse_releases(
            r#"[{"tag_name": "v3", "assets": [{"name": "klang.jar.sha256", "browser_download_url": "x"}]}]"#,
        )
        .unwrap();
        let err = find_asset(&releases[0], "klang.jar").unwrap_err();
        assert_eq!(err.to_string(), "klang.jar not found in release v3");
    }

    #[test]
    fn test_empty_listing() {
        let releases = parse_releases("[]").unwrap();
        assert!(matches!(latest(&releases), Err(LoomError::NoReleases { .. })));
    }

    #[test]
    fn test_malformed_listing() {
        assert!(matches!(parse_releases("{\"message\": 1}"), Err(LoomError::ParseError { .. })));
        assert!(matches!(parse_releases("<html>"), Err(LoomError::ParseError { .. })));
    }

    #[test]
    fn test_explicit_tag_ignores_v_prefix() {
        let releases = parse_releases(LISTING).unwrap();
        let query = ReleaseQuery::Tag("1".to_string());
        let release = select_release(&releases, &query, ReleaseSelection::First, "o/r").unwrap();
        assert_eq!(release.tag, "v1");

        let query = ReleaseQuery::Tag("v9".to_string());
        let err = select_release(&releases, &query, ReleaseSelection::First, "o/r").unwrap_err();
        assert!(matches!(err, LoomError::ReleaseNotFound { tag } if tag == "v9"));
    }

    #[test]
    fn test_highest_semver_selection() {
        let releases = parse_releases(
            r#"[
                {"tag_name": "nightly", "assets": []},
                {"tag_name": "v0.9.0", "assets": []},
                {"tag_name": "v0.10.0", "assets": []},
                {"tag_name": "v0.10.0-rc.1", "assets": []}
            ]"#,
        )
        .unwrap();
        let release = select_release(
            &releases,
            &ReleaseQuery::Latest,
            ReleaseSelection::HighestSemver,
            "o/r",
        )
        .unwrap();
        assert_eq!(release.tag, "v0.10.0");
    }

    #[test]
    fn test_highest_semver_falls_back_to_first() {
        let releases =
            parse_releases(r#"[{"tag_name": "nightly"}, {"tag_name": "stable"}]"#).unwrap();
        let release = select_release(
            &releases,
            &ReleaseQuery::Latest,
            ReleaseSelection::HighestSemver,
            "o/r",
        )
        .unwrap();
        assert_eq!(release.tag, "nightly");
    }

    fn config_for(server: &MockServer) -> ReleaseConfig {
        ReleaseConfig {
            api_url: server.url(""),
            ..ReleaseConfig::default()
        }
    }

    #[tokio::test]
    async fn test_resolve_against_server() {
        let server = MockServer::start();
        server.mock("/repos/KlangLang/Klang/releases", MockResponse::json(LISTING));

        let release = config_for(&server);
        let network = NetworkConfig::default();
        let artifact =
            ReleaseResolver::new(&release, &network).resolve(&ReleaseQuery::Latest).await.unwrap();
        assert_eq!(artifact.tag, "v2");
        assert_eq!(artifact.url, "U2");
        assert_eq!(artifact.size, Some(10));
    }

    #[tokio::test]
    async fn test_resolve_non_200_is_network_error() {
        let server = MockServer::start();
        server.mock("/repos/KlangLang/Klang/releases", MockResponse::status(403));

        let release = config_for(&server);
        let network = NetworkConfig::default();
        let err = ReleaseResolver::new(&release, &network)
            .resolve(&ReleaseQuery::Latest)
            .await
            .unwrap_err();
        assert!(matches!(err, LoomError::NetworkError { .. }));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_resolve_unreachable_is_network_error() {
        let release = ReleaseConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..ReleaseConfig::default()
        };
        let network = NetworkConfig {
            api_timeout_secs: 2,
            connect_timeout_secs: 2,
            ..NetworkConfig::default()
        };
        let err = ReleaseResolver::new(&release, &network).fetch().await.unwrap_err();
        assert!(matches!(err, LoomError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_silent_api_times_out() {
        let server = MockServer::start();
        server.mock(
            "/repos/KlangLang/Klang/releases",
            MockResponse::stall(std::time::Duration::from_secs(30)),
        );

        let release = config_for(&server);
        let network = NetworkConfig {
            api_timeout_secs: 1,
            ..NetworkConfig::default()
        };
        let started = std::time::Instant::now();
        let err = ReleaseResolver::new(&release, &network).fetch().await.unwrap_err();

        assert!(matches!(err, LoomError::NetworkError { .. }));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
