use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

lazy_static! {
    /// Google Maps share URLs, long and short forms
    static ref GOOGLE_MAPS_URL_RE: Regex = Regex::new(
        r"(?i)^https?://(?:(?:www\.)?google\.(?:com|com?\.[a-z]{2}|[a-z]{2})/maps|maps\.google\.(?:com|com?\.[a-z]{2}|[a-z]{2})(?:[/?#]|$)|maps\.app\.goo\.gl/|goo\.gl/maps/)"
    )
    .unwrap();

    static ref SHORT_LINK_RE: Regex =
        Regex::new(r"(?i)^https?://(?:maps\.app\.goo\.gl|goo\.gl/maps)/").unwrap();

    /// Place pin data: "!3d-7.31!4d109.22" (most precise, checked first)
    static ref PIN_RE: Regex = Regex::new(r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)").unwrap();

    /// Viewport centre: "/@-7.31,109.22,15z"
    static ref AT_RE: Regex = Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)").unwrap();

    /// Query parameters: "?q=-7.31,109.22", "query=", "ll=", "center="
    static ref QUERY_RE: Regex = Regex::new(
        r"[?&](?:q|query|ll|center|destination)=(-?\d+(?:\.\d+)?)(?:,|%2C)\s*(-?\d+(?:\.\d+)?)"
    )
    .unwrap();
}

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("Bukan URL Google Maps yang valid")]
    NotGoogleMaps,

    #[error("Koordinat tidak ditemukan pada URL")]
    NoCoordinates,

    #[error("Failed to resolve short link: {0}")]
    Resolve(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Cheap pre-check before any network call
pub fn is_google_maps_url(url: &str) -> bool {
    GOOGLE_MAPS_URL_RE.is_match(url.trim())
}

fn parse_pair(lat: &str, lng: &str) -> Option<Coordinates> {
    Coordinates::new(lat.parse().ok()?, lng.parse().ok()?)
}

/// Pull coordinates out of an expanded Google Maps URL
pub fn extract_coordinates(url: &str) -> Option<Coordinates> {
    [&*PIN_RE, &*AT_RE, &*QUERY_RE].iter().find_map(|re| {
        re.captures_iter(url)
            .find_map(|caps| parse_pair(&caps[1], &caps[2]))
    })
}

/// Resolves Google Maps share links to coordinates, following short-link redirects
pub struct CoordinateResolver {
    client: reqwest::Client,
}

impl CoordinateResolver {
    pub fn new() -> Result<Self, MapsError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; DesaPortal/0.1)")
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MapsError::Resolve(e.to_string()))?;

        Ok(Self { client })
    }

    pub async fn resolve(&self, url: &str) -> Result<Coordinates, MapsError> {
        let url = url.trim();
        if !is_google_maps_url(url) {
            return Err(MapsError::NotGoogleMaps);
        }

        if let Some(coordinates) = extract_coordinates(url) {
            return Ok(coordinates);
        }

        if !SHORT_LINK_RE.is_match(url) {
            return Err(MapsError::NoCoordinates);
        }

        let expanded = self.expand(url).await?;
        tracing::debug!("Expanded maps short link {} -> {}", url, expanded);

        extract_coordinates(&expanded).ok_or(MapsError::NoCoordinates)
    }

    async fn expand(&self, url: &str) -> Result<String, MapsError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Failed to expand maps link {}: {}", url, e);
            MapsError::Resolve(e.to_string())
        })?;

        Ok(response.url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_maps_precheck() {
        assert!(is_google_maps_url(
            "https://www.google.com/maps/place/Curug+Cipendok/@-7.33,109.1,15z"
        ));
        assert!(is_google_maps_url("https://maps.app.goo.gl/AbCdEf123"));
        assert!(is_google_maps_url("https://goo.gl/maps/xyz"));
        assert!(is_google_maps_url("https://maps.google.co.id/?q=-7.3,109.2"));
        assert!(!is_google_maps_url("https://www.openstreetmap.org/#map=15/-7.3/109.2"));
        assert!(!is_google_maps_url("google.com/maps"));
    }

    #[test]
    fn test_lookalike_hosts_rejected() {
        assert!(is_google_maps_url("https://www.google.co.id/maps/@-7.3,109.2,15z"));
        assert!(is_google_maps_url("https://maps.google.com"));
        assert!(!is_google_maps_url("https://google.evil.com/maps"));
        assert!(!is_google_maps_url("https://maps.google.attacker.io/?q=-7.3,109.2"));
        assert!(!is_google_maps_url("https://maps.google.com.evil.io/"));
        assert!(!is_google_maps_url("https://www.google.com.evil.io/maps"));
    }

    #[test]
    fn test_extract_from_at_segment() {
        let c = extract_coordinates(
            "https://www.google.com/maps/place/Baturraden/@-7.3127,109.2285,15z/data=abc",
        )
        .unwrap();
        assert_eq!(c, Coordinates::new(-7.3127, 109.2285).unwrap());
    }

    #[test]
    fn test_pin_is_preferred_over_viewport() {
        let c = extract_coordinates(
            "https://www.google.com/maps/place/X/@-7.30,109.20,14z/data=!3m1!4b1!4m6!3m5!1s0x0:0x0!8m2!3d-7.3351!4d109.1012",
        )
        .unwrap();
        assert_eq!(c.latitude, -7.3351);
        assert_eq!(c.longitude, 109.1012);
    }

    #[test]
    fn test_extract_from_query_parameter() {
        let c = extract_coordinates("https://maps.google.com/?q=-7.25,109.3").unwrap();
        assert_eq!(c, Coordinates::new(-7.25, 109.3).unwrap());

        let encoded =
            extract_coordinates("https://www.google.com/maps/search/?api=1&query=-7.25%2C109.3")
                .unwrap();
        assert_eq!(encoded.longitude, 109.3);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        assert!(extract_coordinates("https://www.google.com/maps/@95.0,200.0,15z").is_none());
        assert!(Coordinates::new(-91.0, 0.0).is_none());
    }

    #[tokio::test]
    async fn test_resolve_rejects_non_maps_url_without_network() {
        let resolver = CoordinateResolver::new().unwrap();
        let err = resolver
            .resolve("https://example.com/@-7.3,109.2")
            .await
            .unwrap_err();
        assert!(matches!(err, MapsError::NotGoogleMaps));
    }

    #[tokio::test]
    async fn test_resolve_long_url_without_network() {
        let resolver = CoordinateResolver::new().unwrap();
        let c = resolver
            .resolve("https://www.google.com/maps/@-7.3127,109.2285,17z")
            .await
            .unwrap();
        assert_eq!(c.latitude, -7.3127);
    }
}
