//! Flash messages carried through a redirect, and dashboard paths.

use axum::response::Redirect;
use serde::Deserialize;
use url::Url;
use url::form_urlencoded;

use iotfleet_app::flash::{Flash, FlashLevel};

/// The `flash` / `level` pair read back from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub flash: Option<String>,
    pub level: Option<String>,
}

impl FlashQuery {
    /// The flash to show, if any. An unknown level is shown as an error.
    #[must_use]
    pub fn into_flash(self) -> Option<Flash> {
        let message = self.flash.filter(|m| !m.trim().is_empty())?;
        let level = self
            .level
            .and_then(|level| level.parse().ok())
            .unwrap_or(FlashLevel::Error);
        Some(Flash { level, message })
    }
}

/// Redirect to `path` with `flash` appended to the query string.
#[must_use]
pub fn redirect_with_flash(path: &str, flash: &Flash) -> Redirect {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("flash", &flash.message)
        .append_pair("level", flash.level.as_str())
        .finish();
    Redirect::to(&format!("{path}?{query}"))
}

/// Absolute dashboard path built from percent-encoded segments.
#[must_use]
pub fn path(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://dashboard/") else {
        return String::from("/");
    };
    if let Ok(mut parts) = url.path_segments_mut() {
        parts.clear().extend(segments);
    }
    url.path().to_string()
}
