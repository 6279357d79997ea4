//! Builds shareable portal URLs from session state.

use reqwest::Url;

/// Attach query parameters to the portal's search page URL.
pub fn portal_link(portal_base: &str, params: &[(String, String)]) -> anyhow::Result<String> {
    let url = Url::parse_with_params(portal_base, params)?;
    Ok(url.to_string())
}
