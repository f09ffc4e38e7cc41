use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::auth;
use crate::error::TvstError;
use crate::types::EpisodeId;

const BASE_URL: &str = "https://api.tvshowtime.com/v1";

/// Sent on every request so the service can attribute SDK traffic.
const USER_AGENT: &str = "tvst-rust-sdk/v1";

/// TVShowTime API v1 client.
///
/// Holds the application credentials and, once authenticated, the user's
/// access token. Responses are handed back to the caller as-is; the client
/// never interprets status codes.
pub struct TvstClient {
    client_id: String,
    client_secret: String,
    access_token: Option<String>,
    http: Client,
    base_url: String,
}

impl TvstClient {
    /// Create a client bound to the production endpoint.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, TvstError> {
        Self::with_base_url(client_id, client_secret, BASE_URL)
    }

    /// Create a client bound to an alternate endpoint (staging, tests).
    pub fn with_base_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, TvstError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(TvstError::Config(
                "a client id and client secret are required, \
                 see https://api.tvshowtime.com/doc"
                    .into(),
            ));
        }

        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Url::parse(&base_url)
            .map_err(|e| TvstError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client_id,
            client_secret,
            access_token: None,
            http,
            base_url,
        })
    }

    /// Consent URL to send the user to before [`Self::exchange_code_for_token`].
    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        auth::authorize_url(&self.client_id, redirect_uri)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// On success the token is installed on this client and the parsed
    /// response body is returned unmodified.
    pub async fn exchange_code_for_token(&mut self, code: &str) -> Result<Value, TvstError> {
        ensure_arg("code", code)?;

        tracing::debug!("exchanging authorization code for access token");
        let resp = self
            .request(Method::POST, "/oauth/access_token")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| TvstError::Parse(e.to_string()))?;

        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| TvstError::Auth("could not create access token".into()))?
            .to_owned();

        self.authenticate(&token)?;
        Ok(body)
    }

    /// Install a previously obtained access token.
    ///
    /// Every later request carries `Authorization: token <value>`.
    pub fn authenticate(&mut self, access_token: &str) -> Result<(), TvstError> {
        ensure_arg("access_token", access_token)?;
        self.access_token = Some(access_token.to_owned());
        tracing::info!("TVShowTime session authenticated");
        Ok(())
    }

    /// Whether an access token has been installed.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Fetch the profile of the authenticated user.
    pub async fn get_authenticated_user(&self) -> Result<Response, TvstError> {
        if !self.is_authenticated() {
            return Err(TvstError::Auth("you must authenticate first".into()));
        }

        let resp = self.request(Method::GET, "/user").send().await?;
        Ok(resp)
    }

    // ── Episode lookup ──────────────────────────────────────────────

    pub async fn get_episode_by_filename(&self, filename: &str) -> Result<Response, TvstError> {
        ensure_arg("filename", filename)?;
        self.get_episode(&EpisodeId::Filename(filename.into())).await
    }

    pub async fn get_episode_by_tvdb_id(&self, tvdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("tvdb_id", tvdb_id)?;
        self.get_episode(&EpisodeId::TvdbId(tvdb_id.into())).await
    }

    pub async fn get_episode_by_imdb_id(&self, imdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("imdb_id", imdb_id)?;
        self.get_episode(&EpisodeId::ImdbId(imdb_id.into())).await
    }

    async fn get_episode(&self, episode: &EpisodeId) -> Result<Response, TvstError> {
        let resp = self
            .request(Method::GET, "/episode")
            .query(&[episode.as_param()])
            .send()
            .await?;
        Ok(resp)
    }

    // ── Checkins ────────────────────────────────────────────────────

    pub async fn set_watched_by_filename(
        &self,
        filename: &str,
        ticker_on: bool,
        twitter_on: bool,
    ) -> Result<Response, TvstError> {
        ensure_arg("filename", filename)?;
        self.set_watched(&EpisodeId::Filename(filename.into()), ticker_on, twitter_on)
            .await
    }

    pub async fn set_watched_by_tvdb_id(
        &self,
        tvdb_id: &str,
        ticker_on: bool,
        twitter_on: bool,
    ) -> Result<Response, TvstError> {
        ensure_arg("tvdb_id", tvdb_id)?;
        self.set_watched(&EpisodeId::TvdbId(tvdb_id.into()), ticker_on, twitter_on)
            .await
    }

    pub async fn set_watched_by_imdb_id(
        &self,
        imdb_id: &str,
        ticker_on: bool,
        twitter_on: bool,
    ) -> Result<Response, TvstError> {
        ensure_arg("imdb_id", imdb_id)?;
        self.set_watched(&EpisodeId::ImdbId(imdb_id.into()), ticker_on, twitter_on)
            .await
    }

    async fn set_watched(
        &self,
        episode: &EpisodeId,
        ticker_on: bool,
        twitter_on: bool,
    ) -> Result<Response, TvstError> {
        let (field, value) = episode.as_param();
        let params: Vec<(&str, String)> = vec![
            (field, value.to_owned()),
            ("publish_on_ticker", ticker_on.to_string()),
            ("publish_on_twitter", twitter_on.to_string()),
        ];

        let resp = self
            .request(Method::POST, "/checkin")
            .form(&params)
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn set_unwatched_by_filename(&self, filename: &str) -> Result<Response, TvstError> {
        ensure_arg("filename", filename)?;
        self.set_unwatched(&EpisodeId::Filename(filename.into())).await
    }

    pub async fn set_unwatched_by_tvdb_id(&self, tvdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("tvdb_id", tvdb_id)?;
        self.set_unwatched(&EpisodeId::TvdbId(tvdb_id.into())).await
    }

    pub async fn set_unwatched_by_imdb_id(&self, imdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("imdb_id", imdb_id)?;
        self.set_unwatched(&EpisodeId::ImdbId(imdb_id.into())).await
    }

    async fn set_unwatched(&self, episode: &EpisodeId) -> Result<Response, TvstError> {
        let (field, value) = episode.as_param();

        let resp = self
            .request(Method::DELETE, "/checkin")
            .form(&[(field, value)])
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn is_watched_by_filename(&self, filename: &str) -> Result<Response, TvstError> {
        ensure_arg("filename", filename)?;
        self.is_watched(&EpisodeId::Filename(filename.into())).await
    }

    pub async fn is_watched_by_tvdb_id(&self, tvdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("tvdb_id", tvdb_id)?;
        self.is_watched(&EpisodeId::TvdbId(tvdb_id.into())).await
    }

    pub async fn is_watched_by_imdb_id(&self, imdb_id: &str) -> Result<Response, TvstError> {
        ensure_arg("imdb_id", imdb_id)?;
        self.is_watched(&EpisodeId::ImdbId(imdb_id.into())).await
    }

    async fn is_watched(&self, episode: &EpisodeId) -> Result<Response, TvstError> {
        let resp = self
            .request(Method::GET, "/checkin")
            .query(&[episode.as_param()])
            .send()
            .await?;
        Ok(resp)
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Build a request for `path`, attaching the auth header once a token
    /// is installed.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.access_token {
            req = req.header("Authorization", format!("token {token}"));
        }
        req
    }
}

/// Required arguments must be non-empty; checked before any request is built.
fn ensure_arg(name: &str, value: &str) -> Result<(), TvstError> {
    if value.is_empty() {
        return Err(TvstError::InvalidArgument(format!(
            "'{name}' cannot be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_missing_credentials() {
        assert!(matches!(
            TvstClient::new("", "secret"),
            Err(TvstError::Config(_))
        ));
        assert!(matches!(
            TvstClient::new("id", ""),
            Err(TvstError::Config(_))
        ));
    }

    #[test]
    fn test_with_base_url_rejects_invalid_url() {
        assert!(matches!(
            TvstClient::with_base_url("id", "secret", "not a url"),
            Err(TvstError::Config(_))
        ));
    }

    #[test]
    fn test_authenticate_lifecycle() {
        let mut client = TvstClient::new("id", "secret").unwrap();
        assert!(!client.is_authenticated());

        client.authenticate("abc").unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_authenticate_rejects_empty_token() {
        let mut client = TvstClient::new("id", "secret").unwrap();
        assert!(matches!(
            client.authenticate(""),
            Err(TvstError::InvalidArgument(_))
        ));
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_authorize_url_uses_client_id() {
        let client = TvstClient::new("my-id", "secret").unwrap();
        let url = client.authorize_url("http://localhost:19742");
        assert!(url.contains("client_id=my-id"));
        assert!(url.contains("redirect_uri=http://localhost:19742"));
    }

    #[tokio::test]
    async fn test_empty_identifiers_rejected_without_io() {
        let client = TvstClient::new("id", "secret").unwrap();

        assert!(matches!(
            client.get_episode_by_filename("").await,
            Err(TvstError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.set_watched_by_tvdb_id("", false, false).await,
            Err(TvstError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.set_unwatched_by_imdb_id("").await,
            Err(TvstError::InvalidArgument(_))
        ));
        assert!(matches!(
            client.is_watched_by_filename("").await,
            Err(TvstError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_user_fetch_requires_authentication() {
        let client = TvstClient::new("id", "secret").unwrap();
        assert!(matches!(
            client.get_authenticated_user().await,
            Err(TvstError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_exchange_rejects_empty_code() {
        let mut client = TvstClient::new("id", "secret").unwrap();
        assert!(matches!(
            client.exchange_code_for_token("").await,
            Err(TvstError::InvalidArgument(_))
        ));
        assert!(!client.is_authenticated());
    }
}
