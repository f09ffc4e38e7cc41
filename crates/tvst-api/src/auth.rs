//! OAuth plumbing that is not client state.
//!
//! TVShowTime uses the Authorization Code Grant: send the user to the
//! consent page, receive `?code=...` on the redirect URI, then exchange the
//! code via [`crate::TvstClient::exchange_code_for_token`].

const AUTH_URL: &str = "https://www.tvshowtime.com/oauth/authorize";

/// Build the user-facing consent URL for the Authorization Code Grant.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    format!("{AUTH_URL}?client_id={client_id}&redirect_uri={redirect_uri}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_shape() {
        let url = authorize_url("my-id", "http://localhost:19742");
        assert_eq!(
            url,
            "https://www.tvshowtime.com/oauth/authorize\
             ?client_id=my-id&redirect_uri=http://localhost:19742"
        );
    }
}
