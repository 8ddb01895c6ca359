use chrono::Utc;

use super::{GatewayError, SmartcarClient};
use crate::types::Token;

impl SmartcarClient {
    /// Constructs the Smartcar Connect authorization URL.
    ///
    /// Pure function of the configuration: the same client always returns
    /// the same URL. In sandbox mode the URL asks Connect for simulated
    /// vehicles (`mode=test`).
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.build_authorization_url();
    /// // https://connect.smartcar.com/oauth/authorize?response_type=code&client_id=...
    /// ```
    pub fn build_authorization_url(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("mode", self.mode.connect_param());
        url.into()
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Posts the code to the token endpoint using HTTP basic authentication
    /// with the client credentials.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Exchange`] when the request cannot be sent,
    /// when Smartcar rejects the code (invalid, expired or already used), or
    /// when the token response cannot be parsed.
    pub async fn request_token(&self, code: &str) -> Result<Token, GatewayError> {
        let res = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::exchange(Some(e.to_string())))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| GatewayError::exchange(Some(e.to_string())))?;

        if !status.is_success() {
            return Err(GatewayError::exchange(super::parse_upstream_message(&body)));
        }

        let mut token: Token = serde_json::from_str(&body)
            .map_err(|e| GatewayError::exchange(Some(format!("Unexpected token response: {e}"))))?;
        token.obtained_at = Utc::now().timestamp() as u64;

        Ok(token)
    }
}
