//! Dynamic client registration and password-grant token exchange.
//!
//! Talks to the authorization server through the [`Transport`] seam so the
//! resolver state machine is testable without a network. Failures are never
//! retried: repeated wrong-credential submissions against an authorization
//! server risk account lockout.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{AuthError, Result};

/// Minimal HTTP POST surface the OAuth flows need.
///
/// `post` blocks the calling thread; no timeout is enforced beyond the
/// transport default.
pub trait Transport {
    fn post(&self, url: &str, headers: &[(&str, String)], body: String) -> Result<Response>;
}

/// A transport-level response: status and raw body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Blocking reqwest-backed transport. Management planes routinely run on
/// self-signed certificates, so verification is relaxed.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| AuthError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, headers: &[(&str, String)], body: String) -> Result<Response> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request
            .send()
            .map_err(|e| AuthError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| AuthError::Connection(e.to_string()))?;
        Ok(Response { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct RegistrationResponse {
    #[serde(rename = "clientId")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Base64-encode `key:secret` for basic and client-credential headers.
pub fn base64_encoded_credentials(key: &str, secret: &str) -> String {
    BASE64.encode(format!("{key}:{secret}"))
}

/// OAuth client over a transport seam.
pub struct OAuthClient<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> OAuthClient<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Register a client application and obtain a client id/secret pair.
    ///
    /// Sends the fixed application descriptor authenticated with basic auth
    /// over the account credentials. 200 and 201 are accepted; 401 is a
    /// user-visible authentication failure; anything else fails the
    /// registration outright.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        registration_endpoint: &str,
    ) -> Result<(String, String)> {
        let body = serde_json::json!({
            "clientName": constants::REGISTRATION_CLIENT_NAME,
            "callbackUrl": constants::REGISTRATION_CALLBACK_URL,
            "grantType": constants::REGISTRATION_GRANT_TYPE,
            "saasApp": true,
            "owner": constants::REGISTRATION_OWNER,
            "tokenScope": constants::REGISTRATION_TOKEN_SCOPE,
        });
        let headers = [
            ("Content-Type", "application/json".to_string()),
            (
                "Authorization",
                format!("Basic {}", base64_encoded_credentials(username, password)),
            ),
        ];

        debug!(endpoint = registration_endpoint, "registering client");
        let response = self
            .transport
            .post(registration_endpoint, &headers, body.to_string())?;

        match response.status {
            200 | 201 => {
                let parsed: RegistrationResponse = serde_json::from_str(&response.body)
                    .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
                Ok((parsed.client_id, parsed.client_secret))
            }
            401 => Err(AuthError::AuthenticationFailed.into()),
            status => Err(AuthError::RegistrationFailed { status }.into()),
        }
    }

    /// Exchange account credentials for an access token (password grant).
    ///
    /// Authenticated with a bearer-style header carrying the base64
    /// `client_id:client_secret` pair. Only 200 is accepted.
    pub fn exchange(
        &self,
        username: &str,
        password: &str,
        client_credentials_b64: &str,
        token_endpoint: &str,
    ) -> Result<String> {
        let body = format!(
            "grant_type=password&username={}&password={}&validity_period={}&scope={}",
            urlencoding::encode(username),
            urlencoding::encode(password),
            constants::TOKEN_VALIDITY_PERIOD,
            constants::TOKEN_SCOPE,
        );
        let headers = [
            ("Content-Type", "application/x-www-form-urlencoded".to_string()),
            ("Authorization", format!("Bearer {client_credentials_b64}")),
            ("Accept", "application/json".to_string()),
        ];

        debug!(endpoint = token_endpoint, "requesting access token");
        let response = self.transport.post(token_endpoint, &headers, body)?;

        if response.status == 401 {
            return Err(AuthError::AuthenticationFailed.into());
        }
        if response.status != 200 {
            return Err(AuthError::TokenRequestFailed {
                status: response.status,
            }
            .into());
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        Ok(parsed.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted transport recording every request.
    struct Script {
        responses: RefCell<Vec<Response>>,
        pub requests: RefCell<Vec<(String, String)>>,
    }

    impl Script {
        fn new(mut responses: Vec<Response>) -> Self {
            responses.reverse();
            Self {
                responses: RefCell::new(responses),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Script {
        fn post(&self, url: &str, _headers: &[(&str, String)], body: String) -> Result<Response> {
            self.requests.borrow_mut().push((url.to_string(), body));
            Ok(self.responses.borrow_mut().pop().expect("unexpected request"))
        }
    }

    #[test]
    fn register_parses_client_credentials() {
        let transport = Script::new(vec![Response {
            status: 201,
            body: r#"{"clientId": "abc", "clientSecret": "xyz"}"#.to_string(),
        }]);
        let client = OAuthClient::new(&transport);

        let (id, secret) = client
            .register("admin", "admin", "https://as/register")
            .unwrap();
        assert_eq!(id, "abc");
        assert_eq!(secret, "xyz");

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].1.contains("rest_api_publisher"));
    }

    #[test]
    fn register_401_is_authentication_failure() {
        let transport = Script::new(vec![Response {
            status: 401,
            body: String::new(),
        }]);
        let client = OAuthClient::new(&transport);

        let err = client
            .register("admin", "wrong", "https://as/register")
            .unwrap_err();
        assert!(err.to_string().contains("username/password"));
    }

    #[test]
    fn register_other_status_is_registration_failure() {
        let transport = Script::new(vec![Response {
            status: 500,
            body: String::new(),
        }]);
        let client = OAuthClient::new(&transport);

        let err = client
            .register("admin", "admin", "https://as/register")
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn exchange_encodes_form_values() {
        let transport = Script::new(vec![Response {
            status: 200,
            body: r#"{"access_token": "tok", "refresh_token": "r"}"#.to_string(),
        }]);
        let client = OAuthClient::new(&transport);

        let token = client
            .exchange("ad min", "p&ss", "Y3JlZHM=", "https://as/token")
            .unwrap();
        assert_eq!(token, "tok");

        let requests = transport.requests.borrow();
        assert!(requests[0].1.contains("username=ad%20min"));
        assert!(requests[0].1.contains("password=p%26ss"));
        assert!(requests[0].1.contains("validity_period=3600"));
        assert!(requests[0].1.contains("scope=apim:api_view"));
    }

    #[test]
    fn exchange_non_200_is_fatal() {
        let transport = Script::new(vec![Response {
            status: 400,
            body: String::new(),
        }]);
        let client = OAuthClient::new(&transport);

        assert!(client
            .exchange("admin", "admin", "Y3JlZHM=", "https://as/token")
            .is_err());
    }

    #[test]
    fn credentials_encoding() {
        assert_eq!(base64_encoded_credentials("admin", "admin"), "YWRtaW46YWRtaW4=");
    }
}
