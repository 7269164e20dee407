use super::error::{self, Error};
use super::{history, login, logout, register};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// How long we wait for the backend before giving up on a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the lexsearch backend
#[derive(Debug, Clone)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://lexsearch.example.com`.
    server: Url,

    /// Shared HTTP client. Holds the session cookie on native targets; in the
    /// browser, the browser does that for us.
    http: reqwest::Client,
}

impl Client {
    /// Construct a client from an already-configured HTTP client.
    ///
    /// ## Errors
    ///
    /// Returns `Error::UrlParse` if `server` is not an absolute URL.
    pub fn new(server: &str, http: reqwest::Client) -> error::Result<Self> {
        Ok(Self {
            server: Url::parse(server)?,
            http,
        })
    }

    /// Construct a client that keeps session cookies between requests and
    /// fails any request that takes longer than `timeout`.
    ///
    /// ## Errors
    ///
    /// Returns `Error::UrlParse` for a bad server URL and `Error::Http` if the
    /// TLS backend can't be initialized.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn connect(server: &str, timeout: Duration) -> error::Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Self::new(server, http)
    }

    /// The server this client talks to.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Register a new account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, req: &register::Req) -> error::Result<register::Resp> {
        let url = self.server.join(register::PATH)?;

        Self::handle_response(self.http.post(url).json(req)).await
    }

    /// Log into the server.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, req: &login::Req) -> error::Result<login::Resp> {
        let url = self.server.join(login::PATH)?;

        Self::handle_response(self.http.post(url).json(req)).await
    }

    /// End the current session. Sends no body.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self) -> error::Result<logout::Resp> {
        let url = self.server.join(logout::PATH)?;

        Self::handle_response(self.http.post(url)).await
    }

    /// Get the search history for the current session. Sends no body.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    #[tracing::instrument(skip_all)]
    pub async fn history(&self) -> error::Result<history::Resp> {
        let url = self.server.join(history::PATH)?;

        Self::handle_response(self.http.post(url)).await
    }

    /// Convert an HTTP response into a result.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx) with a body we could
    ///   decode
    /// - `Error::Http` if the request failed, timed out, or the body was not
    ///   the JSON we expected
    /// - `Error::Status` if the server returned anything other than a success
    async fn handle_response<T>(req: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;

        let status = resp.status();
        tracing::debug!(%status, url = %resp.url(), "got response");

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            Err(Error::Status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Bytes,
        http::{
            header::{COOKIE, SET_COOKIE},
            HeaderMap, StatusCode,
        },
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn serve(router: Router, timeout: Duration) -> Client {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Client::connect(&format!("http://{addr}"), timeout).unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn login_posts_email_and_pwd() {
        let client = serve(
            Router::new().route(
                "/login",
                post(|Json(body): Json<Value>| async move {
                    let expected = json!({"email": "a@example.com", "pwd": "hunter2"});

                    Json(json!({ "login": body == expected }))
                }),
            ),
            DEFAULT_TIMEOUT,
        )
        .await;

        let resp = client
            .login(&login::Req {
                email: "a@example.com".to_string(),
                pwd: "hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.login, Some(true));
    }

    #[test_log::test(tokio::test)]
    async fn register_posts_all_four_fields() {
        let client = serve(
            Router::new().route(
                "/register",
                post(|Json(body): Json<Value>| async move {
                    let expected = json!({
                        "email": "a@example.com",
                        "pwd": "hunter2",
                        "name": "A. Person",
                        "dob": "1990-01-01",
                    });

                    Json(json!({ "registration": i64::from(body != expected) }))
                }),
            ),
            DEFAULT_TIMEOUT,
        )
        .await;

        let resp = client
            .register(&register::Req {
                email: "a@example.com".to_string(),
                pwd: "hunter2".to_string(),
                name: "A. Person".to_string(),
                dob: "1990-01-01".to_string(),
            })
            .await
            .unwrap();

        assert!(resp.is_success());
    }

    #[test_log::test(tokio::test)]
    async fn logout_sends_no_body() {
        let client = serve(
            Router::new().route(
                "/logout",
                post(|body: Bytes| async move { Json(json!({ "login": !body.is_empty() })) }),
            ),
            DEFAULT_TIMEOUT,
        )
        .await;

        let resp = client.logout().await.unwrap();

        assert!(resp.is_logged_out());
    }

    #[test_log::test(tokio::test)]
    async fn session_cookie_is_kept_between_calls() {
        let client = serve(
            Router::new()
                .route(
                    "/login",
                    post(|| async {
                        (
                            [(SET_COOKIE, "session=abc; Path=/")],
                            Json(json!({"login": true})),
                        )
                    }),
                )
                .route(
                    "/history",
                    post(|headers: HeaderMap| async move {
                        let cookie = headers
                            .get(COOKIE)
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or_default()
                            .to_string();

                        Json(json!({ "cookie": cookie }))
                    }),
                ),
            DEFAULT_TIMEOUT,
        )
        .await;

        client
            .login(&login::Req {
                email: "a@example.com".to_string(),
                pwd: "hunter2".to_string(),
            })
            .await
            .unwrap();

        let history = client.history().await.unwrap();

        assert_eq!(history, json!({"cookie": "session=abc"}));
    }

    #[test_log::test(tokio::test)]
    async fn server_errors_are_status_errors() {
        let client = serve(
            Router::new().route("/logout", post(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
            DEFAULT_TIMEOUT,
        )
        .await;

        let err = client.logout().await.unwrap_err();

        assert!(matches!(err, Error::Status(StatusCode::INTERNAL_SERVER_ERROR)));
    }

    #[test_log::test(tokio::test)]
    async fn malformed_bodies_are_http_errors() {
        let client = serve(
            Router::new().route("/logout", post(|| async { "<html>oops</html>" })),
            DEFAULT_TIMEOUT,
        )
        .await;

        let err = client.logout().await.unwrap_err();

        assert!(matches!(err, Error::Http(_)));
        assert!(!err.is_timeout());
    }

    #[test_log::test(tokio::test)]
    async fn slow_servers_time_out() {
        let client = serve(
            Router::new().route(
                "/history",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!([]))
                }),
            ),
            Duration::from_millis(50),
        )
        .await;

        let err = client.history().await.unwrap_err();

        assert!(err.is_timeout());
    }

    #[test]
    fn rejects_relative_servers() {
        let err = Client::connect("/just/a/path", DEFAULT_TIMEOUT).unwrap_err();

        assert!(matches!(err, Error::UrlParse(_)));
    }
}
