use crate::errors::ClientError;
use crate::models::{Activities, ActionResponse, ErrorResponse, LoginResponse};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Thin typed wrapper around reqwest for the activities service.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` without a trailing slash, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Single-attempt unauthenticated fetch of the full activity collection.
    pub async fn fetch_activities(&self) -> Result<Activities, ClientError> {
        let res = self
            .http
            .get(format!("{}/activities", self.base_url))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        parse(res).await
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}/login", self.base_url))
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(ClientError::Transport)?;
        parse(res).await
    }

    /// Server-side token invalidation. The response body is ignored; callers
    /// only ever log a failure.
    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let res = self
            .http
            .post(format!("{}/logout", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Api {
                status,
                detail: None,
            })
        }
    }

    pub async fn signup(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> Result<ActionResponse, ClientError> {
        self.mutate(Method::POST, activity, "signup", email, token)
            .await
    }

    pub async fn unregister(
        &self,
        activity: &str,
        email: &str,
        token: Option<&str>,
    ) -> Result<ActionResponse, ClientError> {
        self.mutate(Method::DELETE, activity, "unregister", email, token)
            .await
    }

    // Activity names come from user-facing data and may hold characters with
    // URL meaning (`#`, `?`, spaces), so the path segment is percent-encoded
    // rather than spliced in raw.
    fn action_url(&self, activity: &str, action: &str) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| ClientError::Url(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Url("base url cannot carry path segments".to_string()))?
            .pop_if_empty()
            .extend(["activities", activity, action]);
        Ok(url)
    }

    // Signup and unregister share the same wire shape: the email travels as a
    // query parameter and the bearer header is attached only when a token is
    // held; the server decides whether an unauthenticated attempt is allowed.
    async fn mutate(
        &self,
        method: Method,
        activity: &str,
        action: &str,
        email: &str,
        token: Option<&str>,
    ) -> Result<ActionResponse, ClientError> {
        let url = self.action_url(activity, action)?;
        let mut request = self.http.request(method, url).query(&[("email", email)]);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let res = request.send().await.map_err(ClientError::Transport)?;
        parse(res).await
    }
}

// Non-2xx responses carry an optional `{detail}` body; keep it so callers can
// surface the server's wording verbatim.
async fn parse<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    if !status.is_success() {
        let detail = res
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|payload| payload.detail);
        return Err(ClientError::Api { status, detail });
    }
    res.json::<T>().await.map_err(ClientError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_url_percent_encodes_the_activity_segment() {
        let api = ApiClient::new("http://localhost:8000");
        let url = api.action_url("Study Hall #2", "signup").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/activities/Study%20Hall%20%232/signup"
        );
    }

    #[test]
    fn action_url_appends_to_a_base_path() {
        let api = ApiClient::new("http://localhost:8000/api");
        let url = api.action_url("Chess Club", "unregister").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/activities/Chess%20Club/unregister"
        );
    }

    #[test]
    fn action_url_rejects_an_unparseable_base() {
        let api = ApiClient::new("not a url");
        let err = api.action_url("Chess Club", "signup").unwrap_err();
        assert!(matches!(err, ClientError::Url(_)));
    }
}
