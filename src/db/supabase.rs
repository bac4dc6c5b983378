//! Thin client for a hosted Supabase project: PostgREST tables plus the GoTrue auth endpoints.

use crate::config::StoreConfig;
use crate::error::NovellaError;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base: Url,
    anon_key: String,
    /// Caller's access token; the anon key is sent when absent.
    bearer: Option<String>,
}

impl SupabaseClient {
    pub fn new(http: reqwest::Client, base: Url, anon_key: impl Into<String>) -> Self {
        Self {
            http,
            base,
            anon_key: anon_key.into(),
            bearer: None,
        }
    }

    /// Build the HTTP client from store settings.
    pub fn from_config(cfg: &StoreConfig) -> Result<Self, NovellaError> {
        let base = cfg.supabase_url.clone().ok_or_else(|| {
            NovellaError::Config("store.supabase_url is required for the supabase backend".into())
        })?;
        let anon_key = cfg.supabase_anon_key.clone().ok_or_else(|| {
            NovellaError::Config(
                "store.supabase_anon_key is required for the supabase backend".into(),
            )
        })?;
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("novella/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(Self::new(builder.build()?, base, anon_key))
    }

    /// Same client, acting on behalf of a signed-in user.
    pub fn with_bearer(&self, token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..self.clone()
        }
    }

    /// Start a query against one PostgREST table.
    pub fn from(&self, table: &'static str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table,
            filters: Vec::new(),
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let token = self.bearer.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, NovellaError> {
        Ok(self.base.join(path)?)
    }

    /// `POST /auth/v1/token?grant_type=password`
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, NovellaError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let resp = self
            .request(Method::POST, url)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        if resp.status() == StatusCode::BAD_REQUEST || resp.status() == StatusCode::UNAUTHORIZED {
            return Err(NovellaError::Unauthorized);
        }
        Ok(check(resp).await?.json().await?)
    }

    /// `GET /auth/v1/user`; `None` when the token is no longer valid.
    pub async fn user_for_token(&self, token: &str) -> Result<Option<AuthUser>, NovellaError> {
        let url = self.endpoint("auth/v1/user")?;
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        Ok(Some(check(resp).await?.json().await?))
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

/// Equality-filtered query on one table, in the `from(..).eq(..)` shape of the JS client.
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: &'static str,
    filters: Vec<(&'static str, String)>,
}

impl TableQuery<'_> {
    pub fn eq(mut self, column: &'static str, value: impl ToString) -> Self {
        self.filters.push((column, value.to_string()));
        self
    }

    fn url(&self) -> Result<Url, NovellaError> {
        let mut url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (column, value) in &self.filters {
                pairs.append_pair(column, &format!("eq.{value}"));
            }
        }
        Ok(url)
    }

    /// All matching rows, in whatever order the store returns them.
    pub async fn select<T: DeserializeOwned>(self) -> Result<Vec<T>, NovellaError> {
        let mut url = self.url()?;
        url.query_pairs_mut().append_pair("select", "*");
        debug!(table = self.table, url = %url, "select");
        let resp = self.client.request(Method::GET, url).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Zero-or-one row; more than one match is an error.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, NovellaError> {
        let table = self.table;
        let mut rows: Vec<T> = self.select().await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(NovellaError::MultipleRows { table, count }),
        }
    }

    pub async fn insert<T: Serialize>(self, row: &T) -> Result<(), NovellaError> {
        let url = self.url()?;
        debug!(table = self.table, "insert");
        let resp = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn update<T: Serialize>(self, patch: &T) -> Result<(), NovellaError> {
        let url = self.url()?;
        debug!(table = self.table, url = %url, "update");
        let resp = self
            .client
            .request(Method::PATCH, url)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<(), NovellaError> {
        let url = self.url()?;
        debug!(table = self.table, url = %url, "delete");
        let resp = self.client.request(Method::DELETE, url).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx PostgREST/GoTrue response into [`NovellaError::Remote`].
async fn check(resp: Response) -> Result<Response, NovellaError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RemoteErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.msg).or(b.error_description))
        .unwrap_or(body);
    Err(NovellaError::Remote { status, message })
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}
