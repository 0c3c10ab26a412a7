use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{
        Account, AccountFilter, CreateResult, NewTimeEntry, Project, ProjectFilter, QueryFilter,
        Resource, ResourceFilter, ResourceRole, ResourceRoleFilter, Task, TaskFilter,
        ThresholdInfo,
    },
    AutotaskURL,
};

const API_VERSION_PATH: &str = "/V1.0";
const USER_NAME_HEADER: &str = "username";
const SECRET_HEADER: &str = "secret";
const INTEGRATION_CODE_HEADER: &str = "apiintegrationcode";

/// Authenticated client for the Autotask REST API.
///
/// Every request carries the `UserName`/`Secret` header pair (plus the
/// integration code when one is configured); there is no session to renew.
#[derive(Debug, Clone)]
pub struct AutotaskClient {
    client: Client,
    base_url: AutotaskURL,
    user_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneInformation {
    #[serde(default)]
    zone_name: String,
    #[serde(default)]
    url: String,
}

impl AutotaskClient {
    /// Resolves the zone serving `user_name` and returns a client bound to it.
    ///
    /// Rejected credentials surface as [`AutotaskFetchError::Unauthorized`].
    #[instrument(name = "autotask_connect", skip(password, integration_code))]
    pub async fn connect(
        url: &str,
        user_name: &str,
        password: &str,
        integration_code: Option<&str>,
    ) -> Result<Self, AutotaskFetchError> {
        let client = Client::builder()
            .default_headers(auth_headers(user_name, password, integration_code)?)
            .build()
            .map_err(|e| AutotaskFetchError::Other(format!("Failed to build HTTP client: {e}")))?;

        let entry_url = AutotaskURL::new(url);
        let zone: ZoneInformation = Self::read_json(
            client
                .get(entry_url.append_path(API_VERSION_PATH).append_path("ZoneInformation").as_ref())
                .query(&[("user", user_name)]),
        )
        .await?;

        let base_url = if zone.url.is_empty() {
            entry_url
        } else {
            tracing::debug!("using zone {} at {}", zone.zone_name, zone.url);
            AutotaskURL::new(zone.url)
        };

        Ok(Self {
            client,
            base_url: base_url.append_path(API_VERSION_PATH),
            user_name: user_name.to_string(),
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    async fn send(request: RequestBuilder) -> Result<Response, AutotaskFetchError> {
        let resp = request
            .send()
            .await
            .map_err(|e| AutotaskFetchError::ResponseError(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::FORBIDDEN {
            return Err(AutotaskFetchError::Unauthorized);
        }

        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, AutotaskFetchError> {
        let resp = Self::send(request)
            .await?
            .error_for_status()
            .map_err(|e| AutotaskFetchError::ResponseError(e.to_string()))?;

        resp.json::<T>().await.map_err(|e| {
            AutotaskFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        entity: &str,
        filter: &impl QueryFilter,
    ) -> Result<Vec<T>, AutotaskFetchError> {
        let url = self.base_url.query(entity);
        let response: QueryResponse<T> = Self::read_json(
            self.client
                .get(url.as_ref())
                .query(&[("search", filter.as_query_filter())]),
        )
        .await?;

        tracing::debug!("{} returned {} item(s)", entity, response.items.len());
        Ok(response.items)
    }

    pub async fn fetch_threshold_info(&self) -> Result<ThresholdInfo, AutotaskFetchError> {
        let url = self.base_url.append_path("ThresholdInformation");
        Self::read_json(self.client.get(url.as_ref())).await
    }

    pub async fn query_resources(
        &self,
        user_name: &str,
    ) -> Result<Vec<Resource>, AutotaskFetchError> {
        self.query("Resources", &ResourceFilter::new(user_name)).await
    }

    pub async fn query_resource_roles(
        &self,
        resource_id: i64,
    ) -> Result<Vec<ResourceRole>, AutotaskFetchError> {
        self.query("ResourceRoles", &ResourceRoleFilter::new(resource_id))
            .await
    }

    pub async fn query_accounts(&self, name: &str) -> Result<Vec<Account>, AutotaskFetchError> {
        self.query("Companies", &AccountFilter::new(name)).await
    }

    pub async fn query_projects(
        &self,
        account_id: i64,
        label: &str,
    ) -> Result<Vec<Project>, AutotaskFetchError> {
        self.query("Projects", &ProjectFilter::new(account_id, label))
            .await
    }

    pub async fn query_tasks(&self, project_id: &str) -> Result<Vec<Task>, AutotaskFetchError> {
        self.query("Tasks", &TaskFilter::new(project_id)).await
    }

    /// Creates a time entry.
    ///
    /// A rejection the service explains in its body is returned as a
    /// [`CreateResult`] with a non-success return code, not as an error.
    #[instrument(skip(self, entry), fields(task_id = %entry.task_id))]
    pub async fn create_time_entry(
        &self,
        entry: &NewTimeEntry,
    ) -> Result<CreateResult, AutotaskFetchError> {
        let url = self.base_url.append_path("TimeEntries");
        let resp = Self::send(self.client.post(url.as_ref()).json(entry)).await?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AutotaskFetchError::ResponseError(e.to_string()))?;

        match serde_json::from_str::<CreateResult>(&body) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(AutotaskFetchError::ResponseError(format!(
                "POST TimeEntries returned {}",
                status
            ))),
            Err(e) => Err(AutotaskFetchError::ParsingError(format!(
                "Failed to parse create result: {}",
                e
            ))),
        }
    }
}

fn auth_headers(
    user_name: &str,
    password: &str,
    integration_code: Option<&str>,
) -> Result<HeaderMap, AutotaskFetchError> {
    let invalid = |e: InvalidHeaderValue| AutotaskFetchError::Other(format!("Invalid header: {e}"));

    let mut headers = HeaderMap::new();
    headers.insert(USER_NAME_HEADER, HeaderValue::from_str(user_name).map_err(invalid)?);
    let mut secret = HeaderValue::from_str(password).map_err(invalid)?;
    secret.set_sensitive(true);
    headers.insert(SECRET_HEADER, secret);
    if let Some(code) = integration_code {
        headers.insert(
            INTEGRATION_CODE_HEADER,
            HeaderValue::from_str(code).map_err(invalid)?,
        );
    }
    Ok(headers)
}

#[derive(Error, Debug)]
pub enum AutotaskFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}

/// Generic response of the entity query endpoints.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub items: Vec<T>,
}
