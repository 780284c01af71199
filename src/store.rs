use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use spdlog::{debug, error, warn};

use crate::config::SanityConfig;
use crate::content::{Post, Project};
use crate::error::{NotFoundError, QueryError};

pub const POSTS_QUERY: &str = r#"*[_type == "post"] | order(publishedAt desc) {
  _id,
  title,
  slug,
  publishedAt,
  excerpt,
  body,
  category,
  mainImage { asset->{ url, metadata { dimensions } } },
  author->{ name }
}"#;

pub const POST_BY_ID_QUERY: &str = r#"*[_type == "post" && (slug.current == $id || _id == $id)][0] {
  _id,
  title,
  slug,
  publishedAt,
  excerpt,
  body[]{ ..., _type == "image" => { asset->{ url } } },
  category,
  mainImage { asset->{ url, metadata { dimensions } } },
  author->{ name, image { asset->{ url } } }
}"#;

pub const PROJECTS_QUERY: &str = r#"*[_type == "project"] | order(publishedAt desc) {
  _id,
  title,
  summary,
  mainImage { asset->{ url } },
  liveUrl,
  repoUrl,
  tech,
  category,
  publishedAt
}"#;

/// Read-only access to the posts and projects held by the content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All posts, newest first.
    async fn fetch_posts(&self) -> Result<Vec<Post>, QueryError>;

    /// All projects, newest first.
    async fn fetch_projects(&self) -> Result<Vec<Project>, QueryError>;

    /// The post whose slug or id equals `id`.
    async fn fetch_post(&self, id: &str) -> Result<Option<Post>, QueryError>;
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
    error: Option<StoreError>,
}

#[derive(Deserialize)]
struct StoreError {
    description: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<StoreError>,
    message: Option<String>,
}

pub struct SanityClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(SanityClient {
            client,
            endpoint: Self::endpoint(config),
        })
    }

    fn endpoint(config: &SanityConfig) -> String {
        let host = if config.use_cdn { "apicdn" } else { "api" };
        let version = config.api_version.trim_start_matches('v');
        format!("https://{}.{}.sanity.io/v{}/data/query/{}",
                config.project_id, host, version, config.dataset)
    }

    async fn query<T>(&self, query: &str, id: Option<&str>) -> Result<T, QueryError>
        where
            T: DeserializeOwned + Default,
    {
        let mut params = vec![("query", query.to_string())];
        if let Some(id) = id {
            // GROQ parameters are JSON encoded
            params.push(("$id", serde_json::to_string(id)?));
        }

        debug!("Querying content store: {}", self.endpoint);
        let response = self.client.get(&self.endpoint)
            .query(&params)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
                body: describe_failure(&body),
            });
        }

        parse_response(&body)
    }
}

fn describe_failure(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error: Some(StoreError { description: Some(desc) }), .. }) => desc,
        Ok(ErrorResponse { message: Some(message), .. }) => message,
        _ => body.to_string(),
    }
}

fn parse_response<T>(body: &str) -> Result<T, QueryError>
    where
        T: DeserializeOwned + Default,
{
    let response: QueryResponse<T> = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        let description = error.description.unwrap_or_else(|| "unknown error".to_string());
        return Err(QueryError::Store(description));
    }
    Ok(response.result.unwrap_or_default())
}

/// Decodes each record on its own so one malformed document only drops itself.
fn decode_records<T: DeserializeOwned>(records: Vec<Value>, kind: &str) -> Vec<T> {
    records.into_iter()
        .filter_map(|record| {
            let id = record.get("_id").and_then(Value::as_str).unwrap_or("<no id>").to_string();
            match serde_json::from_value(record) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!("Skipping malformed {} {}: {}", kind, id, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, QueryError> {
        let records = self.query(POSTS_QUERY, None).await?;
        Ok(decode_records(records, "post"))
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, QueryError> {
        let records = self.query(PROJECTS_QUERY, None).await?;
        Ok(decode_records(records, "project"))
    }

    async fn fetch_post(&self, id: &str) -> Result<Option<Post>, QueryError> {
        self.query(POST_BY_ID_QUERY, Some(id)).await
    }
}

fn newest_first<T>(items: &mut [T], date: impl Fn(&T) -> Option<NaiveDate>) {
    items.sort_by_key(|item| std::cmp::Reverse(date(item)));
}

/// Posts newest first, or an empty list when the store can't be reached.
pub async fn load_posts(store: &dyn ContentStore) -> Vec<Post> {
    match store.fetch_posts().await {
        Ok(mut posts) => {
            newest_first(&mut posts, Post::published_on);
            posts
        }
        Err(e) => {
            warn!("Error fetching blog posts: {}", e);
            vec![]
        }
    }
}

/// Projects newest first, or an empty list when the store can't be reached.
pub async fn load_projects(store: &dyn ContentStore) -> Vec<Project> {
    match store.fetch_projects().await {
        Ok(mut projects) => {
            newest_first(&mut projects, Project::published_on);
            projects
        }
        Err(e) => {
            warn!("Error fetching projects: {}", e);
            vec![]
        }
    }
}

pub async fn find_post(store: &dyn ContentStore, id: &str) -> Result<Post, NotFoundError> {
    let id = id.trim();
    if id.is_empty() || id == "undefined" {
        return Err(NotFoundError::InvalidId);
    }

    match store.fetch_post(id).await {
        Ok(Some(post)) => Ok(post),
        Ok(None) => Err(NotFoundError::Missing(id.to_string())),
        Err(e) => {
            error!("Error fetching blog post {}: {}", id, e);
            Err(NotFoundError::Unavailable(e.to_string()))
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use super::*;

    /// Serves canned records, or fails every query when `failing` is set.
    #[derive(Default)]
    pub struct MemoryStore {
        pub posts: Vec<Post>,
        pub projects: Vec<Project>,
        pub failing: bool,
        pub requests: Mutex<Vec<String>>,
    }

    impl MemoryStore {
        fn record(&self, request: &str) -> Result<(), QueryError> {
            self.requests.lock().unwrap().push(request.to_string());
            if self.failing {
                return Err(QueryError::Store("dataset not found".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ContentStore for MemoryStore {
        async fn fetch_posts(&self) -> Result<Vec<Post>, QueryError> {
            self.record("posts")?;
            Ok(self.posts.clone())
        }

        async fn fetch_projects(&self) -> Result<Vec<Project>, QueryError> {
            self.record("projects")?;
            Ok(self.projects.clone())
        }

        async fn fetch_post(&self, id: &str) -> Result<Option<Post>, QueryError> {
            self.record(&format!("post:{}", id))?;
            Ok(self.posts.iter()
                .find(|post| post.route_key() == id || post.id.0 == id)
                .cloned())
        }
    }
}
