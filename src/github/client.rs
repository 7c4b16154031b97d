use crate::config::RunConfig;
use crate::error::{MirrorError, Result};
use crate::github::types::{RepoDescriptor, RepoPage};
use octocrab::Octocrab;
use tracing::debug;

/// Repositories requested per listing call.
pub const PER_PAGE: u8 = 20;

/// Something that can serve the repository listing one page at a time.
#[allow(async_fn_in_trait)]
pub trait RepoSource {
    async fn list_page(&self, user: &str, page: u32, per_page: u8) -> Result<RepoPage>;
}

#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| MirrorError::GitHub(format!("invalid api url {url}: {e}")))?;
        }
        let octo = builder
            .build()
            .map_err(|e| MirrorError::GitHub(e.to_string()))?;

        Ok(Self { octo })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Self::new(&config.token, config.api_url.as_deref())
    }
}

impl RepoSource for GitHubClient {
    async fn list_page(&self, user: &str, page: u32, per_page: u8) -> Result<RepoPage> {
        let result = self
            .octo
            .users(user)
            .repos()
            .per_page(per_page)
            .page(page)
            .send()
            .await
            .map_err(|e| MirrorError::GitHub(e.to_string()))?;

        let mut items = Vec::with_capacity(result.items.len());
        for repo in result.items {
            let clone_url = repo.clone_url.map(|u| u.to_string()).ok_or_else(|| {
                MirrorError::GitHub(format!("repository {} has no clone url", repo.name))
            })?;
            items.push(RepoDescriptor {
                name: repo.name,
                clone_url,
                fork: repo.fork.unwrap_or(false),
            });
        }

        let next = result.next.is_some().then_some(page + 1);
        Ok(RepoPage { items, next })
    }
}

/// Walks the listing from the first page until a page reports no successor.
pub async fn list_all<S: RepoSource>(source: &S, user: &str) -> Result<Vec<RepoDescriptor>> {
    let mut repos = Vec::new();
    let mut page = 1u32;

    loop {
        let result = source.list_page(user, page, PER_PAGE).await?;
        debug!(page, count = result.items.len(), "fetched repository page");
        repos.extend(result.items);

        match result.next {
            Some(next) => page = next,
            None => break,
        }
    }

    Ok(repos)
}
