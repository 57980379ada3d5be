use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{Movie, MoviePage, Payload};
use crate::utils::HttpClient;
use tracing::{info, warn};

/// Incremental catalog synchronization against the paginated list API.
///
/// Precondition: the remote returns movies newest-first in an order that
/// is stable across requests, so the first `remaining` entries seen
/// across pages are exactly the ones not yet mirrored. No dedupe by id is
/// performed; an unstable remote ordering can produce duplicates or gaps.
pub struct CatalogSync {
    client: HttpClient,
    config: ApiConfig,
}

impl CatalogSync {
    pub fn new(client: HttpClient, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Fetches however many pages are needed to reconcile the local
    /// sequence against the remote total, and returns the full updated
    /// sequence: the existing entries untouched, new ones appended in
    /// remote order.
    ///
    /// Page failures are logged and that page's contribution is dropped;
    /// the loop moves on to the next index. No retries.
    pub async fn sync(&self, mut movies: Vec<Movie>) -> Vec<Movie> {
        let existing = movies.len();
        let page_size = self.config.page_size.max(1);

        let mut page = 1usize;
        // Optimistic bound: check page 1 even if nothing looks new. The
        // real bound is recomputed from every page response, so a remote
        // total that grows mid-run extends the loop.
        let mut pages_needed = 2usize;

        while page < pages_needed {
            match self.fetch_page(page).await {
                Ok(data) => {
                    let remote_total = data.movie_count as usize;
                    let remaining = remote_total.saturating_sub(existing);
                    pages_needed = remaining.div_ceil(page_size) + 1;

                    let take = remaining.min(data.movies.len());
                    movies.extend(data.movies.into_iter().take(take));

                    info!(
                        "page {:03} of {:03}, remote total {}, mirrored {}",
                        page,
                        pages_needed.saturating_sub(1),
                        remote_total,
                        movies.len()
                    );
                }
                Err(e) => {
                    warn!("unable to fetch page {}: {}", page, e);
                }
            }
            page += 1;
        }

        movies
    }

    async fn fetch_page(&self, page: usize) -> Result<MoviePage> {
        let query = [
            ("limit", self.config.page_size.to_string()),
            ("page", page.to_string()),
        ];
        let payload: Payload = self.client.get_json(&self.config.base_url, &query).await?;
        Ok(payload.data)
    }
}
