// src/application/catalog_search.rs
use crate::domain::{CatalogRecord, DomainError, SearchForm, SearchResultPage};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

#[async_trait]
pub trait CatalogSource {
    async fn search(&self, query: &[(String, String)]) -> Result<SearchResultPage, DomainError>;

    async fn get_item(&self, id: i64) -> Result<CatalogRecord, DomainError>;
}

/// Issues catalog searches and drops responses that arrive after a newer request.
pub struct SearchController<S: CatalogSource> {
    source: S,
    latest: AtomicU64,
}

impl<S: CatalogSource> SearchController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: AtomicU64::new(0),
        }
    }

    /// Run a search for the current form values.
    ///
    /// Returns `Ok(None)` when another search was issued while this one was
    /// in flight; only the most recent request may replace the results view.
    #[instrument(level = "debug", skip(self, form))]
    pub async fn search(&self, form: &SearchForm) -> Result<Option<SearchResultPage>, DomainError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = form.query_pairs();
        debug!(ticket, ?query, "Issuing catalog search");

        let result = self.source.search(&query).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding stale catalog response");
            return Ok(None);
        }

        let page = result?;
        debug!(
            ticket,
            items = page.items.len(),
            page = page.page,
            total = page.total,
            "Catalog search completed"
        );
        Ok(Some(page))
    }

    pub async fn item(&self, id: i64) -> Result<CatalogRecord, DomainError> {
        self.source.get_item(id).await
    }
}
