use std::sync::Arc;

use crate::api::{ServiceError, TimeTrackingService};
use crate::types::{AccountScope, ListItem};

/// The project listing of a session, fetched at most once.
#[derive(Debug, Default, Clone)]
pub struct ProjectCache {
    listing: Option<Arc<[ListItem]>>,
}

impl ProjectCache {
    pub fn is_populated(&self) -> bool {
        self.listing.is_some()
    }

    /// Returns the cached listing, fetching it on first use. An empty listing
    /// is cached too. A failed fetch leaves the cache empty.
    pub async fn get_projects<S: TimeTrackingService + ?Sized>(
        &mut self,
        service: &S,
        account: &AccountScope,
        label: &str,
    ) -> Result<Arc<[ListItem]>, ServiceError> {
        if let Some(listing) = &self.listing {
            return Ok(Arc::clone(listing));
        }

        let listing: Arc<[ListItem]> = service.projects(account, label).await?.into();
        tracing::debug!("cached {} project(s) for {}", listing.len(), account.name);
        self.listing = Some(Arc::clone(&listing));
        Ok(listing)
    }
}
