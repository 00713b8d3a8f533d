//! Landing page: the newest articles.

use std::sync::Arc;

use scape_core::entities::Article;
use scape_core::samples::sample_articles;
use scape_gateway::ArticleGateway;

use crate::state::{LoadState, PageData};

/// How many articles the landing page features.
pub const FEATURED_ARTICLES: usize = 3;

pub struct HomePage<G> {
    gateway: Arc<G>,
    data: PageData<Article>,
}

impl<G: ArticleGateway> HomePage<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            data: PageData::default(),
        }
    }

    /// Fetch the newest articles, or the samples if the backend is down.
    pub async fn load(&mut self) {
        let result = self.gateway.list_articles().await;
        self.data.resolve(result, "articles", sample_articles);
        self.data.items_mut().truncate(FEATURED_ARTICLES);
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        self.data.state()
    }

    #[must_use]
    pub fn featured(&self) -> &[Article] {
        self.data.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::OfflineGateway;

    #[tokio::test]
    async fn offline_home_still_features_articles() {
        let mut page = HomePage::new(Arc::new(OfflineGateway::default()));
        page.load().await;
        assert!(!page.featured().is_empty());
        assert!(page.featured().len() <= FEATURED_ARTICLES);
        assert!(page.state().banner().is_some());
    }
}
