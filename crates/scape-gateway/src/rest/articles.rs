//! `articles` collection over REST.

use serde::Serialize;

use scape_core::RecordId;
use scape_core::entities::{Article, ArticleDraft, ArticlePatch};

use super::RestGateway;
use super::query::TableQuery;
use crate::rows::ArticleRow;
use crate::{ArticleGateway, Collection, DataAccessError};

const ARTICLES: Collection = Collection::Articles;

/// New articles start with zeroed counters.
#[derive(Serialize)]
struct ArticleInsert<'a> {
    #[serde(flatten)]
    draft: &'a ArticleDraft,
    reads: u32,
    likes: u32,
}

impl ArticleGateway for RestGateway {
    async fn add_article(&self, draft: &ArticleDraft) -> Result<Article, DataAccessError> {
        let body = ArticleInsert {
            draft,
            reads: 0,
            likes: 0,
        };
        self.insert::<_, ArticleRow, Article>(ARTICLES, &body).await
    }

    async fn get_article(&self, id: RecordId) -> Result<Article, DataAccessError> {
        self.select_one::<ArticleRow, Article>(ARTICLES, id).await
    }

    async fn list_articles(&self) -> Result<Vec<Article>, DataAccessError> {
        self.select::<ArticleRow, Article>(ARTICLES, TableQuery::new(ARTICLES).ordered())
            .await
    }

    async fn articles_by_category(&self, category: &str) -> Result<Vec<Article>, DataAccessError> {
        let query = TableQuery::new(ARTICLES).eq("category", category).ordered();
        self.select::<ArticleRow, Article>(ARTICLES, query).await
    }

    async fn search_articles(&self, term: &str) -> Result<Vec<Article>, DataAccessError> {
        let query = TableQuery::new(ARTICLES).search(term).ordered();
        self.select::<ArticleRow, Article>(ARTICLES, query).await
    }

    async fn update_article(
        &self,
        id: RecordId,
        patch: &ArticlePatch,
    ) -> Result<Article, DataAccessError> {
        if patch.is_empty() {
            return self.get_article(id).await;
        }
        self.patch::<_, ArticleRow, Article>(ARTICLES, id, patch).await
    }

    async fn remove_article(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete(ARTICLES, id).await
    }
}
