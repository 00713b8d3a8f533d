//! Article repository.

use libsql::Value;

use scape_core::RecordId;
use scape_core::entities::{Article, ArticleDraft, ArticlePatch};
use scape_gateway::rows::ArticleRow;
use scape_gateway::{ArticleGateway, Collection, DataAccessError};

use crate::LocalGateway;
use crate::error::DatabaseError;
use crate::helpers::{
    Assignments, decode, decode_one, get_opt_string, now_stamp, order_clause, retain_matching,
};

const ARTICLES: Collection = Collection::Articles;

const COLUMNS: &str = "id, title, category, content, excerpt, author_name, author_email, \
                       image, thumbnail, reads, likes, created_at";

fn row_to_article(row: &libsql::Row) -> Result<ArticleRow, DatabaseError> {
    Ok(ArticleRow {
        id: row.get::<i64>(0)?,
        title: get_opt_string(row, 1)?,
        category: row.get::<Option<String>>(2)?,
        content: row.get::<Option<String>>(3)?,
        excerpt: row.get::<Option<String>>(4)?,
        author_name: row.get::<Option<String>>(5)?,
        author_email: get_opt_string(row, 6)?,
        image: get_opt_string(row, 7)?,
        thumbnail: get_opt_string(row, 8)?,
        reads: row.get::<Option<i64>>(9)?,
        likes: row.get::<Option<i64>>(10)?,
        created_at: row.get::<String>(11)?,
    })
}

impl ArticleGateway for LocalGateway {
    async fn add_article(&self, draft: &ArticleDraft) -> Result<Article, DataAccessError> {
        let sql = format!(
            "INSERT INTO articles (title, category, content, excerpt, author_name, author_email,
                                   image, thumbnail, reads, likes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0, ?9, ?9)
             RETURNING {COLUMNS}"
        );
        let params: Vec<Value> = vec![
            draft.title.as_str().into(),
            draft.category.as_str().into(),
            draft.content.as_str().into(),
            draft.excerpt.as_str().into(),
            draft.author_name.as_str().into(),
            draft.author_email.as_deref().into(),
            draft.image.as_deref().into(),
            draft.thumbnail.as_deref().into(),
            now_stamp().into(),
        ];
        let rows = self.fetch(&sql, params, row_to_article).await?;
        decode(ARTICLES, rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DataAccessError::Decode {
                collection: ARTICLES,
                reason: "insert returned no row".into(),
            })
    }

    async fn get_article(&self, id: RecordId) -> Result<Article, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM articles WHERE id = ?1");
        let rows = self.fetch(&sql, vec![id.into()], row_to_article).await?;
        decode_one(ARTICLES, id, rows)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM articles {}", order_clause(ARTICLES));
        let rows = self.fetch(&sql, Vec::new(), row_to_article).await?;
        decode(ARTICLES, rows)
    }

    async fn articles_by_category(&self, category: &str) -> Result<Vec<Article>, DataAccessError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM articles WHERE category = ?1 {}",
            order_clause(ARTICLES)
        );
        let rows = self
            .fetch(&sql, vec![category.into()], row_to_article)
            .await?;
        decode(ARTICLES, rows)
    }

    async fn search_articles(&self, term: &str) -> Result<Vec<Article>, DataAccessError> {
        Ok(retain_matching(self.list_articles().await?, term))
    }

    async fn update_article(
        &self,
        id: RecordId,
        patch: &ArticlePatch,
    ) -> Result<Article, DataAccessError> {
        let mut sets = Assignments::default();
        sets.set_opt("title", patch.title.as_deref());
        sets.set_opt("category", patch.category.as_deref());
        sets.set_opt("content", patch.content.as_deref());
        sets.set_opt("excerpt", patch.excerpt.as_deref());
        sets.set_opt("image", patch.image.as_deref());
        sets.set_opt("thumbnail", patch.thumbnail.as_deref());
        sets.set_opt("reads", patch.reads.map(i64::from));
        sets.set_opt("likes", patch.likes.map(i64::from));

        if sets.is_empty() {
            return self.get_article(id).await;
        }

        let (sql, params) = sets.into_update(ARTICLES, id, COLUMNS);
        let rows = self.fetch(&sql, params, row_to_article).await?;
        decode_one(ARTICLES, id, rows)
    }

    async fn remove_article(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete_by_id(ARTICLES, id).await
    }
}
