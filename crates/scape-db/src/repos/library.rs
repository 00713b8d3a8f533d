//! Scent library repository.

use libsql::Value;

use scape_core::RecordId;
use scape_core::entities::{Scent, ScentDraft, ScentPatch};
use scape_gateway::rows::ScentRow;
use scape_gateway::{Collection, DataAccessError, LibraryGateway};

use crate::LocalGateway;
use crate::error::DatabaseError;
use crate::helpers::{
    Assignments, decode, decode_one, get_opt_string, now_stamp, order_clause, retain_matching,
};

const LIBRARY: Collection = Collection::Library;

const COLUMNS: &str = "id, name, category, description, image, thumbnail, created_at";

fn row_to_scent(row: &libsql::Row) -> Result<ScentRow, DatabaseError> {
    Ok(ScentRow {
        id: row.get::<i64>(0)?,
        name: get_opt_string(row, 1)?,
        category: row.get::<Option<String>>(2)?,
        description: row.get::<Option<String>>(3)?,
        image: get_opt_string(row, 4)?,
        thumbnail: get_opt_string(row, 5)?,
        created_at: row.get::<String>(6)?,
    })
}

impl LibraryGateway for LocalGateway {
    async fn add_scent(&self, draft: &ScentDraft) -> Result<Scent, DataAccessError> {
        let sql = format!(
            "INSERT INTO smell_library (name, category, description, image, thumbnail,
                                        created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        );
        let params: Vec<Value> = vec![
            draft.name.as_str().into(),
            draft.category.as_str().into(),
            draft.description.as_str().into(),
            draft.image.as_deref().into(),
            draft.thumbnail.as_deref().into(),
            now_stamp().into(),
        ];
        let rows = self.fetch(&sql, params, row_to_scent).await?;
        decode(LIBRARY, rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DataAccessError::Decode {
                collection: LIBRARY,
                reason: "insert returned no row".into(),
            })
    }

    async fn get_scent(&self, id: RecordId) -> Result<Scent, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM smell_library WHERE id = ?1");
        let rows = self.fetch(&sql, vec![id.into()], row_to_scent).await?;
        decode_one(LIBRARY, id, rows)
    }

    async fn list_scents(&self) -> Result<Vec<Scent>, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM smell_library {}", order_clause(LIBRARY));
        let rows = self.fetch(&sql, Vec::new(), row_to_scent).await?;
        decode(LIBRARY, rows)
    }

    async fn scents_by_category(&self, category: &str) -> Result<Vec<Scent>, DataAccessError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM smell_library WHERE category = ?1 {}",
            order_clause(LIBRARY)
        );
        let rows = self.fetch(&sql, vec![category.into()], row_to_scent).await?;
        decode(LIBRARY, rows)
    }

    async fn search_scents(&self, term: &str) -> Result<Vec<Scent>, DataAccessError> {
        Ok(retain_matching(self.list_scents().await?, term))
    }

    async fn update_scent(&self, id: RecordId, patch: &ScentPatch) -> Result<Scent, DataAccessError> {
        let mut sets = Assignments::default();
        sets.set_opt("name", patch.name.as_deref());
        sets.set_opt("category", patch.category.as_deref());
        sets.set_opt("description", patch.description.as_deref());
        sets.set_opt("image", patch.image.as_deref());
        sets.set_opt("thumbnail", patch.thumbnail.as_deref());

        if sets.is_empty() {
            return self.get_scent(id).await;
        }

        let (sql, params) = sets.into_update(LIBRARY, id, COLUMNS);
        let rows = self.fetch(&sql, params, row_to_scent).await?;
        decode_one(LIBRARY, id, rows)
    }

    async fn remove_scent(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete_by_id(LIBRARY, id).await
    }
}
