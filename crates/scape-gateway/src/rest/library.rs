//! `smell_library` collection over REST.

use scape_core::RecordId;
use scape_core::entities::{Scent, ScentDraft, ScentPatch};

use super::RestGateway;
use super::query::TableQuery;
use crate::rows::ScentRow;
use crate::{Collection, DataAccessError, LibraryGateway};

const LIBRARY: Collection = Collection::Library;

impl LibraryGateway for RestGateway {
    async fn add_scent(&self, draft: &ScentDraft) -> Result<Scent, DataAccessError> {
        self.insert::<_, ScentRow, Scent>(LIBRARY, draft).await
    }

    async fn get_scent(&self, id: RecordId) -> Result<Scent, DataAccessError> {
        self.select_one::<ScentRow, Scent>(LIBRARY, id).await
    }

    async fn list_scents(&self) -> Result<Vec<Scent>, DataAccessError> {
        self.select::<ScentRow, Scent>(LIBRARY, TableQuery::new(LIBRARY).ordered())
            .await
    }

    async fn scents_by_category(&self, category: &str) -> Result<Vec<Scent>, DataAccessError> {
        let query = TableQuery::new(LIBRARY).eq("category", category).ordered();
        self.select::<ScentRow, Scent>(LIBRARY, query).await
    }

    async fn search_scents(&self, term: &str) -> Result<Vec<Scent>, DataAccessError> {
        let query = TableQuery::new(LIBRARY).search(term).ordered();
        self.select::<ScentRow, Scent>(LIBRARY, query).await
    }

    async fn update_scent(&self, id: RecordId, patch: &ScentPatch) -> Result<Scent, DataAccessError> {
        if patch.is_empty() {
            return self.get_scent(id).await;
        }
        self.patch::<_, ScentRow, Scent>(LIBRARY, id, patch).await
    }

    async fn remove_scent(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete(LIBRARY, id).await
    }
}
