//! Taxon rank repository.

use acre_core::entities::TaxonRank;
use acre_core::enums::EntityType;
use acre_core::forms::NamedForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::repos::named::{NameFilter, NamedRow};
use crate::service::AcreService;

fn into_taxon_rank(row: NamedRow) -> TaxonRank {
    TaxonRank {
        id: row.id,
        name: row.name,
        stamp: row.stamp,
    }
}

impl AcreService {
    pub async fn create_taxon_rank(
        &self,
        form: &NamedForm,
        acting_user: Option<i64>,
    ) -> Result<TaxonRank, DatabaseError> {
        self.create_named(EntityType::TaxonRank, form, acting_user)
            .await
            .map(into_taxon_rank)
    }

    pub async fn get_taxon_rank(&self, id: i64) -> Result<TaxonRank, DatabaseError> {
        self.get_named(EntityType::TaxonRank, id)
            .await
            .map(into_taxon_rank)
    }

    pub async fn update_taxon_rank(
        &self,
        id: i64,
        form: NamedForm,
        acting_user: Option<i64>,
    ) -> Result<TaxonRank, DatabaseError> {
        self.update_named(EntityType::TaxonRank, id, form, acting_user)
            .await
            .map(into_taxon_rank)
    }

    pub async fn delete_taxon_rank(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::TaxonRank, id, acting_user).await
    }

    pub async fn list_taxon_ranks(
        &self,
        filter: &NameFilter,
        page: u32,
    ) -> Result<Page<TaxonRank>, DatabaseError> {
        Ok(self
            .list_named(EntityType::TaxonRank, filter, page)
            .await?
            .map(into_taxon_rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{named, seed_wildlife, test_service};

    #[tokio::test]
    async fn rank_in_use_cannot_be_deleted() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        assert!(matches!(
            svc.delete_taxon_rank(fixture.rank_genus.id, None).await,
            Err(DatabaseError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = test_service().await;
        assert!(matches!(
            svc.create_taxon_rank(&named("   "), None).await,
            Err(DatabaseError::Form(_))
        ));
    }
}
