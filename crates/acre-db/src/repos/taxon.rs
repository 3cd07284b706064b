//! Taxon repository. Taxa form a tree through `parent_id`.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::Taxon;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{FormErrors, TaxonForm, TaxonInput};
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, map_write_error, read_stamp};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str =
    "id, scientific_name, common_name, taxon_rank_id, parent_id, last_update, last_update_by";

/// List filters for taxa.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaxonFilter {
    /// Substring of the scientific or common name.
    pub search: Option<String>,
    pub rank: Option<i64>,
    pub parent: Option<i64>,
}

fn row_to_taxon(row: &libsql::Row) -> Result<Taxon, DatabaseError> {
    Ok(Taxon {
        id: row.get::<i64>(0)?,
        scientific_name: row.get::<String>(1)?,
        common_name: get_opt_string(row, 2)?,
        taxon_rank_id: row.get::<Option<i64>>(3)?,
        parent_id: row.get::<Option<i64>>(4)?,
        stamp: read_stamp(row, 5)?,
    })
}

impl AcreService {
    /// Check rank and parent references. For an existing taxon, the new
    /// parent must not be the taxon itself or one of its descendants.
    async fn check_taxon_references(
        &self,
        input: &TaxonInput,
        taxon_id: Option<i64>,
    ) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "taxon_rank", EntityType::TaxonRank, input.taxon_rank_id)
            .await?;
        self.check_reference(&mut errors, "parent", EntityType::Taxon, input.parent_id)
            .await?;

        if let (Some(id), Some(parent_id)) = (taxon_id, input.parent_id) {
            if parent_id == id {
                errors.add("parent", "A taxon cannot be its own parent.");
            } else if self.is_ancestor(id, parent_id).await? {
                errors.add("parent", "A taxon cannot be placed under one of its descendants.");
            }
        }
        Ok(errors.into_result()?)
    }

    /// Whether `ancestor` appears on the parent chain above `taxon`.
    async fn is_ancestor(&self, ancestor: i64, taxon: i64) -> Result<bool, DatabaseError> {
        let count = self
            .db()
            .query_count(
                "WITH RECURSIVE chain(id) AS (
                     SELECT parent_id FROM taxa WHERE id = ?1
                     UNION
                     SELECT t.parent_id FROM taxa t JOIN chain c ON t.id = c.id
                 )
                 SELECT COUNT(*) FROM chain WHERE id = ?2",
                vec![taxon.into(), ancestor.into()],
            )
            .await?;
        Ok(count > 0)
    }

    pub async fn create_taxon(
        &self,
        form: &TaxonForm,
        acting_user: Option<i64>,
    ) -> Result<Taxon, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_taxon_references(&input, None).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::Taxon,
                    "INSERT INTO taxa (scientific_name, common_name, taxon_rank_id, parent_id, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                    libsql::params![
                        input.scientific_name.as_str(),
                        input.common_name.as_deref(),
                        input.taxon_rank_id,
                        input.parent_id,
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::Taxon,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_taxon(id).await
        })
        .await
    }

    pub async fn get_taxon(&self, id: i64) -> Result<Taxon, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM taxa WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Taxon,
            id,
        })?;
        row_to_taxon(&row)
    }

    pub async fn update_taxon(
        &self,
        id: i64,
        form: TaxonForm,
        acting_user: Option<i64>,
    ) -> Result<Taxon, DatabaseError> {
        self.write(async move {
            let existing = self.get_taxon(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_taxon_references(&input, Some(id)).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE taxa SET scientific_name = ?1, common_name = ?2, taxon_rank_id = ?3, parent_id = ?4,
                     last_update = ?5, last_update_by = ?6 WHERE id = ?7",
                    libsql::params![
                        input.scientific_name.as_str(),
                        input.common_name.as_deref(),
                        input.taxon_rank_id,
                        input.parent_id,
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::Taxon))?;

            self.record_write(
                EntityType::Taxon,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_taxon(id).await
        })
        .await
    }

    /// Delete a taxon. Its children become roots and its populations are removed.
    pub async fn delete_taxon(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Taxon, id, acting_user).await
    }

    pub async fn list_taxa(&self, filter: &TaxonFilter, page: u32) -> Result<Page<Taxon>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .search(&["scientific_name", "common_name"], filter.search.as_deref())
            .eq("taxon_rank_id", filter.rank)
            .eq("parent_id", filter.parent);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "taxa",
                order_by: "scientific_name, id",
            },
            &conditions,
            page,
            row_to_taxon,
        )
        .await
    }
}
