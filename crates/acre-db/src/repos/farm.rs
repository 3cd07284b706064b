//! Farm repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::Farm;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::FarmForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{format_date, map_write_error, parse_date, parse_geometry, read_stamp, to_json_text};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, name, owner_name, area, location, created_on, last_update, last_update_by";

/// List filters for farms.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FarmFilter {
    /// Substring of the name or owner name.
    pub search: Option<String>,
}

fn row_to_farm(row: &libsql::Row) -> Result<Farm, DatabaseError> {
    Ok(Farm {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        owner_name: row.get::<String>(2)?,
        area: row.get::<f64>(3)?,
        location: parse_geometry(&row.get::<String>(4)?)?,
        created_on: parse_date(&row.get::<String>(5)?)?,
        stamp: read_stamp(row, 6)?,
    })
}

impl AcreService {
    pub async fn create_farm(
        &self,
        form: &FarmForm,
        acting_user: Option<i64>,
    ) -> Result<Farm, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::Farm,
                    "INSERT INTO farms (name, owner_name, area, location, created_on, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                    libsql::params![
                        input.name.as_str(),
                        input.owner_name.as_str(),
                        input.area,
                        to_json_text(&input.location)?,
                        format_date(now.date_naive()),
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::Farm,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_farm(id).await
        })
        .await
    }

    pub async fn get_farm(&self, id: i64) -> Result<Farm, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM farms WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Farm,
            id,
        })?;
        row_to_farm(&row)
    }

    /// Update a farm. `created_on` never changes.
    pub async fn update_farm(
        &self,
        id: i64,
        form: FarmForm,
        acting_user: Option<i64>,
    ) -> Result<Farm, DatabaseError> {
        self.write(async move {
            let existing = self.get_farm(id).await?;
            let input = form.overlay(&existing).clean()?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE farms SET name = ?1, owner_name = ?2, area = ?3, location = ?4,
                     last_update = ?5, last_update_by = ?6 WHERE id = ?7",
                    libsql::params![
                        input.name.as_str(),
                        input.owner_name.as_str(),
                        input.area,
                        to_json_text(&input.location)?,
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::Farm))?;

            self.record_write(
                EntityType::Farm,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_farm(id).await
        })
        .await
    }

    /// Delete a farm with its fields and their irrigation points.
    pub async fn delete_farm(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Farm, id, acting_user).await
    }

    pub async fn list_farms(&self, filter: &FarmFilter, page: u32) -> Result<Page<Farm>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions.search(&["name", "owner_name"], filter.search.as_deref());
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "farms",
                order_by: "id",
            },
            &conditions,
            page,
            row_to_farm,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::test_support::helpers::{
        create_farm, create_field, create_user, farm_form, point_form, test_service,
    };
    use acre_core::geo::Point;
    use crate::repos::audit::AuditFilter;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_farm_stamps_and_records() {
        let svc = test_service().await;
        let user = create_user(&svc, "user1").await;
        let farm = svc.create_farm(&farm_form("Oak Ridge"), Some(user.id)).await.unwrap();

        assert_eq!(farm.name, "Oak Ridge");
        assert_eq!(farm.location, Point::new(29.45, -23.9));
        assert_eq!(farm.created_on, Utc::now().date_naive());
        assert_eq!(farm.stamp.last_update_by, Some(user.id));

        let history = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Farm),
                entity_id: Some(farm.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Created);
        assert_eq!(history[0].user_id, Some(user.id));
        assert_eq!(history[0].detail.as_ref().unwrap()["name"], "Oak Ridge");
    }

    #[tokio::test]
    async fn invalid_form_writes_nothing() {
        let svc = test_service().await;
        let form = FarmForm {
            area: Some(0.0),
            ..farm_form("Oak Ridge")
        };
        let err = svc.create_farm(&form, None).await.unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(errors.get("area"), ["Area must be greater than 0."]);
        let page = svc.list_farms(&FarmFilter::default(), 1).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let svc = test_service().await;
        let farm = create_farm(&svc, "Oak Ridge").await;
        let updated = svc
            .update_farm(
                farm.id,
                FarmForm {
                    owner_name: Some("New Owner".into()),
                    ..FarmForm::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Oak Ridge");
        assert_eq!(updated.owner_name, "New Owner");
        assert_eq!(updated.created_on, farm.created_on);
        assert!(updated.stamp.last_update >= farm.stamp.last_update);
    }

    #[tokio::test]
    async fn missing_farm_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.get_farm(42).await,
            Err(DatabaseError::NotFound { entity: EntityType::Farm, id: 42 })
        ));
        assert!(matches!(
            svc.update_farm(42, FarmForm::default(), None).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_farm(42, None).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_farms_paginates_and_searches() {
        let svc = test_service().await.with_page_size(2);
        for name in ["Oak Ridge", "Pine Hill", "Oak Valley"] {
            create_farm(&svc, name).await;
        }

        let first = svc.list_farms(&FarmFilter::default(), 1).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.num_pages, 2);
        assert!(first.has_next);

        let second = svc.list_farms(&FarmFilter::default(), 2).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].name, "Oak Valley");

        assert!(matches!(
            svc.list_farms(&FarmFilter::default(), 3).await,
            Err(DatabaseError::PageNotFound { page: 3, num_pages: 2 })
        ));

        let oaks = svc
            .list_farms(
                &FarmFilter {
                    search: Some("OAK".into()),
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(oaks.total, 2);
    }

    #[tokio::test]
    async fn empty_list_has_one_empty_page() {
        let svc = test_service().await;
        let page = svc.list_farms(&FarmFilter::default(), 1).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_return_their_own_rows() {
        let svc = Arc::new(test_service().await);
        let tasks = (0..200)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    let name = format!("Farm {i}");
                    let farm = svc.create_farm(&farm_form(&name), None).await.unwrap();
                    (name, farm)
                })
            })
            .collect::<Vec<_>>();

        let mut ids = HashSet::new();
        for task in tasks {
            let (name, farm) = task.await.unwrap();
            assert_eq!(farm.name, name);
            assert!(ids.insert(farm.id), "id {} returned twice", farm.id);
        }

        let history = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Farm),
                limit: Some(1000),
                ..Default::default()
            })
            .await
            .unwrap();
        let audited = history.iter().map(|entry| entry.entity_id).collect::<HashSet<_>>();
        assert_eq!(history.len(), 200);
        assert_eq!(audited, ids);
    }

    #[tokio::test]
    async fn delete_records_cascaded_rows() {
        let svc = test_service().await;
        let farm = create_farm(&svc, "Oak Ridge").await;
        let field = create_field(&svc, farm.id, "North block").await;
        let point = svc
            .create_irrigation_point(&point_form(field.id, "IP-001"), None)
            .await
            .unwrap();

        svc.delete_farm(farm.id, None).await.unwrap();

        let deleted = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Deleted),
                ..Default::default()
            })
            .await
            .unwrap()
            .into_iter()
            .map(|entry| (entry.entity_type, entry.entity_id))
            .collect::<HashSet<_>>();
        assert_eq!(
            deleted,
            HashSet::from([
                (EntityType::Farm, farm.id),
                (EntityType::Field, field.id),
                (EntityType::IrrigationPoint, point.id),
            ])
        );
    }
}
