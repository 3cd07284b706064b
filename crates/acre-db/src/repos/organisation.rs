//! Organisation repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::Organisation;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{FormErrors, OrganisationForm, OrganisationInput};
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{map_write_error, read_stamp};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, name, short_code, province_id, last_update, last_update_by";

/// List filters for organisations.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OrganisationFilter {
    /// Substring of the name or short code.
    pub search: Option<String>,
    pub province: Option<i64>,
}

fn row_to_organisation(row: &libsql::Row) -> Result<Organisation, DatabaseError> {
    Ok(Organisation {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        short_code: row.get::<String>(2)?,
        province_id: row.get::<Option<i64>>(3)?,
        stamp: read_stamp(row, 4)?,
    })
}

impl AcreService {
    async fn check_organisation_references(
        &self,
        input: &OrganisationInput,
    ) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "province", EntityType::Province, input.province_id)
            .await?;
        Ok(errors.into_result()?)
    }

    pub async fn create_organisation(
        &self,
        form: &OrganisationForm,
        acting_user: Option<i64>,
    ) -> Result<Organisation, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_organisation_references(&input).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::Organisation,
                    "INSERT INTO organisations (name, short_code, province_id, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                    libsql::params![
                        input.name.as_str(),
                        input.short_code.as_str(),
                        input.province_id,
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::Organisation,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_organisation(id).await
        })
        .await
    }

    pub async fn get_organisation(&self, id: i64) -> Result<Organisation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM organisations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Organisation,
            id,
        })?;
        row_to_organisation(&row)
    }

    pub async fn update_organisation(
        &self,
        id: i64,
        form: OrganisationForm,
        acting_user: Option<i64>,
    ) -> Result<Organisation, DatabaseError> {
        self.write(async move {
            let existing = self.get_organisation(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_organisation_references(&input).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE organisations SET name = ?1, short_code = ?2, province_id = ?3,
                     last_update = ?4, last_update_by = ?5 WHERE id = ?6",
                    libsql::params![
                        input.name.as_str(),
                        input.short_code.as_str(),
                        input.province_id,
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::Organisation))?;

            self.record_write(
                EntityType::Organisation,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_organisation(id).await
        })
        .await
    }

    /// Delete an organisation. Fails with `Conflict` while properties reference it.
    pub async fn delete_organisation(
        &self,
        id: i64,
        acting_user: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Organisation, id, acting_user)
            .await
    }

    pub async fn list_organisations(
        &self,
        filter: &OrganisationFilter,
        page: u32,
    ) -> Result<Page<Organisation>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .search(&["name", "short_code"], filter.search.as_deref())
            .eq("province_id", filter.province);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "organisations",
                order_by: "name, id",
            },
            &conditions,
            page,
            row_to_organisation,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{named, seed_wildlife, test_service};
    use acre_core::forms::INVALID_REFERENCE;
    use pretty_assertions::assert_eq;

    fn org_form(name: &str, code: &str, province: Option<i64>) -> OrganisationForm {
        OrganisationForm {
            name: Some(name.into()),
            short_code: Some(code.into()),
            province: Some(province),
        }
    }

    #[tokio::test]
    async fn organisation_without_province() {
        let svc = test_service().await;
        let org = svc
            .create_organisation(&org_form("Free Org", "FREE", None), None)
            .await
            .unwrap();
        assert_eq!(org.province_id, None);
    }

    #[tokio::test]
    async fn unknown_province_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_organisation(&org_form("Lost Org", "LOST", Some(99)), None)
            .await
            .unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(errors.get("province"), [INVALID_REFERENCE]);
    }

    #[tokio::test]
    async fn short_code_is_unique() {
        let svc = test_service().await;
        svc.create_organisation(&org_form("One", "ZORG", None), None)
            .await
            .unwrap();
        let err = svc
            .create_organisation(&org_form("Two", "ZORG", None), None)
            .await
            .unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(
            errors.get("short_code"),
            ["Organisation with this Short code already exists."]
        );
    }

    #[tokio::test]
    async fn update_can_clear_province() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        let patch: OrganisationForm = serde_json::from_str(r#"{"province": null}"#).unwrap();
        let org = svc
            .update_organisation(fixture.organisation.id, patch, Some(fixture.user1.id))
            .await
            .unwrap();
        assert_eq!(org.province_id, None);
        assert_eq!(org.short_code, "ZORG");
        assert_eq!(org.stamp.last_update_by, Some(fixture.user1.id));
    }

    #[tokio::test]
    async fn filter_by_province_and_search_code() {
        let svc = test_service().await;
        let limpopo = svc.create_province(&named("Limpopo"), None).await.unwrap();
        svc.create_organisation(&org_form("Zakki Org", "ZORG", Some(limpopo.id)), None)
            .await
            .unwrap();
        svc.create_organisation(&org_form("Other", "OTH", None), None)
            .await
            .unwrap();

        let in_limpopo = svc
            .list_organisations(
                &OrganisationFilter {
                    province: Some(limpopo.id),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(in_limpopo.total, 1);

        let by_code = svc
            .list_organisations(
                &OrganisationFilter {
                    search: Some("oth".into()),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(by_code.items[0].name, "Other");
    }
}
