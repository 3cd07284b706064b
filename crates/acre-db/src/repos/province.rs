//! Province repository.

use acre_core::entities::Province;
use acre_core::enums::EntityType;
use acre_core::forms::NamedForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::repos::named::{NameFilter, NamedRow};
use crate::service::AcreService;

fn into_province(row: NamedRow) -> Province {
    Province {
        id: row.id,
        name: row.name,
        stamp: row.stamp,
    }
}

impl AcreService {
    pub async fn create_province(
        &self,
        form: &NamedForm,
        acting_user: Option<i64>,
    ) -> Result<Province, DatabaseError> {
        self.create_named(EntityType::Province, form, acting_user)
            .await
            .map(into_province)
    }

    pub async fn get_province(&self, id: i64) -> Result<Province, DatabaseError> {
        self.get_named(EntityType::Province, id).await.map(into_province)
    }

    pub async fn update_province(
        &self,
        id: i64,
        form: NamedForm,
        acting_user: Option<i64>,
    ) -> Result<Province, DatabaseError> {
        self.update_named(EntityType::Province, id, form, acting_user)
            .await
            .map(into_province)
    }

    /// Delete a province. Fails with `Conflict` while organisations or
    /// properties reference it.
    pub async fn delete_province(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Province, id, acting_user).await
    }

    pub async fn list_provinces(
        &self,
        filter: &NameFilter,
        page: u32,
    ) -> Result<Page<Province>, DatabaseError> {
        Ok(self
            .list_named(EntityType::Province, filter, page)
            .await?
            .map(into_province))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{named, seed_wildlife, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn province_names_are_unique() {
        let svc = test_service().await;
        svc.create_province(&named("Limpopo"), None).await.unwrap();
        let err = svc
            .create_province(&named("Limpopo"), None)
            .await
            .unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(errors.get("name"), ["Province with this Name already exists."]);
    }

    #[tokio::test]
    async fn referenced_province_cannot_be_deleted() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        assert!(matches!(
            svc.delete_province(fixture.province.id, None).await,
            Err(DatabaseError::Conflict(_))
        ));
        assert!(svc.get_province(fixture.province.id).await.is_ok());
    }

    #[tokio::test]
    async fn rename_and_list_in_name_order() {
        let svc = test_service().await;
        let gauteng = svc.create_province(&named("Gauteng"), None).await.unwrap();
        svc.create_province(&named("Limpopo"), None).await.unwrap();
        svc.update_province(gauteng.id, named("Mpumalanga"), None)
            .await
            .unwrap();

        let page = svc
            .list_provinces(&NameFilter::default(), 1)
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Limpopo", "Mpumalanga"]);
    }
}
