//! Property type repository.

use acre_core::entities::PropertyType;
use acre_core::enums::EntityType;
use acre_core::forms::NamedForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::repos::named::{NameFilter, NamedRow};
use crate::service::AcreService;

fn into_property_type(row: NamedRow) -> PropertyType {
    PropertyType {
        id: row.id,
        name: row.name,
        stamp: row.stamp,
    }
}

impl AcreService {
    pub async fn create_property_type(
        &self,
        form: &NamedForm,
        acting_user: Option<i64>,
    ) -> Result<PropertyType, DatabaseError> {
        self.create_named(EntityType::PropertyType, form, acting_user)
            .await
            .map(into_property_type)
    }

    pub async fn get_property_type(&self, id: i64) -> Result<PropertyType, DatabaseError> {
        self.get_named(EntityType::PropertyType, id)
            .await
            .map(into_property_type)
    }

    pub async fn update_property_type(
        &self,
        id: i64,
        form: NamedForm,
        acting_user: Option<i64>,
    ) -> Result<PropertyType, DatabaseError> {
        self.update_named(EntityType::PropertyType, id, form, acting_user)
            .await
            .map(into_property_type)
    }

    pub async fn delete_property_type(
        &self,
        id: i64,
        acting_user: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::PropertyType, id, acting_user)
            .await
    }

    pub async fn list_property_types(
        &self,
        filter: &NameFilter,
        page: u32,
    ) -> Result<Page<PropertyType>, DatabaseError> {
        Ok(self
            .list_named(EntityType::PropertyType, filter, page)
            .await?
            .map(into_property_type))
    }
}
