//! Route handlers.
//!
//! Every collection gets the same five handlers, generated by `collection!`:
//! `GET /{collection}`, `POST /{collection}`, and `GET`/`PUT`/`DELETE` on
//! `/{collection}/{id}`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use acre_core::entities::AuditEntry;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::responses::{DeleteResponse, Page, ReportParams, ReportQuery, WriteResponse};
use acre_db::repos::audit::AuditFilter;
use acre_db::service::AcreService;

use crate::error::ApiError;
use crate::extract::{ActingUser, Body, Id, PageParam, Params};

type AppState = State<Arc<AcreService>>;

macro_rules! collection {
    (
        $module:ident, $path:literal, $entity:expr,
        record: $record:ty, form: $form:ty, filter: $filter:ty,
        create: $create:ident, get: $get:ident, update: $update:ident,
        delete: $delete:ident, list: $list:ident $(,)?
    ) => {
        pub mod $module {
            use super::*;

            pub fn routes() -> Router<Arc<AcreService>> {
                Router::new()
                    .route($path, get(list).post(create))
                    .route(concat!($path, "/{id}"), get(show).put(update).delete(delete))
            }

            async fn list(
                State(service): AppState,
                Params(page): Params<PageParam>,
                Params(filter): Params<$filter>,
            ) -> Result<Json<Page<$record>>, ApiError> {
                Ok(Json(service.$list(&filter, page.page).await?))
            }

            async fn create(
                State(service): AppState,
                ActingUser(user): ActingUser,
                Body(form): Body<$form>,
            ) -> Result<(StatusCode, Json<WriteResponse<$record>>), ApiError> {
                let record = service.$create(&form, user).await?;
                Ok((
                    StatusCode::CREATED,
                    Json(WriteResponse {
                        message: $entity.success_message(AuditAction::Created),
                        record,
                    }),
                ))
            }

            async fn show(
                State(service): AppState,
                Id(id): Id,
            ) -> Result<Json<$record>, ApiError> {
                Ok(Json(service.$get(id).await?))
            }

            async fn update(
                State(service): AppState,
                Id(id): Id,
                ActingUser(user): ActingUser,
                Body(form): Body<$form>,
            ) -> Result<Json<WriteResponse<$record>>, ApiError> {
                let record = service.$update(id, form, user).await?;
                Ok(Json(WriteResponse {
                    message: $entity.success_message(AuditAction::Updated),
                    record,
                }))
            }

            async fn delete(
                State(service): AppState,
                Id(id): Id,
                ActingUser(user): ActingUser,
            ) -> Result<Json<DeleteResponse>, ApiError> {
                service.$delete(id, user).await?;
                Ok(Json(DeleteResponse {
                    message: $entity.success_message(AuditAction::Deleted),
                    id,
                }))
            }
        }
    };
}

collection!(
    farms, "/farms", EntityType::Farm,
    record: acre_core::entities::Farm,
    form: acre_core::forms::FarmForm,
    filter: acre_db::repos::farm::FarmFilter,
    create: create_farm, get: get_farm, update: update_farm,
    delete: delete_farm, list: list_farms,
);

collection!(
    fields, "/fields", EntityType::Field,
    record: acre_core::entities::Field,
    form: acre_core::forms::FieldForm,
    filter: acre_db::repos::field::FieldFilter,
    create: create_field, get: get_field, update: update_field,
    delete: delete_field, list: list_fields,
);

collection!(
    irrigation_points, "/irrigation-points", EntityType::IrrigationPoint,
    record: acre_core::entities::IrrigationPoint,
    form: acre_core::forms::IrrigationPointForm,
    filter: acre_db::repos::irrigation::IrrigationPointFilter,
    create: create_irrigation_point, get: get_irrigation_point,
    update: update_irrigation_point, delete: delete_irrigation_point,
    list: list_irrigation_points,
);

collection!(
    users, "/users", EntityType::User,
    record: acre_core::entities::User,
    form: acre_core::forms::UserForm,
    filter: acre_db::repos::user::UserFilter,
    create: create_user, get: get_user, update: update_user,
    delete: delete_user, list: list_users,
);

collection!(
    provinces, "/provinces", EntityType::Province,
    record: acre_core::entities::Province,
    form: acre_core::forms::NamedForm,
    filter: acre_db::repos::named::NameFilter,
    create: create_province, get: get_province, update: update_province,
    delete: delete_province, list: list_provinces,
);

collection!(
    organisations, "/organisations", EntityType::Organisation,
    record: acre_core::entities::Organisation,
    form: acre_core::forms::OrganisationForm,
    filter: acre_db::repos::organisation::OrganisationFilter,
    create: create_organisation, get: get_organisation, update: update_organisation,
    delete: delete_organisation, list: list_organisations,
);

collection!(
    property_types, "/property-types", EntityType::PropertyType,
    record: acre_core::entities::PropertyType,
    form: acre_core::forms::NamedForm,
    filter: acre_db::repos::named::NameFilter,
    create: create_property_type, get: get_property_type, update: update_property_type,
    delete: delete_property_type, list: list_property_types,
);

collection!(
    properties, "/properties", EntityType::Property,
    record: acre_core::entities::Property,
    form: acre_core::forms::PropertyForm,
    filter: acre_db::repos::property::PropertyFilter,
    create: create_property, get: get_property, update: update_property,
    delete: delete_property, list: list_properties,
);

collection!(
    taxon_ranks, "/taxon-ranks", EntityType::TaxonRank,
    record: acre_core::entities::TaxonRank,
    form: acre_core::forms::NamedForm,
    filter: acre_db::repos::named::NameFilter,
    create: create_taxon_rank, get: get_taxon_rank, update: update_taxon_rank,
    delete: delete_taxon_rank, list: list_taxon_ranks,
);

collection!(
    taxa, "/taxa", EntityType::Taxon,
    record: acre_core::entities::Taxon,
    form: acre_core::forms::TaxonForm,
    filter: acre_db::repos::taxon::TaxonFilter,
    create: create_taxon, get: get_taxon, update: update_taxon,
    delete: delete_taxon, list: list_taxa,
);

collection!(
    annual_populations, "/annual-populations", EntityType::AnnualPopulation,
    record: acre_core::entities::AnnualPopulation,
    form: acre_core::forms::AnnualPopulationForm,
    filter: acre_db::repos::population::PopulationFilter,
    create: create_annual_population, get: get_annual_population,
    update: update_annual_population, delete: delete_annual_population,
    list: list_annual_populations,
);

pub fn collections() -> Router<Arc<AcreService>> {
    Router::new()
        .merge(farms::routes())
        .merge(fields::routes())
        .merge(irrigation_points::routes())
        .merge(users::routes())
        .merge(provinces::routes())
        .merge(organisations::routes())
        .merge(property_types::routes())
        .merge(properties::routes())
        .merge(taxon_ranks::routes())
        .merge(taxa::routes())
        .merge(annual_populations::routes())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn history(
    State(service): AppState,
    Params(filter): Params<AuditFilter>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    Ok(Json(service.query_audit(&filter).await?))
}

/// Report parameters as they arrive in a query string.
///
/// `property_types` is comma-separated; `only` selects one query by number.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQueryString {
    property_types: Option<String>,
    scientific_name: Option<String>,
    year: Option<i32>,
    property_name: Option<String>,
    family_taxon: Option<String>,
    only: Option<u8>,
}

impl ReportQueryString {
    fn params(self) -> ReportParams {
        let defaults = ReportParams::default();
        ReportParams {
            property_types: self.property_types.map_or(defaults.property_types, |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
                    .collect()
            }),
            scientific_name: self.scientific_name.unwrap_or(defaults.scientific_name),
            year: self.year.unwrap_or(defaults.year),
            property_name: self.property_name.unwrap_or(defaults.property_name),
            family_taxon: self.family_taxon.unwrap_or(defaults.family_taxon),
        }
    }
}

pub async fn wildlife_report(
    State(service): AppState,
    Params(query): Params<ReportQueryString>,
) -> Result<Json<Value>, ApiError> {
    let only = query.only;
    let params = query.params();
    let body = match only {
        Some(number) => {
            let report_query = ReportQuery::from_number(number).ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "Unknown report query {number}; expected 1 to {}",
                    ReportQuery::ALL.len()
                ))
            })?;
            serde_json::to_value(service.run_report_query(report_query, &params).await?)
        }
        None => serde_json::to_value(service.wildlife_report(&params).await?),
    }
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(body))
}
