//! Wildlife report: twelve read-only aggregate queries.
//!
//! "Top" queries return `None` when no group has a non-null aggregate.
//! Ties are broken by name, ascending.

use libsql::Value;

use acre_core::responses::{
    OrganisationArea, PropertyTotal, PropertyWithType, ProvinceCounts, ProvinceMales, ReportParams,
    ReportQuery, ReportSection, SexTotals, SpeciesCount, TaxonFamily, UserRecordCount,
    WildlifeReport,
};

use crate::error::DatabaseError;
use crate::service::AcreService;

impl AcreService {
    async fn report_rows<T>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map_row: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Vec<T>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(map_row(&row)?);
        }
        Ok(items)
    }

    async fn report_first<T>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map_row: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Option<T>, DatabaseError> {
        Ok(self.report_rows(sql, params, map_row).await?.into_iter().next())
    }

    /// Properties whose type name is one of `type_names`.
    pub async fn properties_by_type(
        &self,
        type_names: &[String],
    ) -> Result<Vec<PropertyWithType>, DatabaseError> {
        if type_names.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=type_names.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let params = type_names.iter().map(|name| Value::from(name.clone())).collect();
        self.report_rows(
            &format!(
                "SELECT p.name, pt.name FROM properties p
                 JOIN property_types pt ON pt.id = p.property_type_id
                 WHERE pt.name IN ({placeholders})
                 ORDER BY p.name, p.id"
            ),
            params,
            |row| {
                Ok(PropertyWithType {
                    property: row.get::<String>(0)?,
                    property_type: row.get::<String>(1)?,
                })
            },
        )
        .await
    }

    /// Provinces referenced by at least one organisation or property.
    pub async fn provinces_with_activity(&self) -> Result<Vec<String>, DatabaseError> {
        self.report_rows(
            "SELECT pr.name FROM provinces pr
             WHERE EXISTS (SELECT 1 FROM organisations o WHERE o.province_id = pr.id)
                OR EXISTS (SELECT 1 FROM properties p WHERE p.province_id = pr.id)
             ORDER BY pr.name",
            Vec::new(),
            |row| Ok(row.get::<String>(0)?),
        )
        .await
    }

    /// Organisation and property counts per province, skipping empty provinces.
    pub async fn province_counts(&self) -> Result<Vec<ProvinceCounts>, DatabaseError> {
        self.report_rows(
            "SELECT name, organisations, properties FROM (
                 SELECT pr.name AS name,
                        (SELECT COUNT(*) FROM organisations o WHERE o.province_id = pr.id) AS organisations,
                        (SELECT COUNT(*) FROM properties p WHERE p.province_id = pr.id) AS properties
                 FROM provinces pr
             )
             WHERE organisations > 0 OR properties > 0
             ORDER BY name",
            Vec::new(),
            |row| {
                Ok(ProvinceCounts {
                    province: row.get::<String>(0)?,
                    organisations: row.get::<i64>(1)?,
                    properties: row.get::<i64>(2)?,
                })
            },
        )
        .await
    }

    /// Summed adult males and females for a species in one year.
    /// The name match ignores case; both sums are `None` when nothing matches.
    pub async fn sex_totals(&self, scientific_name: &str, year: i32) -> Result<SexTotals, DatabaseError> {
        let totals = self
            .report_first(
                "SELECT SUM(ap.adult_male), SUM(ap.adult_female)
                 FROM annual_populations ap
                 JOIN taxa t ON t.id = ap.taxon_id
                 WHERE lower(t.scientific_name) = lower(?1) AND ap.year = ?2",
                vec![scientific_name.into(), year.into()],
                |row| {
                    Ok(SexTotals {
                        males: row.get::<Option<i64>>(0)?,
                        females: row.get::<Option<i64>>(1)?,
                    })
                },
            )
            .await?;
        Ok(totals.unwrap_or(SexTotals {
            males: None,
            females: None,
        }))
    }

    /// Number of distinct taxa counted on properties named `property_name`.
    pub async fn species_on_property(&self, property_name: &str) -> Result<SpeciesCount, DatabaseError> {
        let species = self
            .db()
            .query_count(
                "SELECT COUNT(DISTINCT ap.taxon_id)
                 FROM annual_populations ap
                 JOIN properties p ON p.id = ap.property_id
                 WHERE p.name = ?1",
                vec![property_name.into()],
            )
            .await?;
        Ok(SpeciesCount {
            property: property_name.to_string(),
            species,
        })
    }

    pub async fn top_organisation_by_area(&self) -> Result<Option<OrganisationArea>, DatabaseError> {
        self.report_first(
            "SELECT o.name, SUM(ap.area_available_to_species) AS total_area
             FROM organisations o
             JOIN properties p ON p.organisation_id = o.id
             JOIN annual_populations ap ON ap.property_id = p.id
             GROUP BY o.id
             ORDER BY total_area DESC, o.name
             LIMIT 1",
            Vec::new(),
            |row| {
                Ok(OrganisationArea {
                    organisation: row.get::<String>(0)?,
                    total_area: row.get::<f64>(1)?,
                })
            },
        )
        .await
    }

    /// Property with the most distinct taxa. A property with no counts
    /// still qualifies with zero species.
    pub async fn top_property_by_species(&self) -> Result<Option<SpeciesCount>, DatabaseError> {
        self.report_first(
            "SELECT p.name, COUNT(DISTINCT ap.taxon_id) AS species
             FROM properties p
             LEFT JOIN annual_populations ap ON ap.property_id = p.id
             GROUP BY p.id
             ORDER BY species DESC, p.name
             LIMIT 1",
            Vec::new(),
            |row| {
                Ok(SpeciesCount {
                    property: row.get::<String>(0)?,
                    species: row.get::<i64>(1)?,
                })
            },
        )
        .await
    }

    pub async fn top_property_by_total(&self) -> Result<Option<PropertyTotal>, DatabaseError> {
        self.report_first(
            "SELECT p.name, SUM(ap.total) AS total_animals
             FROM properties p
             JOIN annual_populations ap ON ap.property_id = p.id
             GROUP BY p.id
             ORDER BY total_animals DESC, p.name
             LIMIT 1",
            Vec::new(),
            |row| {
                Ok(PropertyTotal {
                    property: row.get::<String>(0)?,
                    total_animals: row.get::<i64>(1)?,
                })
            },
        )
        .await
    }

    pub async fn top_province_by_males(&self) -> Result<Option<ProvinceMales>, DatabaseError> {
        self.report_first(
            "SELECT pr.name, SUM(ap.adult_male) AS total_males
             FROM provinces pr
             JOIN properties p ON p.province_id = pr.id
             JOIN annual_populations ap ON ap.property_id = p.id
             GROUP BY pr.id
             ORDER BY total_males DESC, pr.name
             LIMIT 1",
            Vec::new(),
            |row| {
                Ok(ProvinceMales {
                    province: row.get::<String>(0)?,
                    total_males: row.get::<i64>(1)?,
                })
            },
        )
        .await
    }

    /// Parent and children of the taxon named exactly `scientific_name`.
    pub async fn taxon_family(&self, scientific_name: &str) -> Result<Option<TaxonFamily>, DatabaseError> {
        let taxon = self
            .report_first(
                "SELECT t.id, t.scientific_name, parent.scientific_name
                 FROM taxa t
                 LEFT JOIN taxa parent ON parent.id = t.parent_id
                 WHERE t.scientific_name = ?1
                 LIMIT 1",
                vec![scientific_name.into()],
                |row| {
                    Ok((
                        row.get::<i64>(0)?,
                        row.get::<String>(1)?,
                        row.get::<Option<String>>(2)?,
                    ))
                },
            )
            .await?;
        let Some((id, scientific_name, parent)) = taxon else {
            return Ok(None);
        };

        let children = self
            .report_rows(
                "SELECT scientific_name FROM taxa WHERE parent_id = ?1 ORDER BY scientific_name",
                vec![id.into()],
                |row| Ok(row.get::<String>(0)?),
            )
            .await?;
        Ok(Some(TaxonFamily {
            scientific_name,
            parent,
            children,
        }))
    }

    /// Taxa that are nobody's parent.
    pub async fn leaf_taxa(&self) -> Result<Vec<String>, DatabaseError> {
        self.report_rows(
            "SELECT t.scientific_name FROM taxa t
             WHERE NOT EXISTS (SELECT 1 FROM taxa c WHERE c.parent_id = t.id)
             ORDER BY t.scientific_name",
            Vec::new(),
            |row| Ok(row.get::<String>(0)?),
        )
        .await
    }

    /// User who recorded the most annual populations. Users without records
    /// never qualify.
    pub async fn top_user_by_records(&self) -> Result<Option<UserRecordCount>, DatabaseError> {
        self.report_first(
            "SELECT u.username, COUNT(ap.id) AS record_count
             FROM users u
             JOIN annual_populations ap ON ap.user_id = u.id
             GROUP BY u.id
             ORDER BY record_count DESC, u.username
             LIMIT 1",
            Vec::new(),
            |row| {
                Ok(UserRecordCount {
                    username: row.get::<String>(0)?,
                    record_count: row.get::<i64>(1)?,
                })
            },
        )
        .await
    }

    /// Run a single report query.
    pub async fn run_report_query(
        &self,
        query: ReportQuery,
        params: &ReportParams,
    ) -> Result<ReportSection, DatabaseError> {
        tracing::debug!(query = query.number(), title = query.title(), "running report query");
        Ok(match query {
            ReportQuery::PropertiesByType => {
                ReportSection::PropertiesByType(self.properties_by_type(&params.property_types).await?)
            }
            ReportQuery::ProvincesWithActivity => {
                ReportSection::ProvincesWithActivity(self.provinces_with_activity().await?)
            }
            ReportQuery::ProvinceCounts => ReportSection::ProvinceCounts(self.province_counts().await?),
            ReportQuery::SexTotals => {
                ReportSection::SexTotals(self.sex_totals(&params.scientific_name, params.year).await?)
            }
            ReportQuery::SpeciesOnProperty => {
                ReportSection::SpeciesOnProperty(self.species_on_property(&params.property_name).await?)
            }
            ReportQuery::TopOrganisationByArea => {
                ReportSection::TopOrganisationByArea(self.top_organisation_by_area().await?)
            }
            ReportQuery::TopPropertyBySpecies => {
                ReportSection::TopPropertyBySpecies(self.top_property_by_species().await?)
            }
            ReportQuery::TopPropertyByTotal => {
                ReportSection::TopPropertyByTotal(self.top_property_by_total().await?)
            }
            ReportQuery::TopProvinceByMales => {
                ReportSection::TopProvinceByMales(self.top_province_by_males().await?)
            }
            ReportQuery::TaxonFamily => {
                ReportSection::TaxonFamily(self.taxon_family(&params.family_taxon).await?)
            }
            ReportQuery::LeafTaxa => ReportSection::LeafTaxa(self.leaf_taxa().await?),
            ReportQuery::TopUserByRecords => {
                ReportSection::TopUserByRecords(self.top_user_by_records().await?)
            }
        })
    }

    /// Run all twelve queries.
    pub async fn wildlife_report(&self, params: &ReportParams) -> Result<WildlifeReport, DatabaseError> {
        tracing::info!(year = params.year, "building wildlife report");
        Ok(WildlifeReport {
            params: params.clone(),
            properties_by_type: self.properties_by_type(&params.property_types).await?,
            provinces_with_activity: self.provinces_with_activity().await?,
            province_counts: self.province_counts().await?,
            sex_totals: self.sex_totals(&params.scientific_name, params.year).await?,
            species_on_property: self.species_on_property(&params.property_name).await?,
            top_organisation_by_area: self.top_organisation_by_area().await?,
            top_property_by_species: self.top_property_by_species().await?,
            top_property_by_total: self.top_property_by_total().await?,
            top_province_by_males: self.top_province_by_males().await?,
            taxon_family: self.taxon_family(&params.family_taxon).await?,
            leaf_taxa: self.leaf_taxa().await?,
            top_user_by_records: self.top_user_by_records().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{named, population_form, seed_wildlife, test_service};
    use acre_core::forms::PropertyForm;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn properties_filter_by_type_name() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        let params = ReportParams::default();
        assert_eq!(
            svc.properties_by_type(&params.property_types).await.unwrap(),
            vec![PropertyWithType {
                property: "Zakki Property".into(),
                property_type: "Private".into(),
            }]
        );
        assert!(svc.properties_by_type(&["Communal".to_string()]).await.unwrap().is_empty());
        assert!(svc.properties_by_type(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_province_is_not_reported() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        svc.create_province(&named("EmptyLand"), None).await.unwrap();

        assert_eq!(svc.provinces_with_activity().await.unwrap(), vec!["Limpopo"]);
        assert_eq!(
            svc.province_counts().await.unwrap(),
            vec![ProvinceCounts {
                province: "Limpopo".into(),
                organisations: 1,
                properties: 1,
            }]
        );
    }

    #[tokio::test]
    async fn sex_totals_sum_both_records() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        let totals = svc.sex_totals("acinonyx JUBATUS", 2021).await.unwrap();
        assert_eq!(totals, SexTotals { males: Some(10), females: Some(15) });

        let none = svc.sex_totals("Acinonyx jubatus", 1999).await.unwrap();
        assert_eq!(none, SexTotals { males: None, females: None });
    }

    #[tokio::test]
    async fn distinct_species_on_property() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        let count = svc.species_on_property("Zakki Property").await.unwrap();
        assert_eq!(count.species, 1);
        assert_eq!(svc.species_on_property("Nowhere").await.unwrap().species, 0);
    }

    #[tokio::test]
    async fn top_queries_match_fixture() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;

        assert_eq!(
            svc.top_organisation_by_area().await.unwrap(),
            Some(OrganisationArea {
                organisation: "Zakki Org".into(),
                total_area: 150.0,
            })
        );
        assert_eq!(
            svc.top_property_by_species().await.unwrap(),
            Some(SpeciesCount {
                property: "Zakki Property".into(),
                species: 1,
            })
        );
        assert_eq!(
            svc.top_property_by_total().await.unwrap(),
            Some(PropertyTotal {
                property: "Zakki Property".into(),
                total_animals: 25,
            })
        );
        assert_eq!(
            svc.top_province_by_males().await.unwrap(),
            Some(ProvinceMales {
                province: fixture.province.name.clone(),
                total_males: 10,
            })
        );
    }

    #[tokio::test]
    async fn top_user_ties_break_by_username() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        assert_eq!(
            svc.top_user_by_records().await.unwrap(),
            Some(UserRecordCount {
                username: "user1".into(),
                record_count: 1,
            })
        );
    }

    #[tokio::test]
    async fn top_user_follows_record_count() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        let mut form = population_form(
            fixture.species.id,
            fixture.property.id,
            Some(fixture.user2.id),
            (4, 2, 2),
            10.0,
        );
        form.year = Some(2022);
        svc.create_annual_population(&form, None).await.unwrap();

        let top = svc.top_user_by_records().await.unwrap().unwrap();
        assert_eq!(top.username, "user2");
        assert_eq!(top.record_count, 2);
    }

    #[tokio::test]
    async fn property_without_counts_still_ranks_by_species() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        svc.create_property(
            &PropertyForm {
                name: Some("Aardvark Ranch".into()),
                short_code: Some("AR01".into()),
                province: Some(fixture.province.id),
                property_type: Some(fixture.type_community.id),
                organisation: Some(fixture.organisation.id),
                centroid: None,
            },
            None,
        )
        .await
        .unwrap();

        let top = svc.top_property_by_species().await.unwrap().unwrap();
        assert_eq!(top.property, "Zakki Property");
        assert_eq!(svc.properties_by_type(&ReportParams::default().property_types).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn taxon_family_and_leaves() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;

        assert_eq!(
            svc.taxon_family("Acinonyx jubatus").await.unwrap(),
            Some(TaxonFamily {
                scientific_name: "Acinonyx jubatus".into(),
                parent: Some("Acinonyx".into()),
                children: vec![],
            })
        );
        assert_eq!(
            svc.taxon_family("Acinonyx").await.unwrap().unwrap().children,
            vec!["Acinonyx jubatus"]
        );
        assert_eq!(svc.taxon_family("acinonyx").await.unwrap(), None);
        assert_eq!(svc.leaf_taxa().await.unwrap(), vec!["Acinonyx jubatus"]);
    }

    #[tokio::test]
    async fn empty_database_reports_no_data() {
        let svc = test_service().await;
        let report = svc.wildlife_report(&ReportParams::default()).await.unwrap();

        assert!(report.properties_by_type.is_empty());
        assert!(report.provinces_with_activity.is_empty());
        assert_eq!(report.sex_totals, SexTotals { males: None, females: None });
        assert_eq!(report.species_on_property.species, 0);
        assert_eq!(report.top_organisation_by_area, None);
        assert_eq!(report.top_property_by_species, None);
        assert_eq!(report.top_property_by_total, None);
        assert_eq!(report.top_province_by_males, None);
        assert_eq!(report.taxon_family, None);
        assert!(report.leaf_taxa.is_empty());
        assert_eq!(report.top_user_by_records, None);
    }

    #[tokio::test]
    async fn single_query_matches_full_report() {
        let svc = test_service().await;
        seed_wildlife(&svc).await;
        let params = ReportParams::default();
        let report = svc.wildlife_report(&params).await.unwrap();

        for section in report.sections() {
            let single = svc.run_report_query(section.query(), &params).await.unwrap();
            assert_eq!(single, section);
        }
    }
}
