//! Shared test utilities for acre-db tests.

pub(crate) mod helpers {
    use acre_core::entities::{
        AnnualPopulation, Farm, Field, Organisation, Property, PropertyType, Province, Taxon,
        TaxonRank, User,
    };
    use acre_core::forms::{
        AnnualPopulationForm, FarmForm, FieldForm, IrrigationPointForm, NamedForm,
        OrganisationForm, PropertyForm, TaxonForm, UserForm,
    };
    use acre_core::geo::{Point, Polygon};

    use crate::AcreDb;
    use crate::service::AcreService;

    /// Create an in-memory `AcreService` with the default page size.
    pub async fn test_service() -> AcreService {
        let db = AcreDb::open_local(":memory:").await.unwrap();
        AcreService::from_db(db)
    }

    pub async fn create_user(svc: &AcreService, username: &str) -> User {
        svc.create_user(
            &UserForm {
                username: Some(username.into()),
            },
            None,
        )
        .await
        .unwrap()
    }

    pub fn farm_form(name: &str) -> FarmForm {
        FarmForm {
            name: Some(name.into()),
            owner_name: Some("M. Dlamini".into()),
            area: Some(120.5),
            location: Some(Point::new(29.45, -23.9)),
        }
    }

    pub async fn create_farm(svc: &AcreService, name: &str) -> Farm {
        svc.create_farm(&farm_form(name), None).await.unwrap()
    }

    pub fn boundary() -> Polygon {
        Polygon::from_exterior(vec![[29.0, -23.0], [29.1, -23.0], [29.1, -23.1], [29.0, -23.1]])
    }

    pub fn field_form(farm_id: i64, name: &str, crop: &str) -> FieldForm {
        FieldForm {
            farm: Some(farm_id),
            name: Some(name.into()),
            crop_type: Some(crop.into()),
            boundary: Some(boundary()),
            area: Some(4.5),
            planted_on: None,
        }
    }

    pub async fn create_field(svc: &AcreService, farm_id: i64, name: &str) -> Field {
        svc.create_field(&field_form(farm_id, name, "corn"), None)
            .await
            .unwrap()
    }

    pub fn point_form(field_id: i64, point_id: &str) -> IrrigationPointForm {
        IrrigationPointForm {
            field: Some(field_id),
            point_id: Some(point_id.into()),
            location: Some(Point::new(29.05, -23.05)),
            water_source: Some("canal".into()),
            installed_on: None,
        }
    }

    pub fn named(name: &str) -> NamedForm {
        NamedForm {
            name: Some(name.into()),
        }
    }

    /// The wildlife records used by the report tests.
    pub struct WildlifeFixture {
        pub user1: User,
        pub user2: User,
        pub province: Province,
        pub type_private: PropertyType,
        pub type_community: PropertyType,
        pub organisation: Organisation,
        pub property: Property,
        pub rank_species: TaxonRank,
        pub rank_genus: TaxonRank,
        pub genus: Taxon,
        pub species: Taxon,
        pub populations: Vec<AnnualPopulation>,
    }

    /// Two users, one province, one organisation and property, a genus with
    /// one species, and two 2021 counts of that species by different users.
    pub async fn seed_wildlife(svc: &AcreService) -> WildlifeFixture {
        let user1 = create_user(svc, "user1").await;
        let user2 = create_user(svc, "user2").await;
        let province = svc.create_province(&named("Limpopo"), None).await.unwrap();
        let type_private = svc.create_property_type(&named("Private"), None).await.unwrap();
        let type_community = svc
            .create_property_type(&named("Community"), None)
            .await
            .unwrap();
        let organisation = svc
            .create_organisation(
                &OrganisationForm {
                    name: Some("Zakki Org".into()),
                    short_code: Some("ZORG".into()),
                    province: Some(Some(province.id)),
                },
                None,
            )
            .await
            .unwrap();
        let property = svc
            .create_property(
                &PropertyForm {
                    name: Some("Zakki Property".into()),
                    short_code: Some("ZP01".into()),
                    province: Some(province.id),
                    property_type: Some(type_private.id),
                    organisation: Some(organisation.id),
                    centroid: None,
                },
                None,
            )
            .await
            .unwrap();
        let rank_species = svc.create_taxon_rank(&named("Species"), None).await.unwrap();
        let rank_genus = svc.create_taxon_rank(&named("Genus"), None).await.unwrap();
        let genus = svc
            .create_taxon(
                &TaxonForm {
                    scientific_name: Some("Acinonyx".into()),
                    taxon_rank: Some(Some(rank_genus.id)),
                    ..TaxonForm::default()
                },
                None,
            )
            .await
            .unwrap();
        let species = svc
            .create_taxon(
                &TaxonForm {
                    scientific_name: Some("Acinonyx jubatus".into()),
                    taxon_rank: Some(Some(rank_species.id)),
                    parent: Some(Some(genus.id)),
                    ..TaxonForm::default()
                },
                None,
            )
            .await
            .unwrap();

        let mut populations = Vec::new();
        for (total, male, female, user, area) in [(20, 8, 12, &user1, 100.0), (5, 2, 3, &user2, 50.0)] {
            let population = svc
                .create_annual_population(
                    &population_form(species.id, property.id, Some(user.id), (total, male, female), area),
                    None,
                )
                .await
                .unwrap();
            populations.push(population);
        }

        WildlifeFixture {
            user1,
            user2,
            province,
            type_private,
            type_community,
            organisation,
            property,
            rank_species,
            rank_genus,
            genus,
            species,
            populations,
        }
    }

    pub fn population_form(
        taxon_id: i64,
        property_id: i64,
        user_id: Option<i64>,
        (total, adult_male, adult_female): (i64, i64, i64),
        area: f64,
    ) -> AnnualPopulationForm {
        AnnualPopulationForm {
            year: Some(2021),
            total: Some(total),
            adult_male: Some(adult_male),
            adult_female: Some(adult_female),
            area_available_to_species: Some(area),
            user: Some(user_id),
            taxon: Some(taxon_id),
            property: Some(property_id),
        }
    }
}
