//! Row-to-entity parsing helpers and SQL fragments shared by the repos.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. Timestamps are RFC 3339, dates are `%Y-%m-%d`, and geometries are
//! GeoJSON text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use acre_core::entities::AuditStamp;
use acre_core::enums::EntityType;
use acre_core::forms::{FormErrors, INVALID_REFERENCE, NON_FIELD_ERRORS};

use crate::error::DatabaseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not `YYYY-MM-DD`.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all acre-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Parse a GeoJSON TEXT column into a geometry value.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the text is not the expected geometry.
pub fn parse_geometry<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid geometry in column: {e}")))
}

/// Serialize a value to JSON text for storage.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_text<T: Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}

/// Read the trailing `last_update, last_update_by` columns starting at `idx`.
///
/// # Errors
///
/// Returns `DatabaseError` if either column is missing or malformed.
pub fn read_stamp(row: &libsql::Row, idx: i32) -> Result<AuditStamp, DatabaseError> {
    Ok(AuditStamp {
        last_update: parse_datetime(&row.get::<String>(idx)?)?,
        last_update_by: row.get::<Option<i64>>(idx + 1)?,
    })
}

/// Map `EntityType` to the corresponding SQL table name.
#[must_use]
pub const fn entity_type_to_table(entity: EntityType) -> &'static str {
    match entity {
        EntityType::User => "users",
        EntityType::Farm => "farms",
        EntityType::Field => "fields",
        EntityType::IrrigationPoint => "irrigation_points",
        EntityType::Province => "provinces",
        EntityType::Organisation => "organisations",
        EntityType::PropertyType => "property_types",
        EntityType::Property => "properties",
        EntityType::TaxonRank => "taxon_ranks",
        EntityType::Taxon => "taxa",
        EntityType::AnnualPopulation => "annual_populations",
    }
}

/// `LIKE` pattern matching `term` anywhere, with wildcards escaped.
///
/// Use with `ESCAPE '\'`.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Translate a constraint failure from an INSERT or UPDATE into form errors.
///
/// `UNIQUE constraint failed: table.column` becomes a message on `column`;
/// foreign key failures become a non-field invalid-reference message. Other
/// errors pass through unchanged.
#[must_use]
pub fn map_write_error(err: libsql::Error, entity: EntityType) -> DatabaseError {
    let message = err.to_string();
    if let Some(column) = unique_violation_column(&message) {
        let label = capfirst(&column.replace('_', " "));
        return DatabaseError::Form(FormErrors::single(
            column,
            format!("{} with this {label} already exists.", entity.label()),
        ));
    }
    if message.contains("FOREIGN KEY constraint failed") {
        return DatabaseError::Form(FormErrors::single(NON_FIELD_ERRORS, INVALID_REFERENCE));
    }
    DatabaseError::LibSql(err)
}

/// The first column named by a `UNIQUE constraint failed` message.
///
/// libSQL quotes the driver message in backticks, so those delimit the
/// column as well as commas and spaces.
fn unique_violation_column(message: &str) -> Option<&str> {
    let rest = message.split("UNIQUE constraint failed: ").nth(1)?;
    let qualified = rest.split([',', ' ', '`']).next()?;
    qualified
        .rsplit('.')
        .next()
        .filter(|column| !column.is_empty())
        .or(Some(NON_FIELD_ERRORS))
}

/// Translate a foreign key failure from a DELETE into a conflict.
#[must_use]
pub fn map_delete_error(err: libsql::Error, entity: EntityType, id: i64) -> DatabaseError {
    if err.to_string().contains("FOREIGN KEY constraint failed") {
        return DatabaseError::Conflict(format!(
            "{} {id} is still referenced by other records.",
            entity.label()
        ));
    }
    DatabaseError::LibSql(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("SQLite failure: `UNIQUE constraint failed: users.username`", "username")]
    #[case("UNIQUE constraint failed: taxa.scientific_name", "scientific_name")]
    #[case(
        "SQLite failure: `UNIQUE constraint failed: annual_populations.year, annual_populations.taxon_id`",
        "year"
    )]
    fn unique_violation_names_the_column(#[case] message: &str, #[case] column: &str) {
        assert_eq!(unique_violation_column(message), Some(column));
    }

    #[test]
    fn unrelated_errors_name_no_column() {
        assert_eq!(unique_violation_column("SQLite failure: `no such table: farms`"), None);
    }

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn dates_roundtrip_through_text() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 30).unwrap();
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }

    #[rstest]
    #[case("oak", "%oak%")]
    #[case("50%", "%50\\%%")]
    #[case("ip_1", "%ip\\_1%")]
    fn like_patterns_escape_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(term), expected);
    }

    #[test]
    fn capfirst_uppercases_first_char() {
        assert_eq!(capfirst("point id"), "Point id");
        assert_eq!(capfirst(""), "");
    }

    #[test]
    fn geometry_column_parses() {
        let point: acre_core::geo::Point =
            parse_geometry(r#"{"type":"Point","coordinates":[29.0,-23.5]}"#).unwrap();
        assert_eq!(point.lat(), -23.5);
    }
}
