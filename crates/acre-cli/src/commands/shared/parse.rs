use acre_core::geo::{Point, Polygon, Position};
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (lon, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT but got '{raw}'"))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid longitude '{}': {error}", lon.trim()))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid latitude '{}': {error}", lat.trim()))?;
    Ok([lon, lat])
}

/// Parse `LON,LAT` into a point. Bounds are checked by the form.
pub fn parse_point(raw: &str) -> Result<Point, String> {
    let [lon, lat] = parse_position(raw)?;
    Ok(Point::new(lon, lat))
}

/// Parse `LON,LAT;LON,LAT;...` into a single-ring polygon, closing the ring.
pub fn parse_polygon(raw: &str) -> Result<Polygon, String> {
    let ring = raw
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;
    if ring.is_empty() {
        return Err("boundary has no positions".to_string());
    }
    Ok(Polygon::from_exterior(ring))
}

#[cfg(test)]
mod tests {
    use acre_core::enums::{AuditAction, EntityType};
    use pretty_assertions::assert_eq;

    use super::{parse_enum, parse_point, parse_polygon};

    #[test]
    fn parses_snake_case_enum_with_hyphens() {
        let entity: EntityType =
            parse_enum("irrigation-point", "entity type").expect("entity type should parse");
        assert_eq!(entity, EntityType::IrrigationPoint);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AuditAction>("removed", "action").expect_err("should fail");
        assert!(err.to_string().contains("invalid action 'removed'"));
    }

    #[test]
    fn parses_negative_coordinates() {
        let point = parse_point("29.45, -23.9").expect("point should parse");
        assert_eq!(point.coordinates, [29.45, -23.9]);
        assert!(parse_point("29.45").is_err());
        assert!(parse_point("east,north").is_err());
    }

    #[test]
    fn polygon_ring_is_closed() {
        let polygon = parse_polygon("29,-23; 29.1,-23; 29.1,-23.1; 29,-23.1").expect("polygon");
        let ring = polygon.exterior().expect("exterior ring");
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
        assert!(polygon.validate().is_ok());
    }
}
