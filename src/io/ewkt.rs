//! Textual geometry encoding with an optional `SRID=<n>;` prefix.

use crate::{constants::UNKNOWN_SRID, Error, Result};
use geo_types::Geometry;
use wkt::{ToWkt, TryFromWkt};

/// `SRID=4326;POINT(1 2)`, or plain WKT when the SRID is unknown
pub fn to_ewkt(geometry: &Geometry<f64>, srid: i32) -> String {
    let wkt = geometry.wkt_string();
    if srid == UNKNOWN_SRID {
        wkt
    } else {
        format!("SRID={};{}", srid, wkt)
    }
}

/// Parses EWKT or plain WKT; the SRID is 0 when absent
pub fn parse_ewkt(text: &str) -> Result<(Geometry<f64>, i32)> {
    let text = text.trim();
    let (srid, body) = match text.strip_prefix("SRID=") {
        Some(rest) => {
            let (srid, body) = rest
                .split_once(';')
                .ok_or_else(|| Error::Encoding(format!("missing ';' after SRID in '{}'", text)))?;
            let srid = srid
                .trim()
                .parse::<i32>()
                .map_err(|e| Error::Encoding(format!("invalid SRID '{}': {}", srid, e)))?;
            (srid, body)
        }
        None => (UNKNOWN_SRID, text),
    };

    let geometry = Geometry::<f64>::try_from_wkt_str(body)
        .map_err(|e| Error::Encoding(format!("invalid WKT '{}': {}", body, e)))?;
    Ok((geometry, srid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, polygon};

    #[test]
    fn test_srid_prefix() {
        let geometry = Geometry::Point(point!(x: 1.0, y: 2.0));
        assert_eq!(to_ewkt(&geometry, 4326), "SRID=4326;POINT(1 2)");
        assert_eq!(to_ewkt(&geometry, 0), "POINT(1 2)");
    }

    #[test]
    fn test_parse_round_trips_polygon() {
        let geometry = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]);
        let (parsed, srid) = parse_ewkt(&to_ewkt(&geometry, 2154)).unwrap();
        assert_eq!(srid, 2154);
        assert_eq!(parsed, geometry);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_ewkt("SRID=abc;POINT(1 2)"), Err(Error::Encoding(_))));
        assert!(matches!(parse_ewkt("SRID=4326 POINT(1 2)"), Err(Error::Encoding(_))));
        assert!(matches!(parse_ewkt("POINT(1"), Err(Error::Encoding(_))));
    }
}
