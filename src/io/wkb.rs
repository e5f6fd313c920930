//! Well-known binary geometry codec, including the PostGIS extended form
//! (EWKB) that embeds a spatial reference identifier.
//!
//! Decoding accepts either byte order, ISO and EWKB dimension markers, and
//! drops Z and M ordinates. Encoding always produces little-endian 2D EWKB.

use crate::{constants::UNKNOWN_SRID, Error, Result};
use geo_types::Geometry;
use geozero::{
    error::{GeozeroError, Result as GeozeroResult},
    wkb::{Ewkb, Wkb},
    CoordDimensions, GeomProcessor, GeozeroGeometry, ToGeo, ToWkb,
};

const EWKB_SRID_FLAG: u32 = 0x2000_0000;
const EWKB_FLAGS: u32 = 0xE000_0000;

/// Deepest collection nesting accepted on decode
pub const MAX_NESTING_DEPTH: usize = 64;

/// A decoded geometry and the SRID it carried (0 when none)
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedGeometry {
    pub geometry: Geometry<f64>,
    pub srid: i32,
}

fn codec_error(err: GeozeroError) -> Error {
    Error::Encoding(format!("invalid WKB: {}", err))
}

/// Top-level header fields needed to pick a reader
struct Header {
    iso: bool,
    srid: i32,
}

fn read_u32(bytes: &[u8], offset: usize, little_endian: bool) -> Result<u32> {
    let raw: [u8; 4] = bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| Error::Encoding("unexpected end of WKB data".into()))?;
    Ok(if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}

fn read_header(bytes: &[u8]) -> Result<Header> {
    let little_endian = match bytes.first() {
        Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(Error::Encoding(format!("invalid byte order marker {}", other)))
        }
        None => return Err(Error::Encoding("empty WKB data".into())),
    };
    let type_id = read_u32(bytes, 1, little_endian)?;
    let srid = if type_id & EWKB_SRID_FLAG != 0 {
        read_u32(bytes, 5, little_endian)? as i32
    } else {
        UNKNOWN_SRID
    };
    Ok(Header {
        iso: type_id & !EWKB_FLAGS >= 1000,
        srid,
    })
}

/// Dry run over the input that rejects element counts the data cannot hold
/// and collections nested deeper than [`MAX_NESTING_DEPTH`], before anything
/// is allocated for them.
struct Validator {
    len: usize,
    depth: usize,
}

impl Validator {
    fn check_size(&self, size: usize) -> GeozeroResult<()> {
        if size > self.len {
            return Err(GeozeroError::Geometry(format!(
                "element count {} exceeds remaining WKB data",
                size
            )));
        }
        Ok(())
    }
}

impl GeomProcessor for Validator {
    fn linestring_begin(&mut self, _tagged: bool, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)
    }

    fn polygon_begin(&mut self, _tagged: bool, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)
    }

    fn multipoint_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)
    }

    fn multilinestring_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)
    }

    fn multipolygon_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)
    }

    fn geometrycollection_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.check_size(size)?;
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(GeozeroError::Geometry(format!(
                "geometry collections nested deeper than {}",
                MAX_NESTING_DEPTH
            )));
        }
        Ok(())
    }

    fn geometrycollection_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}

fn decode_with<G: GeozeroGeometry>(reader: G, len: usize) -> Result<Geometry<f64>> {
    reader
        .process_geom(&mut Validator { len, depth: 0 })
        .map_err(codec_error)?;
    reader.to_geo().map_err(codec_error)
}

/// Decodes raw (E)WKB bytes
pub fn decode(bytes: &[u8]) -> Result<DecodedGeometry> {
    let header = read_header(bytes)?;
    let geometry = if header.iso {
        decode_with(Wkb(bytes), bytes.len())?
    } else {
        decode_with(Ewkb(bytes), bytes.len())?
    };
    Ok(DecodedGeometry {
        geometry,
        srid: header.srid,
    })
}

/// Decodes hex-encoded (E)WKB, as PostGIS returns it
pub fn decode_hex(text: impl AsRef<[u8]>) -> Result<DecodedGeometry> {
    let text = std::str::from_utf8(text.as_ref())
        .map_err(|e| Error::Encoding(format!("invalid hex WKB: {}", e)))?;
    let bytes = hex::decode(text.trim())
        .map_err(|e| Error::Encoding(format!("invalid hex WKB: {}", e)))?;
    decode(&bytes)
}

/// Encodes little-endian EWKB; an SRID of 0 produces plain WKB
pub fn encode(geometry: &Geometry<f64>, srid: i32) -> Result<Vec<u8>> {
    let srid = (srid != UNKNOWN_SRID).then_some(srid);
    geometry
        .to_ewkb(CoordDimensions::xy(), srid)
        .map_err(codec_error)
}

/// Upper-case hex EWKB, the textual form PostGIS hands back
pub fn encode_hex(geometry: &Geometry<f64>, srid: i32) -> Result<String> {
    Ok(hex::encode_upper(encode(geometry, srid)?))
}
