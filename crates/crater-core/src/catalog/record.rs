use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Column order of the catalog file.
pub const CATALOG_HEADERS: [&str; 8] = [
    "Image_Path",
    "Latitude",
    "Longitude",
    "Threshold",
    "Token",
    "Center_X",
    "Center_Y",
    "Radius",
];

/// Identifier shared by every record of one detection pass.
///
/// Kept as the exact string read from disk. Catalogs written by other tools
/// may hold `"8.0"` or UUIDs; those round-trip untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Numeric value, if the token parses as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog row.
///
/// All columns except the token are optional so that rows in the older
/// five-column layout (no spatial detail) and the per-feature layout
/// (no image path or coordinates) load without loss.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CraterRecord {
    #[serde(rename = "Image_Path", default)]
    pub image_id: String,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "Threshold", default)]
    pub threshold: Option<f64>,
    #[serde(rename = "Token", default)]
    pub token: Token,
    #[serde(rename = "Center_X", default, deserialize_with = "integral")]
    pub center_x: Option<i64>,
    #[serde(rename = "Center_Y", default, deserialize_with = "integral")]
    pub center_y: Option<i64>,
    #[serde(rename = "Radius", default, deserialize_with = "integral")]
    pub radius: Option<u32>,
}

/// Integer column that also accepts integral floats such as `"50.0"`, which
/// pandas writes once a column has held missing values.
fn integral<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let value = match text.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f: f64 = text
                .parse()
                .map_err(|_| D::Error::custom(format!("expected an integer, got {text:?}")))?;
            if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                return Err(D::Error::custom(format!("expected an integer, got {text:?}")));
            }
            f as i64
        }
    };
    T::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("{text} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_numeric_forms() {
        assert_eq!(Token("7".into()).as_number(), Some(7.0));
        assert_eq!(Token(" 8.0 ".into()).as_number(), Some(8.0));
        assert_eq!(Token("x".into()).as_number(), None);
        assert_eq!(Token("NaN".into()).as_number(), None);
        assert_eq!(Token("inf".into()).as_number(), None);
        assert_eq!(Token::from_number(12).to_string(), "12");
    }

    fn read_row(csv_text: &str) -> Result<CraterRecord, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());
        reader.deserialize().next().unwrap()
    }

    #[test]
    fn test_spatial_columns_accept_integral_floats() {
        let header = "Image_Path,Latitude,Longitude,Threshold,Token,Center_X,Center_Y,Radius\n";
        let record = read_row(&format!("{header}a.png,,,,1,50.0,-3,20.0\n")).unwrap();
        assert_eq!(record.center_x, Some(50));
        assert_eq!(record.center_y, Some(-3));
        assert_eq!(record.radius, Some(20));

        assert!(read_row(&format!("{header}a.png,,,,1,50.5,,\n")).is_err());
        assert!(read_row(&format!("{header}a.png,,,,1,,,-4\n")).is_err());
        assert!(read_row(&format!("{header}a.png,,,,1,abc,,\n")).is_err());
    }
}
