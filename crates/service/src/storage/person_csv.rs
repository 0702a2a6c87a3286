//! Line codec for the person flat file.
//!
//! Row layout: `lastName, firstName, zip city, colorId[, id]`. Rows are written
//! in the same layout they are read in, so appended rows round-trip. A city
//! without a zip code is written behind the `-` placeholder.

use std::fmt;

use common::types::Person;

use crate::errors::ServiceError;

/// Stands in for an empty zip code when a city follows.
const NO_ZIP: &str = "-";

/// A successfully decoded row. `person.color` is left empty; the store fills
/// it from the color table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub person: Person,
    /// Id from the optional fifth column.
    pub explicit_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    TooFewColumns(usize),
    InvalidColorId(String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::TooFewColumns(n) => write!(f, "expected at least 4 columns, found {n}"),
            RowError::InvalidColorId(tok) => write!(f, "invalid color id format: {tok:?}"),
        }
    }
}

pub fn parse_row(line: &str) -> Result<ParsedRow, RowError> {
    let cols: Vec<&str> = line.split(',').map(str::trim).collect();
    if cols.len() < 4 {
        return Err(RowError::TooFewColumns(cols.len()));
    }

    let mut zip_city = cols[2].split_whitespace();
    let zipcode = match zip_city.next().unwrap_or_default() {
        NO_ZIP => String::new(),
        zip => zip.to_string(),
    };
    let city = zip_city.collect::<Vec<_>>().join(" ");

    // only the token before the first space counts, e.g. "1 (blau)" -> 1
    let token = cols[3].split(' ').next().unwrap_or_default();
    let color_id = token
        .parse::<i32>()
        .map_err(|_| RowError::InvalidColorId(token.to_string()))?;

    let explicit_id = cols.get(4).and_then(|c| c.parse::<i32>().ok()).filter(|id| *id > 0);

    Ok(ParsedRow {
        person: Person {
            id: 0,
            name: cols[1].to_string(),
            lastname: cols[0].to_string(),
            zipcode,
            city,
            color: String::new(),
            color_id,
        },
        explicit_id,
    })
}

/// Encode a stored person as one row, without the trailing newline.
pub fn format_row(p: &Person) -> String {
    let zip_city = match (p.zipcode.is_empty(), p.city.is_empty()) {
        (_, true) => p.zipcode.clone(),
        (true, false) => format!("{NO_ZIP} {}", p.city),
        (false, false) => format!("{} {}", p.zipcode, p.city),
    };
    format!("{}, {}, {}, {}, {}", p.lastname, p.name, zip_city, p.color_id, p.id)
}

/// Trim fields and reject values the row layout cannot represent.
pub fn normalize_for_file(mut p: Person) -> Result<Person, ServiceError> {
    for (field, value) in [
        ("name", &p.name),
        ("lastname", &p.lastname),
        ("zipcode", &p.zipcode),
        ("city", &p.city),
    ] {
        if value.contains([',', '\n', '\r']) {
            return Err(ServiceError::Validation(format!("{field} must not contain commas or line breaks")));
        }
    }
    p.name = p.name.trim().to_string();
    p.lastname = p.lastname.trim().to_string();
    p.zipcode = p.zipcode.trim().to_string();
    p.city = p.city.split_whitespace().collect::<Vec<_>>().join(" ");

    if p.zipcode.contains(char::is_whitespace) {
        return Err(ServiceError::Validation("zipcode must not contain whitespace".into()));
    }
    Ok(p)
}
