//! City-list ingestion.
//!
//! One city per line, `"<x>, <y>"` — an integer pair separated by a comma.
//! A malformed line is a hard error carrying its line number; the caller
//! never receives a partially built city list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::city::City;
use crate::error::{Error, Result};

/// Loads a city list from a file.
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<Vec<City>> {
    let file = File::open(path)?;
    parse_cities(BufReader::new(file))
}

/// Parses a city list from any buffered reader. Blank lines are skipped.
pub fn parse_cities<R: BufRead>(reader: R) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let city = parse_line(trimmed).map_err(|message| Error::MalformedCityList {
            line: index + 1,
            message,
        })?;
        cities.push(city);
    }
    Ok(cities)
}

fn parse_line(line: &str) -> std::result::Result<City, String> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| String::from("expected \"<x>, <y>\""))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad x coordinate: {e}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad y coordinate: {e}"))?;
    Ok(City::new(x, y))
}
