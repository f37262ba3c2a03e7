use crate::emitter::Emitter;
use crate::error::ParseError;
use crate::point::Point3;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Largest accepted magnitude for a coordinate or radius.
///
/// Keeps every sum of three coordinate differences far inside `i64`.
pub const COORDINATE_LIMIT: i64 = 1 << 48;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*pos=<\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*>\s*,\s*r=\s*(\d+)\s*$")
            .expect("emitter pattern is valid")
    })
}

/// Parses a single `pos=<X,Y,Z>, r=R` record. `line` is only used for error reporting.
pub fn parse_emitter(text: &str, line: usize) -> Result<Emitter, ParseError> {
    let captures = pattern().captures(text).ok_or_else(|| ParseError::Malformed {
        line,
        content: text.to_string(),
    })?;

    let mut values = [0i64; 4];
    for (i, value) in values.iter_mut().enumerate() {
        let field = &captures[i + 1];
        *value = field
            .parse::<i64>()
            .map_err(|source| ParseError::InvalidNumber { line, source })?;
        if value.unsigned_abs() > COORDINATE_LIMIT as u64 {
            return Err(ParseError::OutOfRange { line, value: *value, limit: COORDINATE_LIMIT });
        }
    }

    let [x, y, z, r] = values;
    Ok(Emitter::new(Point3::new(x, y, z), r))
}

impl FromStr for Emitter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_emitter(s, 1)
    }
}

/// Reads one emitter per line, skipping blank lines.
pub fn load_emitters<R: BufRead>(reader: R) -> Result<Vec<Emitter>, ParseError> {
    let mut emitters = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        emitters.push(parse_emitter(&line, index + 1)?);
    }
    Ok(emitters)
}

pub fn load_emitters_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Emitter>, ParseError> {
    let file = File::open(path)?;
    load_emitters(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let emitter: Emitter = "pos=<10,-12,12>, r=4".parse().unwrap();
        assert_eq!(emitter.center, Point3::new(10, -12, 12));
        assert_eq!(emitter.radius, 4);
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let emitter = parse_emitter("  pos=< 1, 2 ,3>,  r=0 ", 3).unwrap();
        assert_eq!(emitter, Emitter::new(Point3::new(1, 2, 3), 0));
    }

    #[test]
    fn test_parse_rejects_negative_radius() {
        let err = parse_emitter("pos=<0,0,0>, r=-1", 7).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 7, .. }));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = parse_emitter("pos=<99999999999999999999,0,0>, r=1", 2).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 2, .. }));

        let err = parse_emitter("pos=<0,0,0>, r=281474976710657", 5).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { line: 5, value: 281474976710657, .. }));

        let err = parse_emitter("pos=<-9223372036854775808,0,0>, r=1", 6).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { line: 6, value: i64::MIN, .. }));
    }
}
