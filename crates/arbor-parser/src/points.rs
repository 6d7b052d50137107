//! Decoding of `points` coordinate lists.

use winnow::{Parser as _, combinator::repeat};

use arbor_core::geometry::Point;

use crate::{
    error::{ErrorKind, ParseError, ParseOutcome},
    scan::{number, offset_of, separator},
};

/// Decodes a whitespace/comma separated coordinate list into points.
///
/// A trailing unpaired coordinate is dropped and reported. Decoding stops at
/// the first character that is not part of a number.
///
/// # Examples
///
/// ```
/// # use arbor_parser::parse_points;
/// let outcome = parse_points("0,0 50,25 100,25");
/// assert_eq!(outcome.value().len(), 3);
/// assert!(outcome.is_clean());
/// ```
pub fn parse_points(points: &str) -> ParseOutcome<Vec<Point>> {
    let mut input = points;
    let mut errors = Vec::new();

    let coords: Vec<f32> = match repeat(0.., number).parse_next(&mut input) {
        Ok(coords) => coords,
        Err(_) => Vec::new(),
    };

    let _ = separator(&mut input);
    if let Some(found) = input.chars().next() {
        errors.push(ParseError::new(
            ErrorKind::UnexpectedCharacter(found),
            offset_of(points, input),
        ));
    }

    if coords.len() % 2 == 1 {
        errors.push(ParseError::new(
            ErrorKind::OddCoordinateCount,
            offset_of(points, input),
        ));
    }

    let pairs = coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();

    ParseOutcome::new(pairs, errors)
}
