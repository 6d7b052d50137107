//! Decoding of `translate(...)` transforms.

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{opt, preceded},
    error::ModalResult,
};

use arbor_core::geometry::Point;

use crate::{
    error::{ErrorKind, ParseError},
    scan::{Input, number, separator},
};

/// `translate ( tx [,] [ty] )`; a missing `ty` is zero.
fn translate(input: &mut Input<'_>) -> ModalResult<Point> {
    (
        preceded(("translate", multispace0, '('), number),
        opt(number),
        preceded(separator, ')'),
    )
        .map(|(x, y, _)| Point::new(x, y.unwrap_or(0.0)))
        .parse_next(input)
}

/// Extracts the translation from a transform attribute.
///
/// The first `translate(...)` in the attribute wins; other transform
/// functions such as `scale(...)` around it are ignored.
///
/// # Errors
///
/// Returns [`ErrorKind::MissingTranslate`] if the attribute contains no
/// `translate`, or [`ErrorKind::MalformedTranslate`] if its arguments cannot
/// be decoded.
///
/// # Examples
///
/// ```
/// # use arbor_parser::parse_translate;
/// let point = parse_translate("translate(120, 40.5)").unwrap();
/// assert_eq!(point.x(), 120.0);
/// assert_eq!(point.y(), 40.5);
/// ```
pub fn parse_translate(transform: &str) -> Result<Point, ParseError> {
    let start = transform
        .find("translate")
        .ok_or_else(|| ParseError::new(ErrorKind::MissingTranslate, 0))?;

    let mut input = &transform[start..];
    translate
        .parse_next(&mut input)
        .map_err(|_| ParseError::new(ErrorKind::MalformedTranslate, start))
}
