//! Parsers for the textual geometry attributes consumed by Arbor.
//!
//! The geometry collaborator hands over some attributes verbatim, exactly as
//! they appear on the rendering surface. This crate decodes them:
//!
//! - [`parse_translate`] - the `translate(...)` part of a transform attribute
//! - [`parse_path`] - path data, walked with a pen to the points it visits
//! - [`parse_points`] - a flat coordinate list
//!
//! None of these failures abort an extraction pass. Path and point lists
//! decode as far as they can and report what they skipped in a
//! [`ParseOutcome`].

pub mod error;

mod path;
mod points;
mod scan;
mod transform;

pub use error::{ErrorKind, ParseError, ParseOutcome};
pub use path::parse_path;
pub use points::parse_points;
pub use transform::parse_translate;

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn check_path_decoding_is_total(data: &str) -> Result<(), TestCaseError> {
        let outcome = parse_path(data);
        // Every decoded point comes from a drawing command, and none are NaN.
        let points = outcome.value();
        prop_assert!(points.iter().all(|p| !p.x().is_nan() && !p.y().is_nan()));
        Ok(())
    }

    fn check_points_count(coords: &[i16]) -> Result<(), TestCaseError> {
        let text = coords
            .iter()
            .map(i16::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let outcome = parse_points(&text);

        prop_assert_eq!(outcome.value().len(), coords.len() / 2);
        prop_assert_eq!(outcome.is_clean(), coords.len() % 2 == 0);
        Ok(())
    }

    proptest! {
        #[test]
        fn path_decoding_is_total(data in "[MmLlHhVvCcZz0-9 ,.-]{0,64}") {
            check_path_decoding_is_total(&data)?;
        }

        #[test]
        fn points_count(coords in prop::collection::vec(any::<i16>(), 0..40)) {
            check_points_count(&coords)?;
        }
    }
}
