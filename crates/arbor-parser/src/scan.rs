//! Shared low-level scanners for numbers and separators.

use winnow::{
    Parser as _, ascii::float, combinator::preceded, error::ModalResult, token::take_while,
};

pub(crate) type Input<'a> = &'a str;

/// Skip whitespace and commas.
pub(crate) fn separator(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

/// Parse one finite number, skipping any leading separators.
///
/// Numbers may directly follow each other when the sign disambiguates them,
/// so `10-5` scans as `10` then `-5`.
pub(crate) fn number(input: &mut Input<'_>) -> ModalResult<f32> {
    preceded(separator, float)
        .verify(|value: &f32| value.is_finite())
        .parse_next(input)
}

/// Byte offset of `rest` within `source`, where `rest` is a suffix of `source`.
pub(crate) fn offset_of(source: &str, rest: &str) -> usize {
    source.len() - rest.len()
}

#[cfg(test)]
mod tests {
    use winnow::combinator::repeat;

    use super::*;

    #[test]
    fn test_number_skips_separators() {
        let mut input = " ,  12.5 rest";
        assert_eq!(number(&mut input).unwrap(), 12.5);
        assert_eq!(input, " rest");
    }

    #[test]
    fn test_numbers_split_on_sign() {
        let mut input = "10-5.5e1";
        let values: Vec<f32> = repeat(0.., number).parse_next(&mut input).unwrap();
        assert_eq!(values, vec![10.0, -55.0]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_number_rejects_letters() {
        let mut input = "L 5";
        assert!(number(&mut input).is_err());
    }
}
