//! Path data decoding.
//!
//! Path data is a sequence of command letters each followed by numeric
//! arguments. Decoding keeps a pen position that every drawing command moves;
//! each move produces one point. Connectors only need the first and last of
//! those points, but the whole sequence is returned.
//!
//! Upper-case commands take absolute coordinates, lower-case ones are relative
//! to the pen. Repeated argument groups after a command repeat that command,
//! except after a move, where they become line segments.

use log::trace;
use winnow::{
    Parser as _,
    combinator::{preceded, repeat},
    error::ModalResult,
    token::one_of,
};

use arbor_core::geometry::Point;

use crate::{
    error::{ErrorKind, ParseError, ParseOutcome},
    scan::{Input, number, offset_of, separator},
};

const COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Number of arguments one group of `command` consumes.
fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        _ => 0,
    }
}

/// One command letter and the numbers following it.
fn segment(input: &mut Input<'_>) -> ModalResult<(char, Vec<f32>)> {
    (
        preceded(separator, one_of(|c: char| COMMANDS.contains(c))),
        repeat(0.., number),
    )
        .parse_next(input)
}

/// Pen state while walking path commands.
#[derive(Debug, Default)]
struct Pen {
    position: Point,
    subpath_start: Point,
    points: Vec<Point>,
}

impl Pen {
    fn apply(&mut self, command: char, args: &[f32]) -> Result<(), ErrorKind> {
        let relative = command.is_ascii_lowercase();
        let upper = command.to_ascii_uppercase();

        if upper == 'Z' {
            self.position = self.subpath_start;
            return Ok(());
        }

        let arity = arity(command);
        if args.len() < arity {
            return Err(ErrorKind::MissingArguments {
                command,
                expected: arity,
                found: args.len(),
            });
        }

        for (group, chunk) in args.chunks_exact(arity).enumerate() {
            let effective = if upper == 'M' && group > 0 { 'L' } else { upper };
            self.step(effective, relative, chunk);
        }

        match args.len() % arity {
            0 => Ok(()),
            count => Err(ErrorKind::TrailingArguments { command, count }),
        }
    }

    fn step(&mut self, command: char, relative: bool, args: &[f32]) {
        let base = if relative {
            self.position
        } else {
            Point::default()
        };
        let target = |x: f32, y: f32| base.add_point(Point::new(x, y));

        self.position = match command {
            'M' => {
                let p = target(args[0], args[1]);
                self.subpath_start = p;
                p
            }
            'L' | 'T' => target(args[0], args[1]),
            'H' => self.position.with_x(base.x() + args[0]),
            'V' => self.position.with_y(base.y() + args[0]),
            'S' | 'Q' => target(args[2], args[3]),
            'C' => target(args[4], args[5]),
            'A' => target(args[5], args[6]),
            _ => return,
        };
        self.points.push(self.position);
    }
}

/// Decodes path data into the sequence of pen positions it visits.
///
/// Decoding stops at the first character that is neither a command, a number
/// nor a separator; the points gathered up to there are kept. Commands with
/// too few arguments are skipped.
///
/// # Examples
///
/// ```
/// # use arbor_parser::parse_path;
/// let outcome = parse_path("M 10 20 C 40 20, 40 80, 70 80");
/// let points = outcome.value();
/// assert_eq!(points.first().map(|p| (p.x(), p.y())), Some((10.0, 20.0)));
/// assert_eq!(points.last().map(|p| (p.x(), p.y())), Some((70.0, 80.0)));
/// assert!(outcome.is_clean());
/// ```
pub fn parse_path(data: &str) -> ParseOutcome<Vec<Point>> {
    let mut input = data;
    let mut pen = Pen::default();
    let mut errors = Vec::new();

    loop {
        if separator(&mut input).is_err() || input.is_empty() {
            break;
        }

        let offset = offset_of(data, input);
        let next_char = input.chars().next();

        match segment(&mut input) {
            Ok((command, args)) => {
                if let Err(kind) = pen.apply(command, &args) {
                    errors.push(ParseError::new(kind, offset));
                }
            }
            Err(_) => {
                if let Some(found) = next_char {
                    errors.push(ParseError::new(ErrorKind::UnexpectedCharacter(found), offset));
                }
                break;
            }
        }
    }

    trace!(points = pen.points.len(), errors = errors.len(); "Decoded path data");
    ParseOutcome::new(pen.points, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(data: &str) -> Vec<(f32, f32)> {
        parse_path(data)
            .into_value()
            .into_iter()
            .map(|p| (p.x(), p.y()))
            .collect()
    }

    #[test]
    fn test_move_and_line() {
        assert_eq!(points("M0,0 L10,5"), vec![(0.0, 0.0), (10.0, 5.0)]);
    }

    #[test]
    fn test_relative_commands_accumulate() {
        assert_eq!(
            points("m10 10 l5 5 h10 v-3"),
            vec![(10.0, 10.0), (15.0, 15.0), (25.0, 15.0), (25.0, 12.0)]
        );
    }

    #[test]
    fn test_absolute_horizontal_and_vertical() {
        assert_eq!(
            points("M1 2 H30 V40"),
            vec![(1.0, 2.0), (30.0, 2.0), (30.0, 40.0)]
        );
    }

    #[test]
    fn test_cubic_curve_ends_at_last_pair() {
        assert_eq!(
            points("M100,50C150,50 150,120 200,120"),
            vec![(100.0, 50.0), (200.0, 120.0)]
        );
        assert_eq!(points("M0 0 c 1 1 2 2 3 4"), vec![(0.0, 0.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_quadratic_smooth_and_arc() {
        assert_eq!(
            points("M0 0 Q5 5 10 0 T20 0 S25 5 30 0 A5 5 0 0 1 40 0"),
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (20.0, 0.0),
                (30.0, 0.0),
                (40.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_move() {
        assert_eq!(
            points("M0 0 10 10 20 0"),
            vec![(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]
        );
        assert_eq!(points("m5 5 1 1"), vec![(5.0, 5.0), (6.0, 6.0)]);
    }

    #[test]
    fn test_close_path_moves_pen_without_point() {
        assert_eq!(
            points("M10 10 L20 10 Z l0 5"),
            vec![(10.0, 10.0), (20.0, 10.0), (10.0, 15.0)]
        );
    }

    #[test]
    fn test_missing_arguments_are_reported_and_skipped() {
        let outcome = parse_path("M0 0 C1 1 2 2 L5 5");
        assert_eq!(outcome.value().len(), 2);
        assert_eq!(
            outcome.errors()[0].kind(),
            &ErrorKind::MissingArguments {
                command: 'C',
                expected: 6,
                found: 4
            }
        );
        assert_eq!(outcome.errors()[0].offset(), 5);
    }

    #[test]
    fn test_trailing_arguments_are_reported() {
        let outcome = parse_path("M0 0 L1 1 2");
        assert_eq!(outcome.value().len(), 2);
        assert_eq!(
            outcome.errors()[0].kind(),
            &ErrorKind::TrailingArguments {
                command: 'L',
                count: 1
            }
        );
    }

    #[test]
    fn test_unexpected_character_keeps_partial_points() {
        let outcome = parse_path("M0 0 L5 5 X 9 9");
        assert_eq!(outcome.value().len(), 2);
        assert_eq!(
            outcome.errors()[0].kind(),
            &ErrorKind::UnexpectedCharacter('X')
        );
        assert_eq!(outcome.errors()[0].offset(), 10);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_path("").value().is_empty());
        assert!(parse_path("  , ").is_clean());
    }
}
