//! Coordinate geometry: plotting, midpoints, gradients, lines, vectors and transformations.
//!
//! Answers that are a pair of coordinates are asked as a single part expecting a point,
//! so `3,4` and `(3, 4)` are both accepted.

use crate::format::{format_number, linear, round2};
use crate::model::{Answer, CoordinateQuestion, Expected, LabeledPoint, Part, Question};
use crate::random::Draws;

fn point(label: &str, x: i64, y: i64) -> LabeledPoint {
    LabeledPoint {
        label: label.into(),
        x: x as i32,
        y: y as i32,
    }
}

fn at(x: f64, y: f64) -> Expected {
    Expected::Point { x, y }
}

fn pair_question(prompt: String, x: f64, y: f64) -> Question {
    Question::multi_part(
        Some(prompt),
        vec![Part::new("Give your answer as x,y", at(x, y))],
    )
}

fn pair(x: i64, y: i64) -> String {
    format!("({x}, {y})")
}

/// A grid with labelled points; one layout plots a new point, the other reads existing ones.
pub(crate) fn coordinates(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let (ax, ay) = (draws.int(-2, 3), draws.int(-2, 3));
        let (bx, by) = (draws.int(-3, 2), draws.int(-4, 1));
        let (cx, cy) = (draws.int(1, 6), draws.int(-3, 2));
        Question::Coordinate(CoordinateQuestion {
            points: vec![point("B", bx, by), point("C", cx, cy)],
            parts: vec![
                Part::new(
                    format!("Plot the point with coordinates {}. Label this point A.", pair(ax, ay)),
                    at(ax as f64, ay as f64),
                ),
                Part::new(
                    "Write down the coordinates of the midpoint of BC.",
                    at((bx + cx) as f64 / 2.0, (by + cy) as f64 / 2.0),
                ),
            ],
        })
    } else {
        let (ax, ay) = (draws.int(-2, 3), draws.int(1, 6));
        let (bx, by) = (draws.int(-3, 2), draws.int(-2, 3));
        Question::Coordinate(CoordinateQuestion {
            points: vec![point("A", ax, ay), point("B", bx, by)],
            parts: vec![
                Part::new(
                    "Write down the coordinates of point A.",
                    at(ax as f64, ay as f64),
                ),
                Part::new(
                    "Write down the coordinates of the midpoint of AB.",
                    at((ax + bx) as f64 / 2.0, (ay + by) as f64 / 2.0),
                ),
                Part::new(
                    "Write down the x-coordinate of point B.",
                    Expected::int(bx),
                ),
            ],
        })
    }
}

fn nonzero(draws: &mut Draws<'_>, magnitude: i64) -> i64 {
    draws.sign() * draws.int(1, magnitude)
}

pub(crate) fn transformations(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let (x, y) = (nonzero(draws, 4), nonzero(draws, 4));
            let across = if x > 0 { "right" } else { "left" };
            let vertical = if y > 0 { "up" } else { "down" };
            Question::simple(
                format!(
                    "Describe the translation by the vector ({x}, {y}) in words, \
                     for example \"2 left, 3 up\"."
                ),
                Answer::text(format!("{} {across}, {} {vertical}", x.abs(), y.abs())),
            )
        }
        1 => {
            let (x, y) = (draws.int(1, 6), draws.int(1, 6));
            let (turn, rx, ry) = match draws.index(3) {
                0 => ("90° clockwise", y, -x),
                1 => ("180°", -x, -y),
                _ => ("90° anticlockwise", -y, x),
            };
            pair_question(
                format!(
                    "The point {} is rotated {turn} about the origin. Where does it end up?",
                    pair(x, y)
                ),
                rx as f64,
                ry as f64,
            )
        }
        _ => {
            let (x, y) = (draws.int(-5, 5), draws.int(-5, 5));
            let (axis, rx, ry) = match draws.index(3) {
                0 => ("the x-axis", x, -y),
                1 => ("the y-axis", -x, y),
                _ => ("the line y = x", y, x),
            };
            pair_question(
                format!(
                    "The point {} is reflected in {axis}. Where does it end up?",
                    pair(x, y)
                ),
                rx as f64,
                ry as f64,
            )
        }
    }
}

pub(crate) fn midpoint_line_segment(draws: &mut Draws<'_>) -> Question {
    let (x1, y1) = (draws.int(1, 10), draws.int(1, 10));
    let (x2, y2) = (draws.int(5, 14), draws.int(5, 14));
    pair_question(
        format!(
            "Find the midpoint of the line segment from {} to {}",
            pair(x1, y1),
            pair(x2, y2)
        ),
        (x1 + x2) as f64 / 2.0,
        (y1 + y2) as f64 / 2.0,
    )
}

pub(crate) fn gradient_line(draws: &mut Draws<'_>) -> Question {
    let (x1, y1) = (draws.int(1, 8), draws.int(1, 8));
    let x2 = x1 + draws.int(2, 7);
    let y2 = y1 + draws.int(2, 9);
    Question::simple(
        format!(
            "Find the gradient of the line through {} and {}. Give your answer to 2 decimal \
             places if it is not whole.",
            pair(x1, y1),
            pair(x2, y2)
        ),
        Answer::num(round2((y2 - y1) as f64 / (x2 - x1) as f64)),
    )
}

pub(crate) fn equation_line(draws: &mut Draws<'_>) -> Question {
    let m = draws.int(1, 5);
    let c = draws.int(-4, 3);
    Question::simple(
        format!("Write the equation of the line with gradient {m} and y-intercept {c}"),
        Answer::text(format!("y = {}", linear(m, c, "x"))),
    )
}

pub(crate) fn vectors(draws: &mut Draws<'_>) -> Question {
    let (x1, y1) = (draws.int(1, 8), draws.int(1, 6));
    let (x2, y2) = (draws.int(1, 6), draws.int(1, 8));
    let (prompt, x, y) = match draws.index(3) {
        0 => (
            format!("Add the vectors {} and {}", pair(x1, y1), pair(x2, y2)),
            x1 + x2,
            y1 + y2,
        ),
        1 => (
            format!("Subtract {} from {}", pair(x2, y2), pair(x1, y1)),
            x1 - x2,
            y1 - y2,
        ),
        _ => {
            let scalar = draws.int(2, 5);
            (
                format!("Multiply the vector {} by {scalar}", pair(x1, y1)),
                x1 * scalar,
                y1 * scalar,
            )
        }
    };
    pair_question(prompt, x as f64, y as f64)
}

pub(crate) fn parallel_perpendicular_lines(draws: &mut Draws<'_>) -> Question {
    let m = draws.int(1, 5);
    if draws.coin() {
        Question::simple(
            format!("A line has gradient {m}. What is the gradient of a parallel line?"),
            Answer::int(m),
        )
    } else {
        Question::simple(
            format!(
                "A line has gradient {m}. What is the gradient of a perpendicular line? \
                 Give your answer to 2 decimal places if it is not whole."
            ),
            Answer::num(round2(-1.0 / m as f64)),
        )
    }
}

pub(crate) fn enlarging_negative_scale(draws: &mut Draws<'_>) -> Question {
    let scale = -draws.int(2, 4);
    let (x, y) = (draws.int(2, 7), draws.int(2, 6));
    pair_question(
        format!(
            "The point {} is enlarged by scale factor {} about the origin. Find its new \
             coordinates.",
            pair(x, y),
            format_number(scale as f64)
        ),
        (x * scale) as f64,
        (y * scale) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    #[test]
    fn plotted_point_is_not_already_on_the_grid() {
        // first layout: A is plotted by the learner
        let mut source = ScriptedSource::new([0.9]);
        let mut draws = Draws::new(&mut source, 4);
        let Question::Coordinate(q) = coordinates(&mut draws) else {
            panic!("expected a coordinate question");
        };
        assert!(q.points.iter().all(|p| p.label != "A"));
        assert_eq!(q.parts.len(), 2);
    }

    #[test]
    fn midpoint_of_read_points() {
        let mut source = ChaChaSource::seeded(6);
        let mut draws = Draws::new(&mut source, 4);
        for _ in 0..50 {
            let Question::Coordinate(q) = coordinates(&mut draws) else {
                unreachable!()
            };
            if q.parts.len() != 3 {
                continue;
            }
            let (a, b) = (&q.points[0], &q.points[1]);
            assert_eq!(
                q.parts[1].answer,
                Some(at(
                    f64::from(a.x + b.x) / 2.0,
                    f64::from(a.y + b.y) / 2.0
                ))
            );
        }
    }

    #[test]
    fn translation_wording_uses_directions() {
        // translation, x = -3, y = +2
        let mut source = ScriptedSource::new([0.0, 0.9, 0.5, 0.0, 0.25]);
        let mut draws = Draws::new(&mut source, 4);
        let q = transformations(&mut draws);
        assert_eq!(q.scalar_answer(), Some(&Answer::text("3 left, 2 up")));
    }

    #[test]
    fn enlargement_flips_both_coordinates() {
        // scale -2, point (2, 2)
        let mut source = ScriptedSource::new([0.0, 0.0, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = enlarging_negative_scale(&mut draws);
        assert_eq!(q.parts()[0].answer, Some(at(-4.0, -4.0)));
    }
}
