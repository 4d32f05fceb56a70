//! Units, geometry and trigonometry.

use crate::format::{format_number, round2, round_to};
use crate::model::{Answer, Question};
use crate::random::Draws;

/// Learners are told to use π = 3.14, so answers use the same value.
#[allow(clippy::approx_constant)]
const PI: f64 = 3.14;

fn exact(prompt: String, answer: i64) -> Question {
    Question::simple(prompt, Answer::int(answer))
}

fn rounded(prompt: String, answer: f64) -> Question {
    Question::simple(prompt, Answer::num(round2(answer)))
}

fn sin_deg(angle: i64) -> f64 {
    (angle as f64).to_radians().sin()
}

fn cos_deg(angle: i64) -> f64 {
    (angle as f64).to_radians().cos()
}

//
// ─── UNITS ─────────────────────────────────────────────────────────────────────
//

pub(crate) fn metric_conversions(draws: &mut Draws<'_>) -> Question {
    let (prompt, answer) = match draws.index(8) {
        0 => {
            let grams = draws.int(1, 50) * 10;
            (format!("Change {grams} grams to kilograms."), grams as f64 / 1000.0)
        }
        1 => {
            let kg = draws.int(1, 10);
            (format!("Change {kg} kilograms to grams."), (kg * 1000) as f64)
        }
        2 => {
            let tenths = draws.int(1, 9) * 10 + draws.int(0, 8);
            let km = tenths as f64 / 10.0;
            (
                format!("Change {} kilometres to metres.", format_number(km)),
                (tenths * 100) as f64,
            )
        }
        3 => {
            let metres = draws.int(10, 909);
            (format!("Change {metres} metres to kilometres."), metres as f64 / 1000.0)
        }
        4 => {
            let cm = draws.int(1, 99);
            (format!("Change {cm} cm to mm."), (cm * 10) as f64)
        }
        5 => {
            let mm = draws.int(10, 909);
            (format!("Change {mm} mm to cm."), mm as f64 / 10.0)
        }
        6 => {
            let ml = draws.int(1, 25) * 10;
            (format!("Change {ml} millilitres to litres."), ml as f64 / 1000.0)
        }
        _ => {
            let half_litres = draws.int(1, 5) * 2 + i64::from(draws.coin());
            let litres = half_litres as f64 / 2.0;
            (
                format!("Change {} litres to millilitres.", format_number(litres)),
                (half_litres * 500) as f64,
            )
        }
    };
    Question::simple(prompt, Answer::num(round_to(answer, 3)))
}

pub(crate) fn conversions_units(draws: &mut Draws<'_>) -> Question {
    const UNITS: [(&str, &str, i64); 4] =
        [("cm", "m", 100), ("mm", "cm", 10), ("g", "kg", 1000), ("m", "km", 1000)];
    let (small, large, factor) = draws.pick_copy(&UNITS);
    let value = draws.int(100, 5099);
    if draws.chance(0.5) {
        Question::simple(
            format!("Convert {value}{small} to {large}"),
            Answer::num(round_to(value as f64 / factor as f64, 3)),
        )
    } else {
        exact(format!("Convert {value}{large} to {small}"), value * factor)
    }
}

pub(crate) fn scale_drawings(draws: &mut Draws<'_>) -> Question {
    let scale = draws.pick_copy(&[2, 5, 10, 20, 50, 100]);
    let on_map = draws.int(3, 17);
    exact(
        format!(
            "On a map with scale 1:{scale}, a distance is {on_map}cm. What is the real distance in cm?"
        ),
        on_map * scale,
    )
}

pub(crate) fn distance_time_graphs(draws: &mut Draws<'_>) -> Question {
    let hours = draws.int(2, 5);
    let speed = draws.int(12, 60);
    exact(
        format!(
            "A distance-time graph shows a journey of {}km taking {hours} hours at a steady speed. \
             What is the average speed in km/h?",
            speed * hours
        ),
        speed,
    )
}

pub(crate) fn speed_density(draws: &mut Draws<'_>) -> Question {
    if draws.chance(0.5) {
        let hours = draws.int(2, 6);
        let speed = draws.int(10, 80);
        exact(
            format!(
                "Find the speed in km/h if the distance is {}km and the time is {hours} hours",
                speed * hours
            ),
            speed,
        )
    } else {
        let mass = draws.int(100, 599);
        let volume = draws.int(20, 69);
        rounded(
            format!(
                "Find the density in g/cm^3 if the mass is {mass}g and the volume is {volume}cm^3 \
                 (to 2 decimal places)"
            ),
            mass as f64 / volume as f64,
        )
    }
}

//
// ─── ANGLES ────────────────────────────────────────────────────────────────────
//

pub(crate) fn angles(draws: &mut Draws<'_>) -> Question {
    match draws.index(3) {
        0 => {
            let known = draws.int(30, 149);
            exact(
                format!("Two angles on a straight line are {known}° and x°. Find the value of x."),
                180 - known,
            )
        }
        1 => {
            let known: Vec<i64> = (0..3).map(|_| draws.int(40, 99)).collect();
            let listed = known
                .iter()
                .map(|a| format!("{a}°"))
                .collect::<Vec<_>>()
                .join(", ");
            exact(
                format!("Angles around a point are {listed} and x°. Find the value of x."),
                360 - known.iter().sum::<i64>(),
            )
        }
        _ => {
            let angle = draws.int(1, 180);
            let kind = match angle {
                a if a < 90 => "acute",
                90 => "right",
                a if a < 180 => "obtuse",
                _ => "straight",
            };
            Question::simple(
                format!("What type of angle is {angle}°? (acute, right, obtuse or straight)"),
                Answer::text(kind),
            )
        }
    }
}

pub(crate) fn angles_parallel_lines(draws: &mut Draws<'_>) -> Question {
    let angle = draws.int(40, 139);
    let (kind, answer) = match draws.index(3) {
        0 => ("alternate", angle),
        1 => ("corresponding", angle),
        _ => ("co-interior", 180 - angle),
    };
    exact(
        format!(
            "Two parallel lines are cut by a transversal. One of a pair of {kind} angles is {angle}°. \
             Find the other."
        ),
        answer,
    )
}

pub(crate) fn angles_polygons(draws: &mut Draws<'_>) -> Question {
    let sides = draws.int(5, 9);
    if draws.coin() {
        exact(
            format!("Find the sum of the interior angles of a {sides}-sided polygon."),
            (sides - 2) * 180,
        )
    } else {
        let regular = draws.pick_copy(&[5, 6, 8, 9, 10, 12]);
        exact(
            format!("Find the size of one exterior angle of a regular {regular}-sided polygon."),
            360 / regular,
        )
    }
}

pub(crate) fn bearings(draws: &mut Draws<'_>) -> Question {
    let bearing = draws.int(45, 314);
    exact(
        format!("The bearing of B from A is {bearing:03}°. Find the bearing of A from B."),
        (bearing + 180) % 360,
    )
}

pub(crate) fn circle_theorems(draws: &mut Draws<'_>) -> Question {
    let angle = draws.int(40, 89);
    match draws.index(3) {
        0 => exact(
            format!(
                "AB is a diameter and C is a point on the circle. Angle CAB is {angle}°. Find angle ABC."
            ),
            90 - angle,
        ),
        1 => exact(
            format!(
                "An angle at the circumference is {angle}°. Find the angle at the centre \
                 subtended by the same arc."
            ),
            angle * 2,
        ),
        _ => exact(
            format!(
                "ABCD is a cyclic quadrilateral. Angle ABC is {}°. Find angle ADC.",
                angle + 30
            ),
            150 - angle,
        ),
    }
}

//
// ─── AREA AND VOLUME ───────────────────────────────────────────────────────────
//

pub(crate) fn area_perimeter(draws: &mut Draws<'_>) -> Question {
    let area = draws.chance(0.5);
    let length = draws.int(3, 12);
    let width = draws.int(2, 9);
    if area {
        exact(
            format!("Find the area of a rectangle with length {length}cm and width {width}cm."),
            length * width,
        )
    } else {
        exact(
            format!("Find the perimeter of a rectangle with length {length}cm and width {width}cm."),
            2 * (length + width),
        )
    }
}

pub(crate) fn area_compound_shapes(draws: &mut Draws<'_>) -> Question {
    let (l1, w1) = (draws.int(4, 11), draws.int(3, 7));
    let (l2, w2) = (draws.int(3, 8), draws.int(2, 5));
    exact(
        format!(
            "An L-shape is made of two rectangles measuring {l1}cm by {w1}cm and {l2}cm by {w2}cm. \
             Find its total area in cm^2."
        ),
        l1 * w1 + l2 * w2,
    )
}

pub(crate) fn circles(draws: &mut Draws<'_>) -> Question {
    let r = draws.int(3, 12) as f64;
    if draws.chance(0.5) {
        rounded(
            format!("Find the area of a circle with radius {r}cm (use π = 3.14)"),
            PI * r * r,
        )
    } else {
        rounded(
            format!("Find the circumference of a circle with radius {r}cm (use π = 3.14)"),
            2.0 * PI * r,
        )
    }
}

pub(crate) fn surface_area(draws: &mut Draws<'_>) -> Question {
    let (l, w, h) = (draws.int(4, 11), draws.int(3, 8), draws.int(2, 6));
    exact(
        format!("Find the surface area of a cuboid measuring {l}cm * {w}cm * {h}cm."),
        2 * (l * w + l * h + w * h),
    )
}

pub(crate) fn volume_prism(draws: &mut Draws<'_>) -> Question {
    let base = draws.int(5, 14);
    let height = draws.int(2, 5) * 2;
    let length = draws.int(6, 17);
    exact(
        format!(
            "A triangular prism has a triangle of base {base}cm and height {height}cm, \
             and a length of {length}cm. Find its volume in cm^3."
        ),
        base * height / 2 * length,
    )
}

pub(crate) fn cylinders(draws: &mut Draws<'_>) -> Question {
    let r = draws.int(3, 10) as f64;
    let h = draws.int(5, 16) as f64;
    if draws.chance(0.5) {
        rounded(
            format!("Find the volume of a cylinder with radius {r}cm and height {h}cm (use π = 3.14)"),
            PI * r * r * h,
        )
    } else {
        rounded(
            format!(
                "Find the total surface area of a cylinder with radius {r}cm and height {h}cm \
                 (use π = 3.14)"
            ),
            2.0 * PI * r * h + 2.0 * PI * r * r,
        )
    }
}

pub(crate) fn spheres_cones(draws: &mut Draws<'_>) -> Question {
    if draws.chance(0.5) {
        let r = draws.int(3, 8) as f64;
        rounded(
            format!(
                "Find the volume of a sphere with radius {r}cm (use π = 3.14, to 2 decimal places)"
            ),
            4.0 / 3.0 * PI * r * r * r,
        )
    } else {
        let r = draws.int(3, 7) as f64;
        let h = draws.int(5, 14) as f64;
        rounded(
            format!(
                "Find the volume of a cone with radius {r}cm and height {h}cm \
                 (use π = 3.14, to 2 decimal places)"
            ),
            PI * r * r * h / 3.0,
        )
    }
}

pub(crate) fn sectors_arcs(draws: &mut Draws<'_>) -> Question {
    let r = draws.int(4, 11) as f64;
    let angle = draws.pick_copy(&[60, 90, 120, 180, 270]);
    let fraction = angle as f64 / 360.0;
    if draws.chance(0.5) {
        rounded(
            format!(
                "Find the area of a sector with radius {r}cm and angle {angle}° \
                 (use π = 3.14, to 2 decimal places)"
            ),
            fraction * PI * r * r,
        )
    } else {
        rounded(
            format!(
                "Find the arc length of a sector with radius {r}cm and angle {angle}° \
                 (use π = 3.14, to 2 decimal places)"
            ),
            fraction * 2.0 * PI * r,
        )
    }
}

pub(crate) fn plans_elevations(draws: &mut Draws<'_>) -> Question {
    let stacks: Vec<i64> = (0..draws.int(3, 5) as usize).map(|_| draws.int(1, 4)).collect();
    let heights = stacks
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if draws.coin() {
        exact(
            format!(
                "A single row of cube stacks has heights {heights}. \
                 How many squares does the front elevation show?"
            ),
            stacks.iter().sum(),
        )
    } else {
        exact(
            format!(
                "A single row of cube stacks has heights {heights}. \
                 How many squares does the plan view show?"
            ),
            stacks.len() as i64,
        )
    }
}

pub(crate) fn loci_construction(draws: &mut Draws<'_>) -> Question {
    let distance = draws.int(4, 11);
    let (prompt, answer) = match draws.index(3) {
        0 => (
            format!("What shape is the locus of points exactly {distance}cm from a fixed point?"),
            "circle",
        ),
        1 => (
            "What is the locus of points equidistant from two fixed points A and B called?".into(),
            "perpendicular bisector",
        ),
        _ => (
            "What is the locus of points equidistant from two lines that meet at a point called?"
                .into(),
            "angle bisector",
        ),
    };
    Question::simple(prompt, Answer::text(answer))
}

//
// ─── SIMILARITY AND CONGRUENCE ─────────────────────────────────────────────────
//

pub(crate) fn similar_shapes_lengths(draws: &mut Draws<'_>) -> Question {
    let scale = draws.int(2, 5);
    let length = draws.int(4, 11);
    exact(
        format!(
            "Shape B is an enlargement of shape A with scale factor {scale}. \
             A side of shape A is {length}cm. How long is the corresponding side of shape B?"
        ),
        length * scale,
    )
}

pub(crate) fn similar_shapes_area_volume(draws: &mut Draws<'_>) -> Question {
    let scale = draws.int(2, 4);
    let area = draws.chance(0.5);
    let original = draws.int(20, 69);
    if area {
        exact(
            format!(
                "Shape B is an enlargement of shape A with scale factor {scale}. \
                 Shape A has area {original}cm^2. Find the area of shape B."
            ),
            original * scale * scale,
        )
    } else {
        exact(
            format!(
                "Solid B is an enlargement of solid A with scale factor {scale}. \
                 Solid A has volume {original}cm^3. Find the volume of solid B."
            ),
            original * scale * scale * scale,
        )
    }
}

pub(crate) fn congruent_triangles(draws: &mut Draws<'_>) -> Question {
    const CONDITIONS: [(&str, &str); 4] = [
        ("all three pairs of sides are equal", "SSS"),
        ("two pairs of sides and the angle between them are equal", "SAS"),
        ("two pairs of angles and the side between them are equal", "ASA"),
        (
            "both have a right angle, equal hypotenuses and one other equal pair of sides",
            "RHS",
        ),
    ];
    let (description, condition) = draws.pick_copy(&CONDITIONS);
    Question::simple(
        format!(
            "Two triangles are congruent because {description}. \
             Which condition is this? (SSS, SAS, ASA or RHS)"
        ),
        Answer::text(condition),
    )
}

//
// ─── PYTHAGORAS AND TRIGONOMETRY ───────────────────────────────────────────────
//

pub(crate) fn pythagoras(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(3, 10);
    let b = draws.int(4, 11);
    rounded(
        format!(
            "A right-angled triangle has shorter sides {a}cm and {b}cm. \
             Find the hypotenuse (to 2 decimal places)."
        ),
        ((a * a + b * b) as f64).sqrt(),
    )
}

pub(crate) fn three_d_pythagoras_trig(draws: &mut Draws<'_>) -> Question {
    let (l, w, h) = (draws.int(4, 11), draws.int(3, 8), draws.int(2, 6));
    rounded(
        format!(
            "Find the length of the space diagonal of a cuboid measuring {l}cm * {w}cm * {h}cm \
             (to 2 decimal places)."
        ),
        ((l * l + w * w + h * h) as f64).sqrt(),
    )
}

pub(crate) fn sohcahtoa(draws: &mut Draws<'_>) -> Question {
    let angle = draws.pick_copy(&[30, 40, 50, 60]);
    let side = draws.int(5, 16);
    let theta = (angle as f64).to_radians();
    let (given, wanted, value) = match draws.index(3) {
        0 => ("hypotenuse", "opposite", side as f64 * theta.sin()),
        1 => ("hypotenuse", "adjacent", side as f64 * theta.cos()),
        _ => ("adjacent", "opposite", side as f64 * theta.tan()),
    };
    rounded(
        format!(
            "In a right-angled triangle, one angle is {angle}° and the {given} is {side}cm. \
             Find the {wanted} side (to 2 decimal places)."
        ),
        value,
    )
}

pub(crate) fn exact_trig_values(draws: &mut Draws<'_>) -> Question {
    const VALUES: [(i64, [&str; 3]); 5] = [
        (0, ["0", "1", "0"]),
        (30, ["1/2", "√3/2", "1/√3"]),
        (45, ["1/√2", "1/√2", "1"]),
        (60, ["√3/2", "1/2", "√3"]),
        (90, ["1", "0", "undefined"]),
    ];
    const FUNCTIONS: [&str; 3] = ["sin", "cos", "tan"];
    let (angle, values) = draws.pick_copy(&VALUES);
    let f = draws.index(FUNCTIONS.len());
    Question::simple(
        format!("Find the exact value of {}({angle}°)", FUNCTIONS[f]),
        Answer::text(values[f]),
    )
}

pub(crate) fn area_any_triangle(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(5, 14);
    let b = draws.int(4, 11);
    let angle = draws.pick_copy(&[30, 45, 60, 110]);
    rounded(
        format!(
            "Find the area of a triangle with sides {a}cm and {b}cm and an included angle of \
             {angle}° (to 2 decimal places)."
        ),
        0.5 * (a * b) as f64 * sin_deg(angle),
    )
}

pub(crate) fn sine_rule(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(8, 19);
    let angle_a = draws.pick_copy(&[30, 45, 60]);
    let angle_b = draws.pick_copy(&[35, 50, 70]);
    rounded(
        format!(
            "In triangle ABC, a = {a}cm, angle A = {angle_a}° and angle B = {angle_b}°. \
             Use the sine rule to find side b (to 2 decimal places)."
        ),
        a as f64 * sin_deg(angle_b) / sin_deg(angle_a),
    )
}

pub(crate) fn cosine_rule(draws: &mut Draws<'_>) -> Question {
    let a = draws.int(6, 15);
    let b = draws.int(5, 12);
    let angle_c = draws.pick_copy(&[60, 90, 120]);
    let c2 = (a * a + b * b) as f64 - 2.0 * (a * b) as f64 * cos_deg(angle_c);
    rounded(
        format!(
            "In triangle ABC, a = {a}cm, b = {b}cm and angle C = {angle_c}°. \
             Use the cosine rule to find side c (to 2 decimal places)."
        ),
        c2.sqrt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    fn answer_of(q: &Question) -> f64 {
        q.scalar_answer().and_then(Answer::as_number).unwrap()
    }

    #[test]
    fn circle_area_uses_three_point_one_four() {
        // radius 3, area branch
        let mut source = ScriptedSource::new([0.0, 0.1]);
        let mut draws = Draws::new(&mut source, 4);
        let q = circles(&mut draws);
        assert_eq!(answer_of(&q), 28.26);
    }

    #[test]
    fn plan_view_counts_stacks() {
        // three stacks of height 1, 2, 4, plan view
        let mut source = ScriptedSource::new([0.0, 0.0, 0.3, 0.9, 0.1]);
        let mut draws = Draws::new(&mut source, 4);
        let q = plans_elevations(&mut draws);
        assert_eq!(answer_of(&q), 3.0);
        assert!(q.prompt().unwrap().contains("heights 1, 2, 4"));
    }

    #[test]
    fn sohcahtoa_opposite_from_hypotenuse() {
        let mut source = ScriptedSource::new([0.0, 0.5, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = sohcahtoa(&mut draws);
        // 30°, hypotenuse 11
        assert_eq!(answer_of(&q), 5.5);
    }

    #[test]
    fn cosine_rule_with_right_angle_is_pythagoras() {
        let mut source = ScriptedSource::new([0.0, 0.0, 0.5]);
        let mut draws = Draws::new(&mut source, 4);
        let q = cosine_rule(&mut draws);
        assert_eq!(answer_of(&q), round2(61f64.sqrt()));
    }

    #[test]
    fn bearings_wrap_round() {
        let mut source = ChaChaSource::seeded(3);
        let mut draws = Draws::new(&mut source, 4);
        for _ in 0..50 {
            let back = answer_of(&bearings(&mut draws));
            assert!((0.0..360.0).contains(&back));
        }
    }

    #[test]
    fn metric_answers_have_no_float_noise() {
        let mut source = ChaChaSource::seeded(8);
        let mut draws = Draws::new(&mut source, 4);
        for _ in 0..200 {
            let value = answer_of(&metric_conversions(&mut draws));
            assert_eq!(value, round_to(value, 3));
        }
    }
}
