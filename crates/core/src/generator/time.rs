use crate::format::clock_time;
use crate::model::{Answer, Expected, GridTable, Part, Question, Table, TabularQuestion};
use crate::random::Draws;

use super::{DESTINATIONS, NAMES};

struct Route {
    from: &'static str,
    to: &'static str,
    /// Departure and arrival, in minutes past midnight.
    services: [(i64, i64); 3],
}

const fn hm(hours: i64, minutes: i64) -> i64 {
    hours * 60 + minutes
}

static ROUTES: [Route; 6] = [
    Route {
        from: "London",
        to: "Paris",
        services: [(hm(6, 18), hm(8, 35)), (hm(7, 24), hm(9, 45)), (hm(10, 30), hm(12, 50))],
    },
    Route {
        from: "Manchester",
        to: "London",
        services: [(hm(8, 15), hm(11, 20)), (hm(9, 40), hm(12, 45)), (hm(14, 10), hm(17, 15))],
    },
    Route {
        from: "Edinburgh",
        to: "Birmingham",
        services: [(hm(7, 0), hm(13, 45)), (hm(9, 30), hm(16, 15)), (hm(12, 0), hm(18, 50))],
    },
    Route {
        from: "London",
        to: "Sheffield",
        services: [(hm(9, 15), hm(11, 30)), (hm(11, 45), hm(14, 0)), (hm(15, 20), hm(17, 35))],
    },
    Route {
        from: "Cardiff",
        to: "Bristol",
        services: [(hm(7, 5), hm(8, 25)), (hm(9, 10), hm(10, 30)), (hm(12, 40), hm(14, 0))],
    },
    Route {
        from: "Leeds",
        to: "York",
        services: [(hm(6, 50), hm(7, 20)), (hm(8, 5), hm(8, 35)), (hm(10, 25), hm(10, 55))],
    },
];

const STOPS: [&str; 5] = ["the shop", "the bakery", "a newsagent", "the market", "a kiosk"];

/// Six kinds of time question, from unit changes to reading a timetable.
pub(crate) fn time(draws: &mut Draws<'_>) -> Question {
    match draws.index(6) {
        0 => unit_conversion(draws),
        1 => duration_difference(draws),
        2 => simple_journey(draws),
        3 => complex_journey(draws),
        4 => film(draws),
        _ => timetable(draws),
    }
}

fn unit_conversion(draws: &mut Draws<'_>) -> Question {
    if draws.coin() {
        let hours = draws.int(1, 6);
        Question::simple(
            format!("Change {} minutes to hours.", hours * 60),
            Answer::int(hours),
        )
    } else {
        let hours = draws.int(1, 10);
        Question::simple(
            format!("Change {hours} hours to minutes."),
            Answer::int(hours * 60),
        )
    }
}

fn duration_difference(draws: &mut Draws<'_>) -> Question {
    let short = draws.int(25, 54);
    let hours = draws.int(1, 3);
    let minutes = draws.int(1, 3) * 15;
    let plural = if hours > 1 { "s" } else { "" };
    Question::simple(
        format!(
            "Work out the difference, in minutes, between {short} minutes and \
             {hours} hour{plural} {minutes} minutes."
        ),
        Answer::int((hours * 60 + minutes - short).abs()),
    )
}

fn simple_journey(draws: &mut Draws<'_>) -> Question {
    let start = hm(draws.int(8, 15), draws.pick_copy(&[0, 10, 15, 20, 30, 40, 45, 50]));
    let first_leg = draws.int(8, 52);
    let wait = draws.int(5, 29);
    let second_leg = draws.int(8, 52);
    let name = draws.pick_copy(NAMES);
    let destination = draws.pick_copy(DESTINATIONS);

    let prompt = format!(
        "{name} left home at {}.\n{name} walked for {first_leg} minutes.\n\
         {name} waited for {wait} minutes.\n\
         {name} then walked for another {second_leg} minutes to {destination}.",
        clock_time(start)
    );
    let arrival = start + first_leg + wait + second_leg;
    Question::multi_part(
        Some(prompt),
        vec![
            Part::new(
                format!("How many minutes did {name} walk in total?"),
                Expected::int(first_leg + second_leg),
            ),
            Part::new(
                format!("What time did {name} arrive? (H:MM)"),
                Expected::text(clock_time(arrival)),
            ),
        ],
    )
}

fn complex_journey(draws: &mut Draws<'_>) -> Question {
    let start = hm(draws.int(9, 11), draws.pick_copy(&[0, 10, 20, 30, 40, 50]));
    let first_leg = draws.int(12, 46);
    let stay = draws.int(8, 27);
    let second_leg = draws.int(15, 49);
    let name = draws.pick_copy(NAMES);
    let destination = draws.pick_copy(DESTINATIONS);
    let stop = draws.pick_copy(&STOPS);

    Question::simple(
        format!(
            "{name} left home at {}.\n{name} walked to {stop}, taking {first_leg} minutes.\n\
             {name} was there for {stay} minutes.\n\
             Then {name} walked to {destination}, taking {second_leg} minutes.\n\
             What time did {name} arrive at {destination}? (H:MM)",
            clock_time(start)
        ),
        Answer::text(clock_time(start + first_leg + stay + second_leg)),
    )
}

fn film(draws: &mut Draws<'_>) -> Question {
    let start = hm(draws.int(14, 19), draws.pick_copy(&[0, 15, 30, 45]));
    let duration = draws.int(60, 119);
    let prompt = format!(
        "A film started at {}.\nThe film lasted {} hour and {} minutes.",
        clock_time(start),
        duration / 60,
        duration % 60
    );
    Question::multi_part(
        Some(prompt),
        vec![
            Part::new("How long was the film in minutes?", Expected::int(duration)),
            Part::new(
                "What time did the film finish? (H:MM)",
                Expected::text(clock_time(start + duration)),
            ),
        ],
    )
}

fn timetable(draws: &mut Draws<'_>) -> Question {
    let route = &ROUTES[draws.index(ROUTES.len())];
    let (departs, arrives) = route.services[draws.index(route.services.len())];
    let journey = arrives - departs;

    let table = Table::Grid(GridTable {
        title: Some(format!("{} to {}", route.from, route.to)),
        headers: vec![route.from.to_string(), route.to.to_string()],
        rows: route
            .services
            .iter()
            .map(|&(dep, arr)| vec![clock_time(dep), clock_time(arr)])
            .collect(),
    });
    Question::Tabular(TabularQuestion {
        prompt: Some("Use the timetable to answer the questions.".into()),
        table,
        pictogram: None,
        answer: None,
        parts: vec![
            Part::new(
                format!(
                    "A train leaves {} at {}. How many minutes does it take to reach {}?",
                    route.from,
                    clock_time(departs),
                    route.to
                ),
                Expected::int(journey),
            ),
            Part::new(
                "What is that journey time in hours and minutes? (H:MM)",
                Expected::text(clock_time(journey)),
            ),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn timetable_journey_times() {
        // timetable, London to Paris, second service
        let mut source = ScriptedSource::new([0.99, 0.0, 0.5]);
        let mut draws = Draws::new(&mut source, 4);
        let q = time(&mut draws);
        let parts = q.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].answer, Some(Expected::int(141)));
        assert_eq!(parts[1].answer, Some(Expected::text("2:21")));
        assert!(matches!(q, Question::Tabular(_)));
    }

    #[test]
    fn journey_arrival_rolls_over_the_hour() {
        // simple journey starting 8:50, legs 8 + 5 + 8 minutes
        let mut source = ScriptedSource::new([0.34, 0.0, 0.99, 0.0, 0.0, 0.0]);
        let mut draws = Draws::new(&mut source, 4);
        let q = time(&mut draws);
        let parts = q.parts();
        assert_eq!(parts[0].answer, Some(Expected::int(16)));
        assert_eq!(parts[1].answer, Some(Expected::text("9:11")));
    }

    #[test]
    fn routes_run_forwards() {
        for route in &ROUTES {
            assert!(route.services.iter().all(|(dep, arr)| arr > dep));
        }
    }
}
