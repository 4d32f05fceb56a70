#![forbid(unsafe_code)]

mod command;
mod render;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quiz_core::generator;
use quiz_core::model::TopicId;
use quiz_services::{QuizSession, SessionConfig, SessionError};
use tracing_subscriber::EnvFilter;

use command::{Command, HELP};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidGrade { raw: String },
    InvalidTopic { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidGrade { raw } => write!(f, "invalid --grade value: {raw}"),
            ArgsError::InvalidTopic { raw } => write!(f, "invalid --topic value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz topics [--grade <n>]");
    eprintln!("  quiz play   [--topic <id>] [--seed <n>] [--save <path>] [--resume <path>]");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --topic addition-subtraction");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SEED, QUIZ_MAX_ATTEMPTS, QUIZ_FUZZY_THRESHOLD, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Topics,
    Play,
}

impl Mode {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "topics" => Some(Self::Topics),
            "play" => Some(Self::Play),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct PlayArgs {
    topic: Option<TopicId>,
    seed: Option<u64>,
    save: Option<PathBuf>,
    resume: Option<PathBuf>,
}

impl PlayArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topic" => {
                    let value = require_value(args, "--topic")?;
                    let topic = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTopic { raw: value.clone() })?;
                    parsed.topic = Some(topic);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--save" => parsed.save = Some(require_value(args, "--save")?.into()),
                "--resume" => parsed.resume = Some(require_value(args, "--resume")?.into()),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

fn parse_grade(args: &mut impl Iterator<Item = String>) -> Result<Option<u8>, ArgsError> {
    let mut grade = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--grade" => {
                let value = require_value(args, "--grade")?;
                grade = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGrade { raw: value.clone() })?,
                );
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok(grade)
}

fn list_topics(grade: Option<u8>) {
    for entry in generator::topics() {
        if grade.is_some_and(|g| g != entry.grade) {
            continue;
        }
        println!("{:>5}  {:<40} {}", entry.number, entry.id, entry.title);
    }
}

//
// ─── PLAY LOOP ─────────────────────────────────────────────────────────────────
//

fn show(session: &QuizSession) {
    let Some(question) = session.question() else {
        return;
    };
    let cursor = session.cursor().unwrap_or(0);
    println!();
    println!("── Question {} of {} ──", cursor + 1, session.len());
    print!("{}", render::question(question));
    if let Some(feedback) = session.snapshot().and_then(|s| s.feedback.as_ref()) {
        print!("{}", render::feedback(feedback));
    }
}

fn answer(session: &mut QuizSession, text: String) -> Result<(), SessionError> {
    let has_parts = session.question().is_some_and(|q| !q.parts().is_empty());
    if has_parts {
        let part = session.focused_part();
        session.set_part_answer(part, text)
    } else {
        session.set_answer(text)
    }
}

/// Applies one command; returns false when the learner quits.
fn step(session: &mut QuizSession, command: Command) -> Result<bool, SessionError> {
    match command {
        Command::Answer(text) if text.is_empty() => {}
        Command::Answer(text) => answer(session, text)?,
        Command::Part { part, text } => {
            session.focus_part(part);
            session.set_part_answer(part, text)?;
        }
        Command::Sub { part, sub, text } => session.set_sub_part_answer(part, sub, text)?,
        Command::Freq { row, value } => session.set_frequency(row, value)?,
        Command::Key(value) => session.set_key(value)?,
        Command::Drop { row, token } => session.place_token(&row, token)?,
        Command::Undo { row, board, index } => {
            session.remove_token(&row, board, index)?;
        }
        Command::Submit => {
            let result = session.submit()?;
            print!("{}", render::feedback(&result));
        }
        Command::Next => {
            session.advance()?;
            show(session);
        }
        Command::Back => {
            session.rewind()?;
            show(session);
        }
        Command::New => {
            session.branch()?;
            show(session);
        }
        Command::Score => {
            let (correct, units) = session.score();
            println!("{}", render::score(correct, units));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn play(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SessionConfig::from_env()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let topic = args
        .topic
        .unwrap_or_else(|| TopicId::new("addition-subtraction"));

    let mut session = QuizSession::new(config);
    match &args.resume {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            session.restore_json(&topic, &json)?;
        }
        None => session.start(&topic)?,
    }

    if let Some(entry) = session.topic() {
        println!("{} {} (type :help for commands)", entry.number, entry.title);
    }
    show(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match step(&mut session, command) {
            Ok(true) => {}
            Ok(false) => break,
            // Learner-facing refusals such as "submit an answer before moving on".
            Err(err) => println!("{err}"),
        }
    }

    let summary = session.summary()?;
    println!(
        "{}: {} questions, {} graded. {}",
        summary.topic,
        summary.questions,
        summary.graded,
        render::score(summary.score, summary.units)
    );
    if let Some(path) = &args.save {
        std::fs::write(path, session.export_json()?)?;
        tracing::info!(path = %path.display(), records = session.len(), "saved session");
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let mode = match argv.first().map(String::as_str) {
        None => Mode::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Mode::Play,
        Some(first) => Mode::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    match mode {
        Mode::Topics => {
            let grade = parse_grade(&mut iter).inspect_err(|e| {
                eprintln!("{e}");
                print_usage();
            })?;
            list_topics(grade);
            Ok(())
        }
        Mode::Play => {
            let args = PlayArgs::parse(&mut iter).inspect_err(|e| {
                eprintln!("{e}");
                print_usage();
            })?;
            play(args)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_clock;

    fn args(raw: &[&str]) -> std::vec::IntoIter<String> {
        raw.iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn play_flags() {
        let parsed = PlayArgs::parse(&mut args(&["--topic", "ratio", "--seed", "9"])).unwrap();
        assert_eq!(parsed.topic, Some(TopicId::new("ratio")));
        assert_eq!(parsed.seed, Some(9));

        assert!(matches!(
            PlayArgs::parse(&mut args(&["--seed", "soon"])),
            Err(ArgsError::InvalidSeed { .. })
        ));
        assert!(matches!(
            PlayArgs::parse(&mut args(&["--save"])),
            Err(ArgsError::MissingValue { flag: "--save" })
        ));
    }

    #[test]
    fn commands_drive_the_session() {
        let mut session = QuizSession::new(SessionConfig::seeded(3)).with_clock(fixed_clock());
        session.start(&TopicId::new("addition-subtraction")).unwrap();
        let expected = match session.question() {
            Some(Question::Simple(q)) => q.answer.to_string(),
            other => panic!("unexpected question: {other:?}"),
        };

        assert!(step(&mut session, Command::Next).is_err());
        step(&mut session, Command::Answer(expected)).unwrap();
        step(&mut session, Command::Submit).unwrap();
        assert_eq!(session.score(), (1, 1));
        step(&mut session, Command::Next).unwrap();
        assert_eq!(session.len(), 2);
        assert!(!step(&mut session, Command::Quit).unwrap());
    }

    #[test]
    fn out_of_range_parts_are_refused() {
        let mut session = QuizSession::new(SessionConfig::seeded(3)).with_clock(fixed_clock());
        session.start(&TopicId::new("simultaneous-equations")).unwrap();
        let command = Command::parse(":part 99999999999 7").unwrap();
        let err = step(&mut session, command).unwrap_err();
        assert!(matches!(err, SessionError::NoSuchPart { .. }));
        assert!(step(&mut session, Command::parse(":part b 7").unwrap()).unwrap());
        assert_eq!(session.focused_part(), 1);
    }
}
