use std::fmt;
use std::path::PathBuf;

/// Which LMS API the simulated host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectChoice {
    Current,
    Legacy,
    /// No API at all; the course runs standalone.
    None,
}

impl DialectChoice {
    fn from_arg(raw: &str) -> Option<Self> {
        match raw {
            "current" | "2004" => Some(Self::Current),
            "legacy" | "1.2" => Some(Self::Legacy),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingCourse,
    InvalidDialect { raw: String },
    InvalidDepth { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingCourse => write!(f, "no course given (--course or COURSE_MANIFEST)"),
            ArgsError::InvalidDialect { raw } => write!(f, "invalid --dialect value: {raw}"),
            ArgsError::InvalidDepth { raw } => write!(f, "invalid --depth value: {raw}"),
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

fn parse_dialect(raw: String) -> Result<DialectChoice, ArgsError> {
    DialectChoice::from_arg(raw.trim()).ok_or(ArgsError::InvalidDialect { raw })
}

fn parse_depth(raw: String) -> Result<usize, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidDepth { raw })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub course: PathBuf,
    /// Where the host data model is loaded from and saved to.
    pub state: Option<PathBuf>,
    pub dialect: DialectChoice,
    /// Frames between the course and the host window.
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Parses flags, falling back to `env` for anything not given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgsError`] for unknown flags, missing or malformed values,
    /// or when no course manifest is named.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut course = env("COURSE_MANIFEST").map(PathBuf::from);
        let mut state = env("COURSE_STATE").map(PathBuf::from);
        let mut dialect = env("COURSE_DIALECT")
            .map(parse_dialect)
            .transpose()?
            .unwrap_or(DialectChoice::Current);
        let mut depth = env("COURSE_FRAME_DEPTH")
            .map(parse_depth)
            .transpose()?
            .unwrap_or(0);

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--course" => course = Some(require_value(&mut args, "--course")?.into()),
                "--state" => state = Some(require_value(&mut args, "--state")?.into()),
                "--dialect" => dialect = parse_dialect(require_value(&mut args, "--dialect")?)?,
                "--depth" => depth = parse_depth(require_value(&mut args, "--depth")?)?,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let course = course.ok_or(ArgsError::MissingCourse)?;
        Ok(Parsed::Run(Self {
            course,
            state,
            dialect,
            depth,
        }))
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  course-player --course <manifest.json> [--state <state.json>]");
    eprintln!("                [--dialect current|legacy|none] [--depth <frames>]");
    eprintln!();
    eprintln!("Commands while playing:");
    eprintln!("  n | p            next / previous slide");
    eprintln!("  g <n>            go to slide n (1-based)");
    eprintln!("  key <name>       key press, e.g. ArrowRight");
    eprintln!("  swipe <dx> <dy>  touch gesture in pixels");
    eprintln!("  answer <id> <response> <correct>");
    eprintln!("  score <percent>  status  h  q");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_MANIFEST, COURSE_STATE, COURSE_DIALECT, COURSE_FRAME_DEPTH, RUST_LOG");
}
