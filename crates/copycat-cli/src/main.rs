use copycat::{CancellationToken, Rejection};
use copycat_graph::{Session, SessionDocument};
use copycat_host::report::{json, text_line};
use copycat_host::{FinishStatus, Parameters, TaskObserver, execute, key_column_names};
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const RESOURCE_PATH: &str = "/copycat/v1/apply";
const ERROR_CODE: &str = "1";
const LOG_ENV: &str = "COPYCAT_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Session(copycat_graph::Error),
    UnknownNetwork(String),
    Failed(String),
    Rejected(Rejection),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Session(err) => write!(f, "invalid session: {err}"),
            CliError::UnknownNetwork(name) => write!(f, "no network named `{name}`"),
            CliError::Failed(msg) => write!(f, "{msg}"),
            CliError::Rejected(rejection) => write!(f, "{}: {}", rejection.title(), rejection),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<copycat_graph::Error> for CliError {
    fn from(value: copycat_graph::Error) -> Self {
        Self::Session(value)
    }
}

#[derive(Debug, Clone, Default)]
enum Command {
    #[default]
    Run,
    Networks,
    Columns(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Envelope,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "envelope" => Ok(Self::Envelope),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    source: Option<String>,
    target: Option<String>,
    source_column: Option<String>,
    target_column: Option<String>,
    select_unmapped: bool,
    grid_unmapped: bool,
    h_spacing: Option<f64>,
    v_spacing: Option<f64>,
    no_viewport: bool,
    format: OutputFormat,
    pretty: bool,
    verbose: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "copycat-cli\n\
\n\
USAGE:\n\
  copycat-cli [run] [--source <network>] [--target <network>] [--source-column <col>] [--target-column <col>] [--select-unmapped] [--grid-unmapped] [--h-spacing <n>] [--v-spacing <n>] [--no-viewport] [--format text|json|envelope] [--pretty] [--out <path>] [--verbose] [<session.json>|-]\n\
  copycat-cli networks [<session.json>|-]\n\
  copycat-cli columns <network> [<session.json>|-]\n\
\n\
NOTES:\n\
  - If <session.json> is omitted or '-', the session is read from stdin.\n\
  - Networks and key columns left out fall back to the defaults a host would offer:\n\
    the current (or first) network as source, the next one as target, and the `name` column.\n\
  - --out writes the session with updated positions, selection and viewport.\n\
  - Log filtering follows the COPYCAT_LOG environment variable (default: warn).\n\
\n\
EXIT CODES:\n\
  0 success, 1 failure, 2 usage error, 3 run rejected (same network or mismatched key types)\n\
"
}

fn parse_spacing(raw: Option<&String>) -> Result<f64, CliError> {
    let Some(raw) = raw else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positional: Vec<String> = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "run" if positional.is_empty() => args.command = Command::Run,
            "networks" if positional.is_empty() => args.command = Command::Networks,
            "columns" if positional.is_empty() => {
                let Some(network) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.command = Command::Columns(network.clone());
            }
            "--source" => args.source = Some(it.next().ok_or(CliError::Usage(usage()))?.clone()),
            "--target" => args.target = Some(it.next().ok_or(CliError::Usage(usage()))?.clone()),
            "--source-column" => {
                args.source_column = Some(it.next().ok_or(CliError::Usage(usage()))?.clone())
            }
            "--target-column" => {
                args.target_column = Some(it.next().ok_or(CliError::Usage(usage()))?.clone())
            }
            "--select-unmapped" => args.select_unmapped = true,
            "--grid-unmapped" => args.grid_unmapped = true,
            "--h-spacing" => args.h_spacing = Some(parse_spacing(it.next())?),
            "--v-spacing" => args.v_spacing = Some(parse_spacing(it.next())?),
            "--no-viewport" => args.no_viewport = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--out" => args.out = Some(it.next().ok_or(CliError::Usage(usage()))?.clone()),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => positional.push(other.to_string()),
        }
    }

    if positional.len() > 1 {
        return Err(CliError::Usage(usage()));
    }
    args.input = positional.pop();
    Ok(args)
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_session(path: Option<&str>) -> Result<Session, CliError> {
    let text = read_input(path)?;
    let doc = SessionDocument::from_json_str(&text)?;
    Ok(Session::from_document(doc)?)
}

fn to_json(value: &impl serde::Serialize, pretty: bool) -> Result<String, CliError> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

fn parameters(args: &Args, session: &Session) -> Parameters {
    let mut params = Parameters::defaults(session);
    if args.source.is_some() {
        params.set_source_network(session, args.source.clone());
    }
    if args.target.is_some() {
        params.set_target_network(session, args.target.clone());
    }
    if let Some(column) = &args.source_column {
        params.source_column = Some(column.clone());
    }
    if let Some(column) = &args.target_column {
        params.target_column = Some(column.clone());
    }

    let opts = &mut params.options;
    opts.select_unmapped = args.select_unmapped;
    opts.grid_unmapped = args.grid_unmapped;
    if let Some(h) = args.h_spacing {
        opts.grid.horizontal = h;
    }
    if let Some(v) = args.v_spacing {
        opts.grid.vertical = v;
    }
    opts.copy_viewport = !args.no_viewport;
    params
}

fn run(args: Args) -> Result<(), CliError> {
    let mut session = load_session(args.input.as_deref())?;

    match &args.command {
        Command::Networks => {
            for name in session.names() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Columns(network) => {
            let graph = session
                .by_name(network)
                .ok_or_else(|| CliError::UnknownNetwork(network.clone()))?;
            for column in key_column_names(Some(graph)) {
                println!("{column}");
            }
            Ok(())
        }
        Command::Run => {
            let request = parameters(&args, &session).request();
            tracing::debug!(?request, "resolved parameters");

            let mut observer = TaskObserver::new(RESOURCE_PATH, ERROR_CODE);
            let status = execute(
                &mut session,
                &request,
                &CancellationToken::new(),
                &mut observer,
            );

            let result = observer.result();
            match args.format {
                OutputFormat::Text => {
                    if let Some(line) = text_line(result.as_ref()) {
                        println!("{line}");
                    }
                }
                OutputFormat::Json => println!("{}", to_json(&json(result.as_ref()), args.pretty)?),
                OutputFormat::Envelope => {
                    if let Some(response) = observer.response() {
                        println!("{}", to_json(response, args.pretty)?);
                    }
                }
            }

            match status {
                FinishStatus::Succeeded | FinishStatus::Cancelled => {}
                FinishStatus::Rejected(rejection) => return Err(CliError::Rejected(rejection)),
                FinishStatus::Failed(message) => return Err(CliError::Failed(message)),
            }

            if let Some(out) = &args.out {
                let text = session.to_document().to_json_string(args.pretty)?;
                std::fs::write(out, text)?;
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Rejected(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
