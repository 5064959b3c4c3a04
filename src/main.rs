//! handicap-engine CLI
//!
//! Settle handicap bets from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle one bet
//! handicap-engine settle --type asian --score 0:0 --line -0.25 --pick home --odds 2.0
//!
//! # Settle a batch from a JSON file, output as JSON
//! handicap-engine settle --input bets.json --format json
//!
//! # Settle every line of the ladder at the current score
//! handicap-engine matrix --type european --score 1:1
//!
//! # Generate random bets for testing
//! handicap-engine generate --count 20
//! ```

use handicap_engine::core::bet::{BetRequest, Score, DEFAULT_ODDS, DEFAULT_STAKE};
use handicap_engine::core::handicap::{ladder_for, HandicapLine, HandicapType, Selection};
use handicap_engine::core::outcome::SettlementResult;
use handicap_engine::explain::{explain_settlement, RuleExplainer};
use handicap_engine::history::HistoryLog;
use handicap_engine::settlement::engine::SettlementEngine;
use handicap_engine::settlement::matrix::SettlementMatrix;
use handicap_engine::simulation::scenarios::{generate_random_bets, ScenarioConfig};
use log::{debug, info};
use rust_decimal::Decimal;
use std::fs;
use std::process;
use std::str::FromStr;

fn print_usage() {
    eprintln!(
        r#"handicap-engine — European and Asian handicap bet settlement

USAGE:
    handicap-engine <COMMAND> [OPTIONS]

COMMANDS:
    settle      Settle a single bet, or a batch from a JSON file
    matrix      Settle every ladder line for every selection at a score
    lines       List the offered lines for a handicap type
    generate    Generate random bets (for testing)
    help        Show this message

OPTIONS (settle):
    --type <TYPE>       asian or european
    --score <H:A>       Match score, e.g. 2:1
    --line <LINE>       Handicap line, e.g. -0.25
    --pick <SIDE>       home, draw or away
    --odds <ODDS>       Decimal odds (default: 1.95)
    --stake <STAKE>     Stake (default: 100)
    --input <FILE>      JSON file of bets instead of the flags above
    --explain           Append a rule explanation
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (matrix):
    --type, --score, --odds, --stake, --format as above

OPTIONS (lines):
    --type <TYPE>       asian or european

OPTIONS (generate):
    --count <N>         Number of bets (default: 20)
    --output <FILE>     Write to file instead of stdout

Set RUST_LOG=debug to trace each settlement.

EXAMPLES:
    handicap-engine settle --type asian --score 0:0 --line -0.25 --pick home --odds 2.0
    handicap-engine settle --type european --score 1:1 --line 0 --pick draw --odds 3.0 --explain
    handicap-engine settle --input bets.json --format json
    handicap-engine matrix --type asian --score 2:1 --odds 1.9
    handicap-engine generate --count 50 --output bets.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Flags shared by the subcommands.
#[derive(Default)]
struct Options {
    handicap_type: Option<HandicapType>,
    score: Option<Score>,
    line: Option<HandicapLine>,
    selection: Option<Selection>,
    odds: Option<Decimal>,
    stake: Option<Decimal>,
    input: Option<String>,
    output: Option<String>,
    count: Option<usize>,
    json: bool,
    explain: bool,
}

fn parse_score(value: &str) -> Score {
    let (home, away) = value
        .split_once(':')
        .or_else(|| value.split_once('-'))
        .unwrap_or_else(|| fail(format!("score '{}' must look like 2:1", value)));
    let goals = |s: &str| {
        s.trim()
            .parse::<u32>()
            .unwrap_or_else(|_| fail(format!("invalid goal count '{}'", s)))
    };
    Score::new(goals(home), goals(away))
}

fn parse_decimal(flag: &str, value: &str) -> Decimal {
    Decimal::from_str(value.trim())
        .unwrap_or_else(|e| fail(format!("{} '{}' is not a number: {}", flag, value, e)))
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .unwrap_or_else(|| fail(format!("{} requires a value", flag)))
        };
        match flag {
            "--type" => {
                opts.handicap_type = Some(HandicapType::from_str(&value()).unwrap_or_else(|e| fail(e)))
            }
            "--score" => opts.score = Some(parse_score(&value())),
            "--line" => opts.line = Some(HandicapLine::parse(&value()).unwrap_or_else(|e| fail(e))),
            "--pick" => opts.selection = Some(Selection::from_str(&value()).unwrap_or_else(|e| fail(e))),
            "--odds" => opts.odds = Some(parse_decimal("--odds", &value())),
            "--stake" => opts.stake = Some(parse_decimal("--stake", &value())),
            "--input" => opts.input = Some(value()),
            "--output" => opts.output = Some(value()),
            "--count" => {
                opts.count = Some(
                    value()
                        .parse()
                        .unwrap_or_else(|_| fail("--count requires a number")),
                )
            }
            "--format" => match value().as_str() {
                "json" => opts.json = true,
                "text" => opts.json = false,
                other => fail(format!("--format requires 'text' or 'json', got '{}'", other)),
            },
            "--explain" => opts.explain = true,
            _ => fail(format!("unknown option: {}", flag)),
        }
        i += 1;
    }
    opts
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("could not serialize output: {}", e)),
    }
}

/// JSON schema for batch input.
#[derive(serde::Deserialize)]
struct BetsFile {
    bets: Vec<BetRequest>,
}

/// JSON output schema for a settled bet.
#[derive(serde::Serialize)]
struct SettlementOutput {
    request: BetRequest,
    result: SettlementResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

fn load_bets(path: &str) -> Vec<BetRequest> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));
    let file: BetsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "bets": [
    {{ "handicap_type": "ASIAN", "score": {{ "home": 0, "away": 0 }}, "line": "-0.25",
       "selection": "HOME", "odds": "2.00", "stake": "100" }}
  ]
}}"#
        );
        fail(format!("parsing JSON: {}", e))
    });
    file.bets
}

fn request_from_flags(opts: &Options) -> BetRequest {
    let handicap_type = opts
        .handicap_type
        .unwrap_or_else(|| fail("--type <TYPE> is required"));
    let score = opts.score.unwrap_or_else(|| fail("--score <H:A> is required"));
    let line = opts.line.unwrap_or_else(|| fail("--line <LINE> is required"));
    let selection = opts.selection.unwrap_or_else(|| fail("--pick <SIDE> is required"));
    BetRequest::new(handicap_type, score, line, selection)
        .with_odds(opts.odds.unwrap_or(DEFAULT_ODDS))
        .with_stake(opts.stake.unwrap_or(DEFAULT_STAKE))
}

fn cmd_settle(args: &[String]) {
    let opts = parse_options(args);
    let requests = match &opts.input {
        Some(path) => load_bets(path),
        None => vec![request_from_flags(&opts)],
    };

    let mut history = HistoryLog::with_capacity(requests.len().max(1));
    let mut outputs = Vec::with_capacity(requests.len());

    for request in requests {
        if let Err(e) = request.validate() {
            fail(format!("{}: {}", request, e));
        }
        let result = SettlementEngine::settle(&request);
        let explanation = if opts.explain {
            explain_settlement(&RuleExplainer, &request, result.clone())
                .explanation
                .ok()
        } else {
            None
        };
        history.record(request.clone(), result.clone());
        outputs.push(SettlementOutput {
            request,
            result,
            explanation,
        });
    }
    info!(
        "settled {} bet(s), total net {}",
        history.len(),
        history.total_net_profit()
    );

    if opts.json {
        if outputs.len() == 1 && opts.input.is_none() {
            print_json(&outputs[0]);
        } else {
            print_json(&outputs);
        }
        return;
    }

    for output in &outputs {
        println!("{}", output.request);
        println!("{}", output.result);
        if let Some(text) = &output.explanation {
            println!("{}\n", text);
        }
    }
    if outputs.len() > 1 {
        println!("Total net profit: {:.2}", history.total_net_profit());
    }
}

fn cmd_matrix(args: &[String]) {
    let opts = parse_options(args);
    let handicap_type = opts
        .handicap_type
        .unwrap_or_else(|| fail("--type <TYPE> is required"));
    let score = opts.score.unwrap_or_else(|| fail("--score <H:A> is required"));
    let odds = opts.odds.unwrap_or(DEFAULT_ODDS);
    let stake = opts.stake.unwrap_or(DEFAULT_STAKE);
    // Every ladder line is in range, so checking the level line covers odds and stake.
    let level = BetRequest::new(handicap_type, score, HandicapLine::LEVEL, Selection::Home)
        .with_odds(odds)
        .with_stake(stake);
    if let Err(e) = level.validate() {
        fail(e);
    }
    let matrix = SettlementMatrix::build(handicap_type, score, odds, stake);
    debug!("built {} matrix with {} rows", handicap_type, matrix.rows().len());

    if opts.json {
        print_json(&matrix);
    } else {
        println!("{}", matrix);
    }
}

fn cmd_lines(args: &[String]) {
    let opts = parse_options(args);
    let handicap_type = opts
        .handicap_type
        .unwrap_or_else(|| fail("--type <TYPE> is required"));
    for line in ladder_for(handicap_type) {
        println!(
            "{:>7}  {}",
            line.label_for(handicap_type),
            match line.split() {
                Some((lower, upper)) => format!("split {} & {}", lower, upper),
                None => String::new(),
            }
        );
    }
}

fn cmd_generate(args: &[String]) {
    let opts = parse_options(args);
    let config = ScenarioConfig {
        count: opts.count.unwrap_or(20),
        ..Default::default()
    };
    let bets = generate_random_bets(&config);

    #[derive(serde::Serialize)]
    struct OutputFile<'a> {
        bets: &'a [BetRequest],
    }

    let json = serde_json::to_string_pretty(&OutputFile { bets: &bets })
        .unwrap_or_else(|e| fail(format!("could not serialize bets: {}", e)));

    match opts.output {
        Some(path) => {
            fs::write(&path, &json)
                .unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
            eprintln!("Generated {} bets → {}", bets.len(), path);
        }
        None => println!("{}", json),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "matrix" => cmd_matrix(rest),
        "lines" => cmd_lines(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
