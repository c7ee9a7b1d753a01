use odontoboard::clock::{Clock, FixedClock, SystemClock};
use odontoboard::input::{parse_date, parse_time};
use odontoboard::layout_request;
use odontoboard::svg::SvgRenderer;
use std::env;
use std::fs;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq)]
enum Format {
    Svg,
    Json,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <board.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -f, --format <fmt>      Output format: svg, json (default: svg)");
    eprintln!("  -d, --date <date>       Override the board date (YYYY-MM-DD)");
    eprintln!("  -r, --resource <id>     Show only this doctor's column");
    eprintln!("  -n, --now <HH:MM>       Pin the current time on the board date");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for layout diagnostics.");
    process::exit(1);
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut format = Format::Svg;
    let mut date: Option<String> = None;
    let mut resource: Option<String> = None;
    let mut now: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                output_path = args.get(i).cloned();
            }
            "-f" | "--format" => {
                i += 1;
                format = match args.get(i).map(String::as_str) {
                    Some("svg") => Format::Svg,
                    Some("json") => Format::Json,
                    other => {
                        eprintln!("Invalid format: {}", other.unwrap_or(""));
                        process::exit(1);
                    }
                };
            }
            "-d" | "--date" => {
                i += 1;
                date = args.get(i).cloned();
            }
            "-r" | "--resource" => {
                i += 1;
                resource = args.get(i).cloned();
            }
            "-n" | "--now" => {
                i += 1;
                now = args.get(i).cloned();
            }
            "-h" | "--help" => usage(&args[0]),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let mut request: serde_json::Value = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid JSON in {}: {}", input_path, e);
            process::exit(1);
        }
    };
    if !request.is_object() {
        eprintln!("Invalid JSON in {}: expected an object", input_path);
        process::exit(1);
    }

    if let Some(d) = &date {
        if let Err(e) = parse_date(d) {
            eprintln!("{}", e);
            process::exit(1);
        }
        request["date"] = d.clone().into();
    }
    if let Some(r) = &resource {
        request["selected_resource"] = r.clone().into();
    }

    let board_date = request["date"].as_str().unwrap_or_default().to_string();
    let clock: Box<dyn Clock> = match &now {
        Some(t) => match (parse_date(&board_date), parse_time(t)) {
            (Ok(d), Ok(t)) => Box::new(FixedClock(d.and_time(t))),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => Box::new(SystemClock),
    };
    if now.is_some() {
        if let Some(fields) = request.as_object_mut() {
            fields.remove("now");
        }
    }

    let layout = match layout_request(&request.to_string(), clock.as_ref()) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Layout error: {}", e);
            process::exit(1);
        }
    };

    let output = match format {
        Format::Svg => SvgRenderer::default().render(&layout),
        Format::Json => match serde_json::to_string_pretty(&layout) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to encode layout: {}", e);
                process::exit(1);
            }
        },
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
