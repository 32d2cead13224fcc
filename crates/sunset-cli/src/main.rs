use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use sunset_core::{format_http_date, SunsetConfig, SunsetPlugin, LINK_HEADER, SUNSET_HEADER};
use sunset_pipeline::{Executor, Response};
use tracing_subscriber::EnvFilter;

mod input;

fn cli() -> Command {
    Command::new("sunset-headers")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compute Sunset and Link response headers for a request")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Execute a request against a schema and print its sunset headers")
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Schema document (YAML, or JSON with a .json extension)"),
                )
                .arg(
                    Arg::new("request")
                        .long("request")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Request document (YAML, or JSON with a .json extension)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Sunset settings file"),
                )
                .arg(
                    Arg::new("directive")
                        .long("directive")
                        .help("Directive name, overriding the settings file"),
                )
                .arg(
                    Arg::new("at")
                        .long("at")
                        .help("Request start as an RFC 3339 timestamp (default: now)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("format-date")
                .about("Render an RFC 3339 timestamp as a Sunset header value")
                .arg(Arg::new("timestamp").required(true)),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let outcome = match matches.subcommand() {
        Some(("check", args)) => check(args).await,
        Some(("format-date", args)) => format_date(args),
        _ => Ok(ExitCode::SUCCESS),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn check(args: &ArgMatches) -> Result<ExitCode> {
    let schema_path = args
        .get_one::<PathBuf>("schema")
        .ok_or_else(|| anyhow::anyhow!("--schema is required"))?;
    let request_path = args
        .get_one::<PathBuf>("request")
        .ok_or_else(|| anyhow::anyhow!("--request is required"))?;

    let schema = input::load_schema(schema_path)?;
    let request = input::load_request(request_path)?;
    let settings = input::load_settings(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let mut config = SunsetConfig::from_settings(&settings);
    if let Some(directive) = args.get_one::<String>("directive") {
        config = config.with_directive_name(directive.as_str());
    }
    let started_at = match args.get_one::<String>("at") {
        Some(at) => input::parse_instant(at)?,
        None => chrono::Utc::now(),
    };

    tracing::info!(
        "Checking {} against {} with @{}",
        request_path.display(),
        schema_path.display(),
        config.directive_name()
    );

    let executor = Executor::new(Arc::new(schema)).with_plugin(SunsetPlugin::with_config(config));
    let response = executor.execute_at(&request, started_at).await;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report_json(&response))?);
    } else {
        print_report(&response);
    }

    for error in &response.errors {
        if error.path.is_empty() {
            eprintln!("request error: {}", error.message);
        } else {
            eprintln!("request error at {}: {}", error.path.join("."), error.message);
        }
    }

    Ok(if response.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn report_json(response: &Response) -> serde_json::Value {
    json!({
        "sunset": response.http.headers.get(SUNSET_HEADER),
        "link": response.http.headers.get(LINK_HEADER),
        "errors": response.errors,
    })
}

fn print_report(response: &Response) {
    if response.http.headers.is_empty() {
        println!("No sunset headers");
        return;
    }
    print!("{}", response.http.headers);
}

fn format_date(args: &ArgMatches) -> Result<ExitCode> {
    let timestamp = args
        .get_one::<String>("timestamp")
        .ok_or_else(|| anyhow::anyhow!("timestamp is required"))?;
    println!("{}", format_http_date(input::parse_instant(timestamp)?));
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sunset_pipeline::FieldSelection;
    use sunset_test_utils::{fixture_schema, query, request_start};

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_check_arguments() {
        let matches = cli()
            .try_get_matches_from([
                "sunset-headers",
                "check",
                "--schema",
                "schema.yaml",
                "--request",
                "request.json",
                "--directive",
                "retire",
                "--json",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert_eq!(args.get_one::<String>("directive").map(String::as_str), Some("retire"));
        assert!(args.get_flag("json"));
    }

    #[tokio::test]
    async fn json_report_lists_headers_and_errors() {
        let executor = Executor::new(fixture_schema()).with_plugin(SunsetPlugin::new());
        let request = query(vec![
            FieldSelection::new("withSunset"),
            FieldSelection::new("brokenSunset"),
        ]);
        let response = executor.execute_at(&request, request_start()).await;

        let report = report_json(&response);
        assert_eq!(report["sunset"], "Thu, 01 Oct 2099 12:00:00 GMT");
        assert_eq!(report["link"], "<https://foo.com>; rel=\"sunset\"");
        assert_eq!(report["errors"][0]["path"][0], "brokenSunset");
    }
}
