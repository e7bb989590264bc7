use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use morpholyzer::config::Config;
use morpholyzer::response::{respond, validate_text, AnalysisResponse, ErrorResponse};
use morpholyzer::MorphologicalAnalyzer;

/// Output format
#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Mecab,
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format {
            "json" => Ok(Self::Json),
            "mecab" => Ok(Self::Mecab),
            _ => Err("Could not parse an output format"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "morpholyzer", about = "Analyzes Japanese text into morphemes")]
struct Args {
    /// Text to analyze. Read from stdin when omitted.
    text: Option<String>,

    /// Configuration file (defaults to ./morpholyzer.toml or the user config dir).
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// Primary dictionary, an embedded:// URI or a path.
    #[clap(short = 'd', long)]
    dictionary: Option<String>,

    /// Output format. Choices are json and mecab.
    #[clap(short = 'O', long)]
    output_format: Option<OutputFormat>,

    /// Pretty-prints JSON output.
    #[clap(long)]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default(),
    };
    if let Some(dictionary) = args.dictionary {
        config.tagger.dictionary = dictionary;
    }

    let format = match args.output_format {
        Some(format) => format,
        None => config.output.format.parse().map_err(anyhow::Error::msg)?,
    };
    let pretty = args.pretty || config.output.pretty;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let outcome = analyze(&config, &text);
    let succeeded = outcome.is_ok();

    match format {
        OutputFormat::Json => match &outcome {
            Ok(response) => print_json(response, pretty)?,
            Err(error) => print_json(error, pretty)?,
        },
        OutputFormat::Mecab => match &outcome {
            Ok(response) => {
                for morpheme in &response.morphemes {
                    println!("{}", morpheme.to_mecab_line());
                }
                println!("EOS");
            }
            Err(error) => eprintln!("{}", error.error),
        },
    }

    Ok(ExitCode::from(exit_status(succeeded)))
}

/// Process exit status: 1 whenever an error response was produced
fn exit_status(succeeded: bool) -> u8 {
    if succeeded {
        0
    } else {
        1
    }
}

fn analyze(config: &Config, text: &str) -> Result<AnalysisResponse, ErrorResponse> {
    // Checked before loading the dictionary
    validate_text(text, &config.input)?;

    let analyzer = MorphologicalAnalyzer::from_config(config).map_err(|e| {
        tracing::error!("{}", e);
        ErrorResponse::analysis_failed(&e)
    })?;

    respond(&analyzer, text, &config.input)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpholyzer::response::ResponseStatus;

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!("mecab".parse::<OutputFormat>(), Ok(OutputFormat::Mecab)));
        assert!("wakati".parse::<OutputFormat>().is_err());
        assert!("JSON".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(true), 0);
        assert_eq!(exit_status(false), 1);
    }

    #[test]
    fn test_analyze_rejects_long_text() {
        let mut config = Config::default();
        config.input.max_chars = 5;

        let err = analyze(&config, "あいうえおか").unwrap_err();

        assert_eq!(err.status(), ResponseStatus::BadRequest);
        assert_eq!(exit_status(analyze(&config, "あいうえおか").is_ok()), 1);
    }

    #[test]
    fn test_analyze_rejects_empty_text() {
        let err = analyze(&Config::default(), " \n").unwrap_err();

        assert_eq!(err, ErrorResponse::empty_text());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["morpholyzer", "-O", "mecab", "--pretty", "猫が鳴く"]);

        assert!(matches!(args.output_format, Some(OutputFormat::Mecab)));
        assert!(args.pretty);
        assert_eq!(args.text.as_deref(), Some("猫が鳴く"));
    }
}
