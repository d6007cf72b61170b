use openapi_contract_validator::{ConversionOptions, OpenApiValidator, DEFAULT_CONTENT_TYPE};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: openapi-contract-validator <spec> <path> <method> <status> <body-file> [content-type]";

/// Reads conversion options from the YAML/JSON file named by `CONVERSION_OPTIONS`, if set
fn load_options() -> Result<ConversionOptions, String> {
    let Ok(options_path) = env::var("CONVERSION_OPTIONS") else {
        return Ok(ConversionOptions::default());
    };

    let contents = fs::read_to_string(&options_path)
        .map_err(|e| format!("Failed to read options file {}: {}", options_path, e))?;
    serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse options file {}: {}", options_path, e))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [spec, path, method, status, body_file, rest @ ..] = args.as_slice() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };
    let content_type = rest.first().map_or(DEFAULT_CONTENT_TYPE, String::as_str);

    let Ok(status) = status.parse::<u16>() else {
        eprintln!("✗ Invalid status code: {}", status);
        return ExitCode::from(2);
    };

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("✗ {}", e);
            return ExitCode::from(2);
        }
    };

    let validator = match OpenApiValidator::from_path(Path::new(spec), options) {
        Ok(validator) => {
            let info = validator.document().info();
            println!("✓ Loaded spec: {} v{}", info.title, info.version);
            validator
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let body = match fs::read(body_file) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("✗ Failed to read body file {}: {}", body_file, e);
            return ExitCode::from(2);
        }
    };

    match validator.validate_response_body(&body, path, method, status, content_type) {
        Ok(()) => {
            println!("✓ {} {} {} matches the contract", status, method, path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
