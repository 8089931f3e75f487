//! Command-line interface and command execution.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lambdaproxy::status::TracingSink;
use lambdaproxy::{
    DecodeOptions, EncodeOptions, HttpRequest, client_error, decode_response, encode_request,
    encode_response, server_error,
};

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// Status used when `status` is given neither a code nor `--error`.
const INTERNAL_SERVER_ERROR: u16 = 500;

/// Encode and decode API gateway proxy envelopes.
#[derive(Debug, Parser)]
#[command(name = "lambdaproxy-probe", version)]
#[command(about = "Encode and decode API gateway proxy envelopes", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        long,
        global = true,
        env = "LAMBDAPROXY_PROBE_CONFIG",
        default_value = "probe.toml"
    )]
    pub config: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Probe subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a request into a gateway request envelope
    Encode(EncodeArgs),
    /// Decode a gateway response envelope into a plain response
    Decode(DecodeArgs),
    /// Print the error envelope for a status code, or a 500 with `--error`
    Status(StatusArgs),
}

/// Arguments for `encode`.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Read a JSON request from this file (`-` for stdin) instead of flags.
    #[arg(long, conflicts_with_all = ["method", "resource", "headers", "body"])]
    pub request: Option<String>,

    /// Request method (defaults to the configured method).
    #[arg(long)]
    pub method: Option<String>,

    /// Resource path, optionally with a query string.
    #[arg(long)]
    pub resource: Option<String>,

    /// Header in `Name: value` form; may be repeated.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Raw request body.
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for `decode`.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Response envelope file (`-` for stdin).
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Pretty-print the decoded response.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Status code to answer with.
    #[arg(required_unless_present = "error")]
    pub code: Option<u16>,

    /// Report this message as an internal error and answer 500.
    #[arg(long, conflicts_with = "code")]
    pub error: Option<String>,
}

/// Runs `command`, reading `-` inputs from `stdin` and writing the result to `stdout`.
///
/// # Errors
///
/// Returns a [`ProbeError`] if an input cannot be read or parsed, or the
/// output cannot be written.
pub fn execute(
    command: &Command,
    config: &ProbeConfig,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<(), ProbeError> {
    let output = match command {
        Command::Encode(args) => {
            let request = build_request(args, config, stdin)?;
            log_request(&request);
            encode_request(&request, &EncodeOptions::default())?
        }
        Command::Decode(args) => {
            let input = read_source(&args.input, stdin)?;
            let response = decode_response(&input, &DecodeOptions::default())?;
            tracing::info!(
                status = response.status_code,
                headers = response.headers.len(),
                body_size = response.body.len(),
                "Decoded response"
            );
            let mut json = if args.pretty || config.pretty {
                serde_json::to_vec_pretty(&response)?
            } else {
                serde_json::to_vec(&response)?
            };
            json.push(b'\n');
            json
        }
        Command::Status(args) => {
            let envelope = args.error.as_deref().map_or_else(
                || client_error(args.code.unwrap_or(INTERNAL_SERVER_ERROR)),
                |message| server_error(&TracingSink, message),
            );
            encode_response(&envelope, &EncodeOptions::default())?
        }
    };

    stdout
        .write_all(&output)
        .and_then(|()| stdout.flush())
        .map_err(|e| ProbeError::io("<stdout>", e))
}

fn build_request(
    args: &EncodeArgs,
    config: &ProbeConfig,
    stdin: &mut dyn Read,
) -> Result<HttpRequest, ProbeError> {
    if let Some(source) = &args.request {
        let raw = read_source(source, stdin)?;
        return Ok(serde_json::from_slice(&raw)?);
    }

    let method = args.method.as_deref().unwrap_or(&config.method);
    let resource = args.resource.as_deref().unwrap_or("/");
    let mut request = HttpRequest::new(method, resource);
    request
        .headers
        .extend(config.headers.iter().map(|(n, v)| (n.as_str(), v.as_str())));
    for line in &args.headers {
        let (name, value) = parse_header(line)?;
        request.headers.append(name, value);
    }
    if let Some(body) = &args.body {
        request.body.clone_from(body);
    }
    Ok(request)
}

fn log_request(request: &HttpRequest) {
    tracing::info!(
        method = %request.method,
        resource = %request.resource,
        body_size = request.body.len(),
        "Encoding request"
    );
    for (name, value) in request.headers.iter() {
        tracing::info!(%name, %value, "Header");
    }
}

/// Splits `Name: value`, trimming whitespace around both parts.
fn parse_header(line: &str) -> Result<(&str, &str), ProbeError> {
    match line.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(ProbeError::InvalidHeader(line.to_owned())),
    }
}

fn read_source(source: &str, stdin: &mut dyn Read) -> Result<Vec<u8>, ProbeError> {
    if source == "-" {
        let mut buf = Vec::new();
        stdin
            .read_to_end(&mut buf)
            .map_err(|e| ProbeError::io("<stdin>", e))?;
        Ok(buf)
    } else {
        std::fs::read(source).map_err(|e| ProbeError::io(source, e))
    }
}
