//! Genkey binary.
//!
//! # Usage
//!
//! ```bash
//! export ENV_IN_PUBLIC_SALT_LOCATION=/etc/genkey/salt
//! export ENV_IN_PUBLIC_INFO_LOCATION=/etc/genkey/info
//! export ENV_IN_SECRET_IKM_LOCATION=/run/secrets/ikm
//! export ENV_IN_SECRET_PEPPER_LOCATION=/run/secrets/pepper
//!
//! # Print the fingerprint of the 32-byte derived key
//! genkey
//!
//! # Hex-encoded source files, 5 second loader deadline
//! genkey --input-format hex --timeout-ms 5000
//! ```

use std::{
    io::{IsTerminal, Write},
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use genkey_cli::{
    Config, GenkeyError, LoaderConfig, Source, SourceEncoding, SystemEnv, derive_fingerprint,
    loader::{
        IKM_ENV_KEY, IKM_LIMIT, INFO_ENV_KEY, INFO_LIMIT, PEPPER_ENV_KEY, PEPPER_LIMIT,
        SALT_ENV_KEY, SALT_LIMIT,
    },
    write_fingerprint,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Derive a key from environment-indirected material and print its fingerprint
#[derive(Parser, Debug)]
#[command(name = "genkey")]
#[command(about = "Derive an HKDF-SHA256 key and print its SHA-256 fingerprint")]
#[command(version)]
struct Args {
    /// Derived key length in bytes
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=8160))]
    key_length: u16,

    /// How source files are encoded
    #[arg(long, value_enum, default_value_t = InputFormat::Raw)]
    input_format: InputFormat,

    /// Deadline for loading all sources, in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,

    /// Variable naming the salt file
    #[arg(long, default_value = SALT_ENV_KEY)]
    salt_env: String,

    /// Variable naming the info file
    #[arg(long, default_value = INFO_ENV_KEY)]
    info_env: String,

    /// Variable naming the input key material file
    #[arg(long, default_value = IKM_ENV_KEY)]
    ikm_env: String,

    /// Variable naming the pepper file
    #[arg(long, default_value = PEPPER_ENV_KEY)]
    pepper_env: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Source file encoding
#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// File contents are the bytes
    Raw,
    /// File contents are hex text
    Hex,
}

impl Args {
    fn into_config(self) -> Config {
        let encoding = match self.input_format {
            InputFormat::Raw => SourceEncoding::Raw,
            InputFormat::Hex => SourceEncoding::Hex,
        };

        Config {
            loader: LoaderConfig {
                salt: Source::new(self.salt_env, SALT_LIMIT),
                info: Source::new(self.info_env, INFO_LIMIT),
                ikm: Source::new(self.ikm_env, IKM_LIMIT),
                pepper: Source::new(self.pepper_env, PEPPER_LIMIT),
                encoding,
                deadline: self.timeout_ms.map(Duration::from_millis),
            },
            key_length: usize::from(self.key_length),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // stdout carries the fingerprint only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(std::io::stderr().is_terminal()))
        .with(filter)
        .init();

    let config = args.into_config();

    let result = derive_fingerprint(&SystemEnv::new(), &config)
        .await
        .and_then(|fingerprint| write_fingerprint(&mut std::io::stdout().lock(), &fingerprint));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        },
    }
}

/// Print the failure to stderr whatever the log filter allows, and trace it.
fn report(err: &GenkeyError) {
    tracing::debug!(error = ?err, "run failed");

    // Nothing is left to report a failed stderr write to
    let _ = writeln!(std::io::stderr().lock(), "genkey: {err}");
}
