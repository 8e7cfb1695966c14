//! Configuration types and CLI options.
//!
//! This module defines the per-run verification settings and the enums and
//! structs used for command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DNS_TIMEOUT, DEFAULT_HTTP_TIMEOUT, DEFAULT_OUTFILE, DEFAULT_TLS_TIMEOUT,
    DEFAULT_USER_AGENT, WORKERS_PER_CPU,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Immutable per-run verification settings.
///
/// Zero timeouts and an empty user agent mean "use the default"; see
/// [`VerifyConfig::normalized`]. The verifier always works on a normalized copy,
/// so a caller's value is never modified.
///
/// # Examples
///
/// ```
/// use squat_verify::VerifyConfig;
/// use std::time::Duration;
///
/// let cfg = VerifyConfig {
///     do_http: true,
///     follow_redirects: true,
///     dns_timeout: Duration::ZERO,
///     ..Default::default()
/// }
/// .normalized();
/// assert_eq!(cfg.dns_timeout, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Deadline for the whole DNS stage (all record types)
    pub dns_timeout: Duration,
    /// Deadline for the TLS stage (TCP dial)
    pub tls_timeout: Duration,
    /// Deadline for the HTTP stage, also applied per request
    pub http_timeout: Duration,
    /// Collect TLS certificate metadata for resolvable hosts
    pub do_tls: bool,
    /// Issue HEAD probes for resolvable hosts
    pub do_http: bool,
    /// Follow up to ten redirects instead of stopping at the first response
    pub follow_redirects: bool,
    /// User-Agent header sent with every HEAD request
    pub user_agent: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            tls_timeout: DEFAULT_TLS_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            do_tls: true,
            do_http: false,
            follow_redirects: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl VerifyConfig {
    /// Returns a copy with every unset value replaced by its default.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.dns_timeout.is_zero() {
            cfg.dns_timeout = DEFAULT_DNS_TIMEOUT;
        }
        if cfg.tls_timeout.is_zero() {
            cfg.tls_timeout = DEFAULT_TLS_TIMEOUT;
        }
        if cfg.http_timeout.is_zero() {
            cfg.http_timeout = DEFAULT_HTTP_TIMEOUT;
        }
        if cfg.user_agent.trim().is_empty() {
            cfg.user_agent = DEFAULT_USER_AGENT.to_string();
        }
        cfg
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Verify the base label of example.com against .com and .net
/// squat_verify --domain example.com --tlds com,net
///
/// # Read candidate labels from a file, probe HTTP and follow redirects
/// squat_verify --domain example.com --input candidates.txt --http --follow
///
/// # Candidates from stdin, TLS probing disabled
/// generator | squat_verify --domain example.com --input - --tls=false
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "squat_verify",
    about = "Checks typosquat candidate domains for DNS, TLS and HTTP signs of life."
)]
pub struct Opt {
    /// Base domain, e.g. example.com
    #[arg(long)]
    pub domain: String,

    /// File with candidate labels, one per line ("-" reads stdin).
    /// Defaults to the base label of --domain.
    #[arg(long, value_parser)]
    pub input: Option<PathBuf>,

    /// Comma-separated TLD variants, e.g. com,net,org,co,io
    /// (empty: use the TLD of --domain)
    #[arg(long, default_value = "com")]
    pub tlds: String,

    /// Concurrent verification workers (default: 4 per CPU)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Attempt TLS metadata fetch on :443
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = true, default_missing_value = "true")]
    pub tls: bool,

    /// Attempt HTTP(S) HEAD request
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub http: bool,

    /// Follow HTTP redirects (up to 10 hops)
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true")]
    pub follow: bool,

    /// Cap on the number of candidate labels processed (0 = no cap)
    #[arg(long, default_value_t = 0)]
    pub max: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output file for the JSON results array
    #[arg(long, value_parser, default_value = DEFAULT_OUTFILE)]
    pub outfile: PathBuf,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Opt {
    /// Builds the verification settings selected on the command line.
    pub fn verify_config(&self) -> VerifyConfig {
        VerifyConfig {
            do_tls: self.tls,
            do_http: self.http,
            follow_redirects: self.follow,
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }

    /// Number of workers to spawn, never zero.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => default_worker_count(),
        }
    }
}

/// Default pool size: four workers per available CPU.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * WORKERS_PER_CPU
}
