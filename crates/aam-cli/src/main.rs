// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::process::ExitCode;

use aam_cli::commands::install_addon::{self, InstallAddonArgs};
use aam_cli::commands::install_policy::{self, InstallPolicyArgs};
use aam_cli::{Completion, Reporter, TerminalReporter};
use aam_cli_config::{load_config_with_cli, CliOverrides, LogFormat, LogLevel, LoggingConfig};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// aam - install Advanced Access Manager add-ons and access policies
#[derive(Parser, Debug)]
#[command(name = "aam", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long, global = true)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long, global = true)]
	json_logs: bool,

	/// URL of the managed site, sent as the request origin
	#[arg(long, global = true)]
	site_url: Option<String>,

	/// Directory holding the site's data
	#[arg(long, global = true)]
	data_dir: Option<PathBuf>,

	/// Directory add-ons are extracted into
	#[arg(long, global = true)]
	plugin_dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Download an add-on package and extract it into the plugin directory
	#[command(visible_alias = "addon-install")]
	InstallAddon(InstallAddonArgs),

	/// Fetch a policy from the hub and attach it to users, roles, visitors or everybody
	#[command(visible_alias = "policy-install")]
	InstallPolicy(InstallPolicyArgs),

	/// Show version information
	Version,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			config_file: args.config.clone(),
			log_level: args.log_level.clone(),
			log_format: if args.json_logs {
				Some("json".to_string())
			} else {
				None
			},
			site_url: args.site_url.clone(),
			data_dir: args.data_dir.clone(),
			plugin_dir: args.plugin_dir.clone(),
		}
	}
}

fn log_level_directive(level: LogLevel) -> &'static str {
	match level {
		LogLevel::Trace => "trace",
		LogLevel::Debug => "debug",
		LogLevel::Info => "info",
		LogLevel::Warn => "warn",
		LogLevel::Error => "error",
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("aam={}", log_level_directive(logging.level))));

	// stdout carries status lines only
	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn format_version_info() -> String {
	format!(
		"aam {} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let args = Args::parse();
	let mut reporter = TerminalReporter::new();

	let config = match load_config_with_cli(CliOverrides::from(&args)) {
		Ok(config) => config,
		Err(e) => {
			reporter.error(&format!("failed to load configuration: {e}"));
			return ExitCode::FAILURE;
		}
	};

	init_tracing(&config.logging);
	debug!(
		api_endpoint = %config.hub.api_endpoint,
		site_url = %config.site.url,
		data_dir = %config.site.data_dir.display(),
		"configuration loaded"
	);

	let result = match args.command {
		Command::InstallAddon(args) => install_addon::run(args, &config, &mut reporter).await,
		Command::InstallPolicy(args) => install_policy::run(args, &config, &mut reporter).await,
		Command::Version => {
			println!("{}", format_version_info());
			Ok(Completion::Clean)
		}
	};

	match result {
		Ok(completion) => completion.exit_code(),
		Err(e) => {
			error!(error = %format!("{e:#}"), "command failed");
			reporter.error(&e.to_string());
			ExitCode::FAILURE
		}
	}
}
