mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "simbridge", version, about = "Simulated-device process bridge")]
struct Cli {
    /// Output format for diagnostic subcommands.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);

    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_descriptor_overrides() {
        let cli = Cli::try_parse_from([
            "simbridge",
            "run",
            "--command-fd",
            "0",
            "--output-fd",
            "1",
            "--echo",
        ])
        .expect("run args should parse");

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.command_fd, 0);
                assert_eq!(args.output_fd, 1);
                assert!(args.echo);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn run_defaults_to_well_known_descriptors() {
        let cli = Cli::try_parse_from(["simbridge", "run"]).expect("bare run should parse");

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.command_fd, simbridge_transport::COMMAND_FD);
                assert_eq!(args.output_fd, simbridge_transport::OUTPUT_FD);
                assert!(!args.echo);
                assert!(args.keepalive_ms.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_doctor_subcommand() {
        let cli = Cli::try_parse_from(["simbridge", "--format", "json", "doctor"])
            .expect("doctor args should parse");
        assert!(matches!(cli.command, Command::Doctor(_)));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["simbridge", "serve"]).is_err());
    }
}
