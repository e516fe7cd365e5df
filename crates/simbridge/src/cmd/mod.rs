use std::os::fd::RawFd;

use clap::{Args, Subcommand};
use simbridge_transport::{COMMAND_FD, OUTPUT_FD};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bridge the simulated device to the parent process until it dies.
    Run(RunArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Check this process environment for bridge prerequisites.
    Doctor(DoctorArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Inherited descriptor carrying command frames from the parent.
    #[arg(long, value_name = "FD", default_value_t = COMMAND_FD)]
    pub command_fd: RawFd,

    /// Inherited descriptor carrying output frames to the parent.
    #[arg(long, value_name = "FD", default_value_t = OUTPUT_FD)]
    pub output_fd: RawFd,

    /// Echo accepted commands back as device output.
    #[arg(long)]
    pub echo: bool,

    /// Keep-alive interval of the simulated device, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub keepalive_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Descriptor expected to carry command frames.
    #[arg(long, value_name = "FD", default_value_t = COMMAND_FD)]
    pub command_fd: RawFd,

    /// Descriptor expected to carry output frames.
    #[arg(long, value_name = "FD", default_value_t = OUTPUT_FD)]
    pub output_fd: RawFd,
}
