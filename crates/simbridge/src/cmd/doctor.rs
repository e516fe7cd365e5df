use std::os::fd::RawFd;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use simbridge_supervisor::ParentWatchdog;
use simbridge_transport::descriptor_open;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        platform_check(),
        descriptor_check("command-descriptor", args.command_fd),
        descriptor_check("output-descriptor", args.output_fd),
        parent_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let report = DoctorReport {
        checks,
        overall: if has_fail { "fail" } else { "pass" },
    };

    print_report(&report, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn platform_check() -> CheckResult {
    let status = if cfg!(unix) {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    CheckResult {
        name: "platform",
        status,
        detail: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
    }
}

fn descriptor_check(name: &'static str, fd: RawFd) -> CheckResult {
    if descriptor_open(fd) {
        CheckResult {
            name,
            status: CheckStatus::Pass,
            detail: format!("descriptor {fd} is open"),
        }
    } else {
        CheckResult {
            name,
            status: CheckStatus::Fail,
            detail: format!("descriptor {fd} is not open in this process"),
        }
    }
}

fn parent_check() -> CheckResult {
    let watchdog = ParentWatchdog::capture();
    CheckResult {
        name: "parent-process",
        status: CheckStatus::Info,
        detail: format!("would watch pid {}", watchdog.parent_pid()),
    }
}

fn print_report(report: &DoctorReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHECK", "STATUS", "DETAIL"]);
            for check in &report.checks {
                table.add_row(vec![
                    check.name.to_string(),
                    format!("{:?}", check.status).to_lowercase(),
                    check.detail.clone(),
                ]);
            }
            println!("{table}");
            println!("overall: {}", report.overall);
        }
    }
}
