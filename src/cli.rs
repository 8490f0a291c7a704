// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Restrict to one month")
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm; without it the change is only previewed")
}

fn sale_cmd() -> Command {
    Command::new("sale")
        .about("Record, search and delete sales")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record one sale per selected product type")
                .arg(Arg::new("employee").long("employee").short('e').required(true))
                .arg(Arg::new("client").long("client").short('c').required(true))
                .arg(
                    Arg::new("reservation")
                        .long("reservation")
                        .short('r')
                        .required(true),
                )
                .arg(
                    Arg::new("product")
                        .long("product")
                        .short('p')
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Product type; repeat for several"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List recorded sales")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Match employee, client or reservation (case-insensitive)"),
                )
                .arg(Arg::new("employee").long("employee").short('e'))
                .arg(month_arg())
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["entry", "newest", "oldest"])
                        .default_value("newest"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete sales by id")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .action(ArgAction::Append)
                        .required(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete every sale")
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Tell whether a reservation number is already used")
                .arg(
                    Arg::new("reservation")
                        .long("reservation")
                        .short('r')
                        .required(true),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries over recorded sales")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("crosstab")
                .about("Sales per employee and product type, with totals")
                .arg(month_arg()),
        ))
        .subcommand(json_args(
            Command::new("employees")
                .about("Sales, goal attainment and commission per employee")
                .arg(month_arg().help("Month to report (default: current month)")),
        ))
        .subcommand(json_args(
            Command::new("months").about("Sales per month"),
        ))
        .subcommand(json_args(
            Command::new("activity")
                .about("Today, this week, top employee and most sold product")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Reference day (default: today)"),
                )
                .arg(month_arg()),
        ))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Monthly sales goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .arg(Arg::new("employee").long("employee").short('e').required(true))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(json_args(Command::new("list")))
}

fn commission_cmd() -> Command {
    Command::new("commission")
        .about("Commission paid per product sold")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .arg(Arg::new("product").long("product").short('p').required(true))
                .arg(Arg::new("rate").long("rate").required(true)),
        )
        .subcommand(json_args(Command::new("list")))
}

fn catalog_cmd() -> Command {
    Command::new("catalog")
        .about("Team members and product types")
        .subcommand_required(true)
        .subcommand(json_args(Command::new("list")))
        .subcommand(Command::new("add-employee").arg(Arg::new("name").required(true)))
        .subcommand(Command::new("add-product").arg(Arg::new("name").required(true)))
}

fn file_cmd(name: &'static str, about: &'static str, flag: &'static str) -> Command {
    let file = |sub: &'static str, help: &'static str| {
        Command::new(sub)
            .about(help)
            .arg(Arg::new(flag).long(flag).required(true))
    };
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(file("full", "Session snapshot (JSON)"))
        .subcommand(file("csv", "One row per sale (CSV)"))
}

pub fn build_cli() -> Command {
    Command::new("salestrack")
        .version(clap::crate_version!())
        .about("Insurance add-on sales tracking: entry, monthly reports, export")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("PATH")
                .help("Session file (default: $SALESTRACK_DATA or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the session file"))
        .subcommand(sale_cmd())
        .subcommand(report_cmd())
        .subcommand(goal_cmd())
        .subcommand(commission_cmd())
        .subcommand(catalog_cmd())
        .subcommand(
            file_cmd("export", "Write sales to a file", "out").subcommand(
                Command::new("xlsx")
                    .about("Spreadsheet with Sales, Summary and Employees sheets")
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(file_cmd(
            "import",
            "Replace the session or the sales from a file",
            "path",
        ))
        .subcommand(Command::new("doctor").about("Look for inconsistent records"))
}
