// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const PERIODS: [&str; 6] = ["week", "month", "quarter", "year", "all", "custom"];
const KINDS: [&str; 2] = ["expense", "income"];

fn with_output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn with_period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .value_parser(PERIODS)
            .default_value("month")
            .help("Time window of the view"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("First day of a custom period"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Last day of a custom period (inclusive)"),
    )
    .arg(
        Arg::new("as_of")
            .long("as-of")
            .value_name("YYYY-MM-DD")
            .help("Compute as if today were this day"),
    )
}

fn kind_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(KINDS)
        .required(required)
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Show or change settings")
        .subcommand(Command::new("show").about("Show effective settings"))
        .subcommand(
            Command::new("set-user")
                .about("Switch the user whose data is used")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("set-currency")
                .about("Set the display currency code")
                .arg(Arg::new("code").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(kind_arg(true))
                .arg(Arg::new("color").long("color").value_name("#RRGGBB")),
        )
        .subcommand(with_output_flags(Command::new("list").arg(kind_arg(false))))
        .subcommand(
            Command::new("color")
                .about("Change a category's color")
                .arg(Arg::new("id").long("id").required(true))
                .arg(Arg::new("color").long("color").required(true)),
        )
        .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .arg(kind_arg(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category id or name"),
                )
                .arg(Arg::new("date").long("date").help("Defaults to now"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(with_output_flags(with_period_args(
            Command::new("list")
                .arg(kind_arg(false))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of a transaction")
                .arg(Arg::new("id").long("id").required(true))
                .arg(kind_arg(false))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("rm").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .num_args(1..)
                    .action(ArgAction::Append),
            ),
        )
}

fn stats_cmd() -> Command {
    let sub = |name: &'static str, about: &'static str| {
        with_output_flags(with_period_args(Command::new(name).about(about)))
    };
    Command::new("stats")
        .about("Period statistics")
        .subcommand(sub("summary", "Totals and balance"))
        .subcommand(sub("categories", "Breakdown by category").arg(kind_arg(false)))
        .subcommand(sub("timeline", "Income and expense per day or month"))
        .subcommand(
            sub("top", "Largest categories").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .default_value("3"),
            ),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(with_period_args(
        Command::new("transactions")
            .arg(
                Arg::new("format")
                    .long("format")
                    .value_parser(["csv", "json"])
                    .default_value("csv"),
            )
            .arg(Arg::new("out").long("out").required(true)),
    ))
}

pub fn build_cli() -> Command {
    Command::new("pocketstats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track income and expenses and see where the money goes")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User whose data to use (overrides the configured one)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(config_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(stats_cmd())
        .subcommand(export_cmd())
}
