use std::fs;
use std::io::{BufRead, Write};

use serde_json::Value;

use crate::cli::{Cli, Commands, StatsCommand};
use crate::client;
use crate::config::DEFAULT_DOMAIN;
use crate::core::{DateFilter, StatsOptions, default_categories};
use crate::error::AppError;
use crate::output::{
    TableOptions, output_audits_json, output_progress_json, output_skills_json,
    output_summary_json, output_xp_json, print_audits, print_progress, print_skills,
    print_summary, print_xp,
};
use crate::source;
use crate::utils::{Timezone, parse_date};

pub(crate) fn run(cli: Cli) -> Result<(), AppError> {
    match &cli.command {
        Some(Commands::Login { user, password }) => {
            handle_login(&cli, user.clone(), password.clone())
        }
        Some(Commands::Fetch) => handle_fetch(&cli),
        _ => {
            let command = StatsCommand::from_cli(&cli.command).unwrap_or(StatsCommand::Summary);
            handle_stats(&cli, command)
        }
    }
}

fn resolve_domain(cli: &Cli) -> &str {
    cli.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
}

/// Either an already-fetched response file or a live API call. The
/// aggregation core only ever sees the resulting value.
fn load_raw(cli: &Cli) -> Result<Value, AppError> {
    if let Some(path) = &cli.input {
        let content = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }
    let token = client::load_token().ok_or(AppError::MissingToken)?;
    client::fetch_profile(resolve_domain(cli), &token)
}

fn handle_stats(cli: &Cli, command: StatsCommand) -> Result<(), AppError> {
    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let until = cli.until.as_deref().map(parse_date).transpose()?;
    let filter = DateFilter::new(since, until);
    let timezone = Timezone::parse(cli.timezone.as_deref())?;

    let raw = load_raw(cli)?;
    let options = StatsOptions {
        categories: default_categories(),
        top_skills: cli.top_skills(),
        progress_limit: cli.limit,
        audit_preference: cli.audit_preference(),
    };
    let stats = source::load_statistics(&raw, &options, &filter, timezone)?;

    let table_options = TableOptions {
        use_color: cli.use_color(),
        timezone,
    };

    if cli.json {
        let json = match command {
            StatsCommand::Summary => output_summary_json(&stats),
            StatsCommand::Xp => output_xp_json(&stats),
            StatsCommand::Audits => output_audits_json(&stats),
            StatsCommand::Skills => output_skills_json(&stats),
            StatsCommand::Progress => output_progress_json(&stats),
        };
        println!("{json}");
    } else {
        match command {
            StatsCommand::Summary => print_summary(&stats, table_options),
            StatsCommand::Xp => print_xp(&stats, table_options),
            StatsCommand::Audits => print_audits(&stats, table_options),
            StatsCommand::Skills => print_skills(&stats, table_options),
            StatsCommand::Progress => print_progress(&stats, table_options),
        }
    }
    Ok(())
}

fn handle_login(
    cli: &Cli,
    user: Option<String>,
    password: Option<String>,
) -> Result<(), AppError> {
    let user = match user {
        Some(user) => user,
        None => prompt("Username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    let token = client::signin(resolve_domain(cli), user.trim(), &password)?;
    let path = client::store_token(&token)?;
    println!("Signed in. Token stored at {}", path.display());
    Ok(())
}

fn handle_fetch(cli: &Cli) -> Result<(), AppError> {
    let raw = load_raw(cli)?;
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}

fn prompt(label: &str) -> Result<String, AppError> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
