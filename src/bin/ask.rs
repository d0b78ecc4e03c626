use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::json;

use odi_terminal::config::AppConfig;
use odi_terminal::dataset::{self, Dataset};
use odi_terminal::leaderboard::{self, RoleChoice};
use odi_terminal::player_detail;
use odi_terminal::query::{self, QueryResult};

const USAGE: &str = "usage: odi_ask [--data <csv>] [--json] <query <text..> | top <role> [n] | player <name..> | roles <role>>";

struct Args {
    data: Option<PathBuf>,
    json: bool,
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let mut config = AppConfig::from_env();
    if let Some(path) = args.data {
        config.data_path = path;
    }

    let dataset = dataset::load(&config.data_path)
        .with_context(|| format!("unable to load player data from {}", config.data_path.display()))?;

    let Some((command, rest)) = args.command.split_first() else {
        bail!("{USAGE}");
    };
    match command.as_str() {
        "query" => run_query(&dataset, &rest.join(" "), args.json),
        "top" => run_top(&dataset, rest, config.leaderboard_size, args.json),
        "player" => run_player(&dataset, &rest.join(" "), &config, args.json),
        "roles" => run_roles(&dataset, rest, args.json),
        other => Err(anyhow!("unknown command '{other}'\n{USAGE}")),
    }
}

fn parse_args(raw: Vec<String>) -> Result<Args> {
    let mut data = None;
    let mut json = false;
    let mut command = Vec::new();
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        if !command.is_empty() {
            command.push(arg);
            continue;
        }
        if let Some(path) = arg.strip_prefix("--data=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                data = Some(PathBuf::from(trimmed));
            }
            continue;
        }
        match arg.as_str() {
            "--data" => {
                let next = iter.next().context("--data needs a path")?;
                data = Some(PathBuf::from(next));
            }
            "--json" => json = true,
            "-h" | "--help" => bail!("{USAGE}"),
            _ => command.push(arg),
        }
    }
    Ok(Args {
        data,
        json,
        command,
    })
}

fn run_query(dataset: &Dataset, text: &str, as_json: bool) -> Result<()> {
    let result = query::handle_query(dataset, text);
    let banner = query::describe(&result);
    if as_json {
        let rows = match &result {
            QueryResult::Leader { player, .. } => vec![*player],
            QueryResult::Ranking { rows, .. } => rows.clone(),
            QueryResult::NoData { .. } | QueryResult::Unhandled => Vec::new(),
        };
        let out = json!({
            "intent": result.intent(),
            "banner": banner,
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", banner.title);
        for line in &banner.lines {
            println!("{line}");
        }
    }
    if !result.is_handled() {
        bail!("query not understood: '{text}'");
    }
    Ok(())
}

fn run_top(dataset: &Dataset, rest: &[String], default_n: usize, as_json: bool) -> Result<()> {
    let role: RoleChoice = rest.first().context("top needs a role")?.parse()?;
    let n = match rest.get(1) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid count '{raw}'"))?,
        None => default_n,
    };
    let entries = leaderboard::top_players(dataset, role, n);
    let metric = role.metric();
    if as_json {
        let out = json!({
            "role": role,
            "metric": metric.label(),
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    println!("Top {n} {}s", role.label());
    if entries.is_empty() {
        println!("No players for this role");
    }
    for entry in &entries {
        println!("{}", leaderboard::format_entry(metric, entry));
    }
    Ok(())
}

fn run_player(dataset: &Dataset, name: &str, config: &AppConfig, as_json: bool) -> Result<()> {
    let mut rng = config.quote_rng();
    let detail = player_detail::get_player_detail(dataset, name, &mut rng)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }
    println!("{}", detail.heading());
    for (label, value) in detail.stat_lines() {
        println!("  {label}: {value}");
    }
    for pair in [&detail.batting, &detail.bowling] {
        println!(
            "{}: {} {} / {} {}",
            pair.title, pair.labels[0], pair.values[0], pair.labels[1], pair.values[1]
        );
    }
    match detail.results.shares() {
        Some([won, lost]) => println!(
            "{}: {} {won:.1}% / {} {lost:.1}%",
            detail.results.title, detail.results.labels[0], detail.results.labels[1]
        ),
        None => println!("{}: no matches recorded", detail.results.title),
    }
    println!("{}", detail.quote);
    Ok(())
}

fn run_roles(dataset: &Dataset, rest: &[String], as_json: bool) -> Result<()> {
    let role: RoleChoice = rest.first().context("roles needs a role")?.parse()?;
    let names = leaderboard::unique_names_for_role(dataset, role);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}
