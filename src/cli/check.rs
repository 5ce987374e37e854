use std::{
    future::Future,
    io::{IsTerminal, Write},
    sync::Arc,
    time::Duration,
};

use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    config, error, info,
    management::WatchlistManager,
    orchestrator::BatchOrchestrator,
    scraper::HttpGateway,
    success,
    types::{Entry, EntryTableRow, FreshnessStatus, GroupPreference, Lifecycle, Progress},
    utils, warning,
};

/// What the user asked for at the retry prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    RetryFailed,
    /// 1-based row number as printed in the results table.
    RetryRow(usize),
    Quit,
    Invalid(String),
}

pub fn parse_prompt(input: &str) -> PromptAction {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "r" | "retry" => PromptAction::RetryFailed,
        "" | "q" | "quit" | "exit" => PromptAction::Quit,
        other => match other.parse::<usize>() {
            Ok(row) if row > 0 => PromptAction::RetryRow(row),
            _ => PromptAction::Invalid(input.to_string()),
        },
    }
}

pub async fn check(
    urls: Vec<String>,
    preference: Option<GroupPreference>,
    save: bool,
    prompt: bool,
) {
    let Some(preference) = preference.or_else(config::preferred_group) else {
        warning!(
            "No scan group selected. Pass --group <NAME>, --any-group or set MANGAWATCH_GROUP."
        );
        return;
    };

    let ids = match resolve_ids(urls, save).await {
        Ok(ids) => ids,
        Err(e) => error!("Cannot load watchlist. Err: {}", e),
    };

    if ids.is_empty() {
        warning!("Nothing to check. Add series with `mangawatch list add <URL>`.");
        return;
    }

    let gateway = match HttpGateway::new(config::scraper_url(), config::request_timeout()) {
        Ok(gateway) => gateway,
        Err(e) => error!("Cannot create scraper client. Err: {}", e),
    };
    let orchestrator = BatchOrchestrator::new(Arc::new(gateway));

    info!(
        "Checking {count} series, preferred group: {preference}",
        count = ids.len(),
        preference = preference
    );

    let batch = orchestrator.run_all(ids, preference);
    if with_progress(&orchestrator, batch).await.is_none() {
        warning!("Nothing was checked.");
        return;
    }

    print_results(&orchestrator);

    if prompt && std::io::stdin().is_terminal() {
        retry_prompt(&orchestrator).await;
    }
}

async fn resolve_ids(urls: Vec<String>, save: bool) -> crate::Res<Vec<String>> {
    if urls.is_empty() {
        let watchlist = WatchlistManager::at_default_location().load().await?;
        return Ok(watchlist.urls().to_vec());
    }

    let ids = utils::dedup_ids(urls);
    if save {
        let mut watchlist = WatchlistManager::at_default_location();
        watchlist.replace(ids.clone());
        watchlist.persist().await?;
        success!("Saved {} series to the watchlist.", ids.len());
    }
    Ok(ids)
}

async fn with_progress<F>(orchestrator: &BatchOrchestrator, batch: F) -> Option<Progress>
where
    F: Future<Output = Option<Progress>>,
{
    let mut updates = orchestrator.subscribe();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("scraping...");
    pb.enable_steady_tick(Duration::from_millis(100));

    tokio::pin!(batch);
    let outcome = loop {
        tokio::select! {
            outcome = &mut batch => break outcome,
            Ok(()) = updates.changed() => {
                let progress = *updates.borrow_and_update();
                pb.set_length(progress.total as u64);
                pb.set_position(progress.completed as u64);
            }
        }
    };

    pb.finish_and_clear();
    outcome
}

fn print_results(orchestrator: &BatchOrchestrator) {
    let today = Local::now().date_naive();
    let classified = orchestrator.classified(today);

    let rows: Vec<EntryTableRow> = classified
        .iter()
        .enumerate()
        .map(|(i, (entry, status))| table_row(i + 1, entry, *status))
        .collect();
    println!("{}", Table::new(rows));

    let count = |wanted: FreshnessStatus| {
        classified
            .iter()
            .filter(|(entry, status)| entry.snapshot().is_some() && *status == wanted)
            .count()
    };
    let failed = classified.iter().filter(|(entry, _)| entry.is_failed()).count();

    let summary = FreshnessStatus::ALL
        .iter()
        .map(|s| format!("{} {}", count(*s), s.colored()))
        .collect::<Vec<_>>()
        .join(", ");
    info!("{}, {} {}", summary, failed, "failed".red());
}

fn table_row(index: usize, entry: &Entry, status: FreshnessStatus) -> EntryTableRow {
    match &entry.lifecycle {
        Lifecycle::Success(snapshot) => EntryTableRow {
            index,
            status: status.colored().to_string(),
            title: utils::truncate(&snapshot.title, 40),
            latest: utils::truncate(&snapshot.latest_chapter_label, 40),
            groups: snapshot
                .publications
                .iter()
                .map(|p| {
                    format!(
                        "{group} ({date})",
                        group = p.group,
                        date = p.date.as_deref().unwrap_or("n/a")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            cover: snapshot.cover_label().to_string(),
            link: snapshot.source_url.clone(),
        },
        Lifecycle::Failed(message) => EntryTableRow {
            index,
            status: "error".red().bold().to_string(),
            title: utils::truncate(&entry.id, 40),
            latest: message.clone(),
            groups: String::new(),
            cover: "-".to_string(),
            link: entry.id.clone(),
        },
        Lifecycle::Pending | Lifecycle::Loading => EntryTableRow {
            index,
            status: entry.lifecycle.label().dimmed().to_string(),
            title: utils::truncate(&entry.id, 40),
            latest: String::new(),
            groups: String::new(),
            cover: "-".to_string(),
            link: entry.id.clone(),
        },
    }
}

async fn retry_prompt(orchestrator: &BatchOrchestrator) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let failed = orchestrator.store().failed_ids().len();
        if failed == 0 {
            success!("Every series was checked.");
            return;
        }

        warning!(
            "{} series failed. [r] retry errors, [#] retry one row, [q] quit",
            failed
        );
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => return,
        };

        match parse_prompt(&line) {
            PromptAction::Quit => return,
            PromptAction::RetryFailed => {
                let batch = orchestrator.retry_failed();
                if with_progress(orchestrator, batch).await.is_none() {
                    warning!("Nothing to retry.");
                }
            }
            PromptAction::RetryRow(row) => {
                let Some(entry) = orchestrator.entries().into_iter().nth(row - 1) else {
                    warning!("There is no row {}.", row);
                    continue;
                };
                retry_row(orchestrator, &entry.id).await;
            }
            PromptAction::Invalid(input) => {
                warning!("Unknown answer '{}'.", input);
                continue;
            }
        }

        print_results(orchestrator);
    }
}

async fn retry_row(orchestrator: &BatchOrchestrator, id: &str) {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Checking {} again...", id));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    orchestrator.retry_one(id).await;
    pb.finish_and_clear();
}
