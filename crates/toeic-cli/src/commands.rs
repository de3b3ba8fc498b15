//! CLI command implementations

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use toeic_core::config::config_path as resolve_config_path;
use toeic_core::{
    CardStatus, Config, Countdown, Dashboard, ErrorType, JsonFileRepository, NewBugLog, NewCard,
    NewTestResult, Section, Store, TaskPhase, import,
};

/// Resolved config and locations shared by every command
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub json: bool,
}

impl Context {
    pub fn load(data_dir: Option<PathBuf>, json: bool) -> Result<Self> {
        let config_path = resolve_config_path(data_dir.as_deref())?;
        let config = Config::load(&config_path)?;
        let data_dir = config.resolve_data_dir(data_dir.as_deref())?;

        if !config.display.colors {
            colored::control::set_override(false);
        }
        tracing::debug!(
            "Using data dir {} (config {})",
            data_dir.display(),
            config_path.display()
        );

        Ok(Self {
            config,
            config_path,
            data_dir,
            json,
        })
    }

    pub fn store(&self) -> Store<JsonFileRepository> {
        Store::open_in(&self.data_dir, &self.config)
    }

    /// Format with the configured pattern, falling back to ISO on a bad pattern
    fn date(&self, date: &DateTime<Utc>) -> String {
        use std::fmt::Write as _;
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.config.display.date_format)) {
            Ok(()) => out,
            Err(_) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub fn dashboard(ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let dash = Dashboard::from_state(store.state(), Local::now().date_naive());

    if ctx.json {
        return print_json(&dash);
    }

    println!("{}", "Dashboard".bold());
    println!();
    println!("Goal:          {}", dash.goal);
    let progress = if dash.goal_reached() {
        "Goal reached!".green()
    } else {
        format!("{} points to go", dash.score_gap).yellow()
    };
    println!("Latest score:  {} ({})", dash.latest_score, progress);
    match (dash.exam_date, dash.days_left) {
        (Some(date), Some(days)) if days >= 0 => {
            println!("Exam:          {} ({} days left)", date, days)
        }
        (Some(date), _) => println!("Exam:          {} (passed)", date),
        _ => println!("Exam:          {}", "not set".dimmed()),
    }
    let bugs = dash.pending_bugs.to_string();
    let bugs = if dash.pending_bugs > 0 { bugs.red() } else { bugs.green() };
    println!("Pending bugs:  {}", bugs);

    println!();
    println!("{}", "Tasks".bold());
    for phase in &dash.phases {
        println!("  {:<10} {}/{}", phase.phase, phase.completed, phase.total);
    }

    if !dash.decks.is_empty() {
        println!();
        println!("{}", "Decks".bold());
        for deck in &dash.decks {
            println!(
                "  {} {} ({}/{} mastered)",
                deck.id.cyan(),
                deck.name,
                deck.mastered,
                deck.total
            );
        }
    }

    Ok(())
}

pub fn goal(ctx: &Context, score: Option<u16>) -> Result<()> {
    let mut store = ctx.store();
    if let Some(score) = score {
        store.mutate(|s| {
            s.set_goal(score);
            Ok(())
        })?;
    }
    let goal = store.state().goal;

    if ctx.json {
        print_json(&serde_json::json!({ "goal": goal }))
    } else {
        if score.is_some() {
            println!("{} Goal set to {}", "✓".green(), goal);
        } else {
            println!("Goal: {}", goal);
        }
        Ok(())
    }
}

pub fn exam_date(ctx: &Context, date: Option<String>, clear: bool) -> Result<()> {
    let mut store = ctx.store();
    let changed = clear || date.is_some();
    if changed {
        let date = date.as_deref().map(parse_date).transpose()?;
        store.mutate(|s| {
            s.set_exam_date(date);
            Ok(())
        })?;
    }
    let exam_date = store.state().exam_date;

    if ctx.json {
        return print_json(&serde_json::json!({ "examDate": exam_date }));
    }
    match (exam_date, changed) {
        (Some(d), true) => println!("{} Exam date set to {}", "✓".green(), d),
        (None, true) => println!("{} Exam date cleared", "✓".green()),
        (Some(d), false) => println!("Exam date: {}", d),
        (None, false) => println!("Exam date: {}", "not set".dimmed()),
    }
    Ok(())
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Title")]
    title: String,
}

pub fn task_add(ctx: &Context, title: &str, phase: &str) -> Result<()> {
    let phase: TaskPhase = phase.parse()?;
    let mut store = ctx.store();
    let task = store.mutate(|s| Ok(s.add_task(title.to_string(), phase).clone()))?;

    if ctx.json {
        print_json(&task)
    } else {
        println!("{} Added task: {}", "✓".green(), task.id);
        println!("  {} ({})", task.title, task.phase);
        Ok(())
    }
}

pub fn task_list(ctx: &Context, phase: Option<String>, pending: bool) -> Result<()> {
    let phase: Option<TaskPhase> = phase.map(|p| p.parse()).transpose()?;
    let store = ctx.store();
    let tasks: Vec<_> = store
        .state()
        .tasks
        .iter()
        .filter(|t| phase.is_none_or(|p| t.phase == p))
        .filter(|t| !pending || !t.completed)
        .collect();

    if ctx.json {
        return print_json(&tasks);
    }
    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }
    let rows = tasks
        .into_iter()
        .map(|t| TaskRow {
            id: t.id.clone(),
            done: if t.completed { "x".to_string() } else { String::new() },
            phase: t.phase.to_string(),
            title: t.title.clone(),
        })
        .collect();
    print_table::<TaskRow>(rows);
    Ok(())
}

pub fn task_toggle(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let task = store.mutate(|s| s.toggle_task(id).cloned())?;

    if ctx.json {
        print_json(&task)
    } else {
        let state = if task.completed { "done" } else { "not done" };
        println!("{} Marked {} as {}", "✓".green(), task.id, state);
        Ok(())
    }
}

pub fn task_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let task = store.mutate(|s| s.delete_task(id))?;

    if ctx.json {
        print_json(&task)
    } else {
        println!("{} Deleted task: {}", "✓".green(), task.title);
        Ok(())
    }
}

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Test")]
    test: String,
    #[tabled(rename = "Listening")]
    listening: u16,
    #[tabled(rename = "Reading")]
    reading: u16,
    #[tabled(rename = "Total")]
    total: u16,
}

pub fn score_add(
    ctx: &Context,
    name: &str,
    listening: u16,
    reading: u16,
    date: Option<String>,
) -> Result<()> {
    let date = match date {
        Some(d) => parse_date(&d)?.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };
    let mut store = ctx.store();
    let result = store.mutate(|s| {
        let result = s.add_result(NewTestResult {
            date,
            test_name: name.to_string(),
            listening_score: listening,
            reading_score: reading,
        });
        Ok(result.clone())
    })?;

    if ctx.json {
        print_json(&result)
    } else {
        println!("{} Recorded score: {}", "✓".green(), result.id);
        println!(
            "  {}: {} (L{} + R{})",
            result.test_name,
            result.total_score.to_string().bold(),
            result.listening_score,
            result.reading_score
        );
        Ok(())
    }
}

pub fn score_list(ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let results = &store.state().results;

    if ctx.json {
        return print_json(results);
    }
    if results.is_empty() {
        println!("No scores recorded");
        return Ok(());
    }
    let rows = results
        .iter()
        .map(|r| ScoreRow {
            id: r.id.clone(),
            date: ctx.date(&r.date),
            test: r.test_name.clone(),
            listening: r.listening_score,
            reading: r.reading_score,
            total: r.total_score,
        })
        .collect();
    print_table::<ScoreRow>(rows);
    Ok(())
}

pub fn score_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let result = store.mutate(|s| s.delete_result(id))?;

    if ctx.json {
        print_json(&result)
    } else {
        println!("{} Deleted score: {}", "✓".green(), result.test_name);
        Ok(())
    }
}

#[derive(Tabled)]
struct BugRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Test")]
    test: String,
    #[tabled(rename = "Part")]
    part: u8,
    #[tabled(rename = "Q")]
    question: u16,
    #[tabled(rename = "Type")]
    error_type: String,
    #[tabled(rename = "Root cause")]
    cause: String,
    #[tabled(rename = "Fix")]
    fix: String,
    #[tabled(rename = "Reviewed")]
    reviewed: String,
}

pub fn bug_add(
    ctx: &Context,
    test: String,
    part: u8,
    question: u16,
    error_type: &str,
    cause: String,
    fix: String,
) -> Result<()> {
    let error_type: ErrorType = error_type.parse()?;
    let mut store = ctx.store();
    let bug = store.mutate(|s| {
        s.add_bug(NewBugLog {
            test_id: test,
            part,
            question_num: question,
            error_type,
            root_cause: cause,
            fix,
        })
        .cloned()
    })?;

    if ctx.json {
        print_json(&bug)
    } else {
        println!("{} Logged mistake: {}", "✓".green(), bug.id);
        println!("  Part {} Q{} ({})", bug.part, bug.question_num, bug.error_type);
        Ok(())
    }
}

pub fn bug_list(ctx: &Context, pending: bool) -> Result<()> {
    let store = ctx.store();
    let bugs: Vec<_> = store
        .state()
        .bugs
        .iter()
        .filter(|b| !pending || !b.reviewed)
        .collect();

    if ctx.json {
        return print_json(&bugs);
    }
    if bugs.is_empty() {
        println!("No mistakes logged");
        return Ok(());
    }
    let rows = bugs
        .into_iter()
        .map(|b| BugRow {
            id: b.id.clone(),
            test: b.test_id.clone(),
            part: b.part,
            question: b.question_num,
            error_type: b.error_type.to_string(),
            cause: b.root_cause.clone(),
            fix: b.fix.clone(),
            reviewed: if b.reviewed { "yes" } else { "no" }.to_string(),
        })
        .collect();
    print_table::<BugRow>(rows);
    Ok(())
}

pub fn bug_toggle(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let bug = store.mutate(|s| s.toggle_bug_review(id).cloned())?;

    if ctx.json {
        print_json(&bug)
    } else {
        let state = if bug.reviewed { "reviewed" } else { "pending" };
        println!("{} Marked {} as {}", "✓".green(), bug.id, state);
        Ok(())
    }
}

pub fn bug_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let bug = store.mutate(|s| s.delete_bug(id))?;

    if ctx.json {
        print_json(&bug)
    } else {
        println!("{} Deleted mistake: {}", "✓".green(), bug.id);
        Ok(())
    }
}

#[derive(Tabled)]
struct DeckRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Words")]
    words: usize,
    #[tabled(rename = "Mastered")]
    mastered: usize,
    #[tabled(rename = "To study")]
    remaining: usize,
}

pub fn deck_add(ctx: &Context, name: &str) -> Result<()> {
    let mut store = ctx.store();
    let deck = store.mutate(|s| Ok(s.add_deck(name.to_string()).clone()))?;

    if ctx.json {
        print_json(&deck)
    } else {
        println!("{} Created deck: {}", "✓".green(), deck.id);
        println!("  Name: {}", deck.name);
        Ok(())
    }
}

pub fn deck_list(ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let decks = &store.state().decks;

    if ctx.json {
        return print_json(decks);
    }
    if decks.is_empty() {
        println!("No decks found");
        return Ok(());
    }
    let rows = decks
        .iter()
        .map(|d| DeckRow {
            id: d.id.clone(),
            name: d.name.clone(),
            words: d.cards.len(),
            mastered: d.mastered_count(),
            remaining: d.remaining_count(),
        })
        .collect();
    print_table::<DeckRow>(rows);
    Ok(())
}

pub fn deck_show(ctx: &Context, id: &str, status: Option<String>) -> Result<()> {
    let status: Option<CardStatus> = status.map(|s| s.parse()).transpose()?;
    let store = ctx.store();
    let deck = store
        .state()
        .deck(id)
        .ok_or_else(|| toeic_core::Error::DeckNotFound(id.to_string()))?;
    let cards: Vec<_> = deck
        .cards
        .iter()
        .filter(|c| status.is_none_or(|s| c.status == s))
        .collect();

    if ctx.json {
        return print_json(&serde_json::json!({
            "id": deck.id,
            "name": deck.name,
            "image": deck.image,
            "cards": cards,
        }));
    }

    println!("{} {}", deck.id.cyan().bold(), deck.name.bold());
    println!(
        "{} mastered · {} words",
        deck.mastered_count(),
        deck.cards.len()
    );
    println!();
    if cards.is_empty() {
        println!("No cards found");
    }
    for card in cards {
        let status = match card.status {
            CardStatus::New => "new".white(),
            CardStatus::Learning => "learning".yellow(),
            CardStatus::Mastered => "mastered".green(),
        };
        let kind = if card.lexical_type.is_empty() {
            String::new()
        } else {
            format!(" ({})", card.lexical_type)
        };
        println!(
            "{} [{}] {}{} - {}",
            card.id.cyan(),
            status,
            card.term.bold(),
            kind,
            card.definition
        );
    }
    Ok(())
}

pub fn deck_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut store = ctx.store();
    let deck = store.mutate(|s| s.delete_deck(id))?;

    if ctx.json {
        print_json(&deck)
    } else {
        println!(
            "{} Deleted deck: {} ({} cards)",
            "✓".green(),
            deck.name,
            deck.cards.len()
        );
        Ok(())
    }
}

pub fn deck_import(ctx: &Context, name: &str, file: Option<PathBuf>) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Deck name must not be empty");
    }

    let text = match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    if text.trim().is_empty() {
        bail!("Nothing to import");
    }

    let cards = import::parse_cards(&text);
    let mut store = ctx.store();
    let deck = store.mutate(|s| Ok(s.import_deck(name.to_string(), cards).clone()))?;

    if ctx.json {
        print_json(&deck)
    } else {
        println!(
            "{} Imported {} cards into {}",
            "✓".green(),
            deck.cards.len(),
            deck.id
        );
        println!("  Name: {}", deck.name);
        Ok(())
    }
}

pub fn card_add(ctx: &Context, deck_id: &str, card: NewCard) -> Result<()> {
    let mut store = ctx.store();
    let card = store.mutate(|s| s.add_card_to_deck(deck_id, card).cloned())?;

    if ctx.json {
        print_json(&card)
    } else {
        println!("{} Added card: {}", "✓".green(), card.id);
        println!("  {} - {}", card.term, card.definition);
        Ok(())
    }
}

pub fn card_status(ctx: &Context, deck_id: &str, card_id: &str, status: &str) -> Result<()> {
    let status: CardStatus = status.parse()?;
    let mut store = ctx.store();
    let card = store.mutate(|s| s.update_card_status(deck_id, card_id, status).cloned())?;

    if ctx.json {
        print_json(&card)
    } else {
        println!("{} {} is now {}", "✓".green(), card.term, card.status);
        Ok(())
    }
}

pub fn mock(ctx: &Context, section: &str) -> Result<()> {
    let section: Section = section.parse()?;
    let mut timer = Countdown::new(section).with_warning(ctx.config.mock.warning_seconds);

    println!(
        "{} {} section, {}. Press Ctrl-C to stop.",
        "▶".green(),
        section,
        timer.display()
    );
    timer.start();

    let mut stdout = std::io::stdout();
    while timer.is_running() {
        std::thread::sleep(Duration::from_secs(1));
        timer.tick();
        let display = if timer.is_warning() {
            timer.display().red().bold()
        } else {
            timer.display().normal()
        };
        write!(stdout, "\r{}  ", display)?;
        stdout.flush()?;
    }

    println!();
    println!("{} Time is up! Record your score with `toeic score add`", "✓".green());
    Ok(())
}

pub fn reset(ctx: &Context, yes: bool) -> Result<()> {
    if ctx.json && !yes {
        bail!("Refusing to prompt with --json, pass --yes to reset");
    }
    if !yes {
        print!("Replace all data with the defaults? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    let mut store = ctx.store();
    store.reset();

    if ctx.json {
        print_json(store.state())
    } else {
        println!("{} Data reset to defaults", "✓".green());
        Ok(())
    }
}

/// Show current configuration
pub fn config_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.json {
        return print_json(config);
    }

    println!("{}", "Current configuration:".bold());
    println!();
    match &config.data_dir {
        Some(dir) => println!("data_dir = \"{}\"", dir.display()),
        None => println!("# data_dir = \"{}\"", ctx.data_dir.display()),
    }
    if let Some(ref seed) = config.seed_path {
        println!("seed_path = \"{}\"", seed.display());
    }
    println!("default_goal = {}", config.default_goal);
    println!();
    println!("[mock]");
    println!("warning_seconds = {}", config.mock.warning_seconds);
    println!();
    println!("[display]");
    println!("colors = {}", config.display.colors);
    println!("date_format = \"{}\"", config.display.date_format);
    Ok(())
}

pub fn config_path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}

/// Reset configuration to defaults
pub fn config_reset(ctx: &Context) -> Result<()> {
    if let Some(parent) = ctx.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&ctx.config_path, Config::default_with_comments())?;

    println!("{} Configuration reset to defaults", "✓".green());
    Ok(())
}

/// Set a config value and write the file back
pub fn config_set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    config.save(&ctx.config_path)?;

    println!("{} Set {} = {}", "✓".green(), key, value);
    Ok(())
}
