// src/lib.rs
pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::application::{
    CatalogSource, MissionStatsService, QuestionSource, QuizLoader, SearchController,
};
use crate::cli::args::{Args, Command, SearchFilters};
use crate::config::Config;
use crate::constants::{FRAME_INTERVAL_MS, QUIZ_LOAD_ERROR_MESSAGE};
use crate::domain::{DomainError, MissionStats, PagerAction, QuizState, SearchForm};
use crate::infrastructure::{ApiClient, PageRenderer, QuizResource};
use crate::ports::{Document, PageController, PageSettings, TerminalPresenter};
use anyhow::{Context, Result};
use rand::Rng;
use std::collections::BTreeMap;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting exoseeker with arguments");

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        debug!(url, "API URL overridden from command line");
        config.api.base_url = url.clone();
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(execute(args.command, &config))
}

async fn execute(command: Command, config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api.base_url, config.api.timeout())?;
    info!(api = client.base_url(), "Using catalog API");

    match command {
        Command::Quiz { source, html } => handle_quiz_command(config, &client, source, html).await,
        Command::Search {
            filters,
            page,
            page_size,
            json,
            html,
            interactive,
        } => {
            let options = SearchOptions {
                json,
                html,
                interactive,
            };
            handle_search_command(config, client, &filters, page, page_size, options).await
        }
        Command::Stats { html } => handle_stats_command(config, client, html).await,
        Command::Missions { json } => handle_missions_command(client, json).await,
        Command::Item { id, json } => handle_item_command(client, id, json).await,
        Command::Page { output } => handle_page_command(config, client, output).await,
    }
}

/// Page controller over a fresh landing page.
pub fn new_page(config: &Config) -> Result<PageController> {
    let settings = PageSettings {
        counter_duration: config.counter.duration(),
        visibility_threshold: config.counter.threshold,
    };
    PageController::new(Document::landing_page(), settings).context("Failed to set up page")
}

fn quiz_loader(config: &Config, client: &ApiClient, source: Option<&str>) -> QuizLoader<QuizResource> {
    let location = source.unwrap_or(&config.quiz.source);
    QuizLoader::new(
        QuizResource::parse(location, client.http()),
        config.quiz.question_count,
    )
}

fn show_page(page: &PageController) -> Result<()> {
    let mut renderer = PageRenderer::new();
    let path = renderer.create_temp_file(&page.render_page())?;
    renderer.open_in_browser(&path)
}

async fn handle_quiz_command(
    config: &Config,
    client: &ApiClient,
    source: Option<String>,
    html: bool,
) -> Result<()> {
    let loader = quiz_loader(config, client, source.as_deref());
    let mut page = new_page(config)?;

    if html {
        load_quiz(&loader, &mut page, &mut rand::thread_rng()).await?;
        return show_page(&page);
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    play_quiz(&loader, &mut page, &mut rand::thread_rng(), &mut input, &mut out).await
}

/// Load a session into the page. A failed load leaves the error message in
/// the quiz container and yields `false`.
async fn load_quiz<S: QuestionSource, G: Rng>(
    loader: &QuizLoader<S>,
    page: &mut PageController,
    rng: &mut G,
) -> Result<bool> {
    match loader.load(rng).await {
        Ok(session) => {
            page.show_quiz(session)?;
            Ok(true)
        }
        Err(e) => {
            page.show_quiz_error(&e)?;
            Ok(false)
        }
    }
}

/// Interactive quiz: one prompt per question, then the final score.
///
/// Answering `y` to the refresh prompt reloads and reshuffles the questions.
/// End of input stops the quiz.
pub async fn play_quiz<S, G, R, W>(
    loader: &QuizLoader<S>,
    page: &mut PageController,
    rng: &mut G,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: QuestionSource,
    G: Rng,
    R: BufRead,
    W: Write,
{
    let presenter = TerminalPresenter::new();

    loop {
        if !load_quiz(loader, page, rng).await? {
            writeln!(out, "{QUIZ_LOAD_ERROR_MESSAGE}")?;
            return Ok(());
        }

        while let QuizState::Presenting(_) = page.quiz_state() {
            let session = page.quiz().context("Quiz session missing")?;
            write!(out, "{}", presenter.render_question(session))?;

            let Some(answer) = prompt(input, out, "Your answer: ")? else {
                return Ok(());
            };
            match answer.trim().parse::<usize>() {
                Ok(n) if n >= 1 => match page.select_answer(n - 1) {
                    Ok(state) => debug!(?state, "Answer recorded"),
                    Err(DomainError::InvalidOption { available, .. }) => {
                        writeln!(out, "Pick an option between 1 and {available}.")?
                    }
                    Err(e) => return Err(e.into()),
                },
                _ => writeln!(out, "Enter the number of an option.")?,
            }
        }

        if let Some(session) = page.quiz() {
            write!(out, "{}", presenter.render_final_result(session))?;
        }

        match prompt(input, out, "Refresh? [y/N] ")? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Print `message` and read one line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}

#[derive(Debug, Clone, Copy, Default)]
struct SearchOptions {
    json: bool,
    html: bool,
    interactive: bool,
}

async fn handle_search_command(
    config: &Config,
    client: ApiClient,
    filters: &SearchFilters,
    page_number: Option<u32>,
    page_size: Option<u32>,
    options: SearchOptions,
) -> Result<()> {
    let controller = SearchController::new(client);
    let mut page = new_page(config)?;
    let form = filters.to_form(page_number, page_size.or(Some(config.search.page_size)));

    if !run_search(&controller, &mut page, form).await? {
        return Ok(());
    }
    let results = page.results().context("Search results missing")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else if options.html {
        show_page(&page)?;
    } else {
        print!("{}", TerminalPresenter::new().render_results(results));
    }

    if options.interactive {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        browse_results(&controller, &mut page, &mut input, &mut out).await?;
    }
    Ok(())
}

/// Submit `form` and show the page it returns. Yields `false` if the
/// response was superseded by a newer search.
async fn run_search<S: CatalogSource>(
    controller: &SearchController<S>,
    page: &mut PageController,
    form: SearchForm,
) -> Result<bool> {
    page.set_form(form.clone())?;
    let result = controller
        .search(&form)
        .await
        .inspect_err(|e| error!(error = %e, "Catalog search failed"))
        .context("Catalog search failed")?;

    match result {
        Some(results) => {
            page.show_results(&results)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Prev/next loop over the current search; `q` or end of input stops it.
pub async fn browse_results<S, R, W>(
    controller: &SearchController<S>,
    page: &mut PageController,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: CatalogSource,
    R: BufRead,
    W: Write,
{
    let presenter = TerminalPresenter::new();

    while let Some(command) = prompt(input, out, "[p]rev [n]ext [q]uit: ")? {
        let action = match command.trim().to_ascii_lowercase().as_str() {
            "p" | "prev" => PagerAction::Prev,
            "n" | "next" => PagerAction::Next,
            "" | "q" | "quit" => return Ok(()),
            other => {
                writeln!(out, "Unknown command '{other}'.")?;
                continue;
            }
        };

        let Some(form) = page.pager_form(action) else {
            writeln!(out, "No {} page.", if action == PagerAction::Prev { "previous" } else { "next" })?;
            continue;
        };

        if run_search(controller, page, form).await? {
            if let Some(results) = page.results() {
                write!(out, "{}", presenter.render_results(results))?;
            }
        }
    }
    Ok(())
}

async fn handle_stats_command(config: &Config, client: ApiClient, html: bool) -> Result<()> {
    let service = MissionStatsService::new(client);
    let report = service.load().await;
    if report.from_fallback {
        eprintln!("Mission stats unavailable, showing built-in sample data.");
    }

    let mut page = new_page(config)?;
    page.show_stats(&report.stats)?;

    if html {
        return show_page(&page);
    }

    let mut out = std::io::stdout();
    let animate = out.is_terminal();
    animate_counters(&mut page, &report.stats, &mut out, animate).await
}

/// Run every pending counter to its target, redrawing the stats block each
/// frame when `animate` is set and printing only the final values otherwise.
pub async fn animate_counters<W: Write>(
    page: &mut PageController,
    stats: &[MissionStats],
    out: &mut W,
    animate: bool,
) -> Result<()> {
    let presenter = TerminalPresenter::new();
    let ids = page.pending_counters().to_vec();
    // A terminal shows the whole stats block at once
    let mut animations: Vec<_> = ids.iter().filter_map(|id| page.on_visible(id, 1.0)).collect();
    let mut shown: BTreeMap<String, u64> = BTreeMap::new();
    let lines = stats.len();
    let mut drawn = false;

    loop {
        let mut running = false;
        for animation in animations.iter_mut() {
            if let Some(value) = animation.next() {
                page.show_counter_frame(animation.element_id(), value)?;
                shown.insert(animation.element_id().to_string(), value);
                running = true;
            }
        }
        if !running {
            break;
        }
        if animate {
            if drawn {
                // Move the cursor back over the previous frame
                write!(out, "\x1b[{lines}A")?;
            }
            write!(out, "{}", presenter.render_stats(stats, &shown))?;
            out.flush()?;
            drawn = true;
            tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
        }
    }

    if !drawn {
        write!(out, "{}", presenter.render_stats(stats, &shown))?;
    }
    Ok(())
}

async fn handle_missions_command(client: ApiClient, json: bool) -> Result<()> {
    let service = MissionStatsService::new(client);
    let missions = service
        .missions()
        .await
        .context("Failed to fetch mission descriptions")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&missions)?);
    } else {
        print!("{}", TerminalPresenter::new().render_missions(&missions));
    }
    Ok(())
}

async fn handle_item_command(client: ApiClient, id: i64, json: bool) -> Result<()> {
    let controller = SearchController::new(client);
    let record = controller
        .item(id)
        .await
        .with_context(|| format!("Failed to fetch catalog record {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", TerminalPresenter::new().render_record(&record));
    }
    Ok(())
}

async fn handle_page_command(
    config: &Config,
    client: ApiClient,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut page = new_page(config)?;

    let report = MissionStatsService::new(client.clone()).load().await;
    page.show_stats(&report.stats)?;

    let loader = quiz_loader(config, &client, None);
    load_quiz(&loader, &mut page, &mut rand::thread_rng()).await?;

    let controller = SearchController::new(client);
    let form = SearchForm {
        page_size: Some(config.search.page_size),
        ..Default::default()
    };
    if let Err(e) = run_search(&controller, &mut page, form).await {
        warn!(error = %e, "Rendering page without search results");
    }

    match output {
        Some(path) => {
            PageRenderer::new().write_to(&path, &page.render_page())?;
            info!(path = %path.display(), "Page written");
            Ok(())
        }
        None => show_page(&page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{self, result_page, sample_questions, MockCatalogSource, MockQuestionSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }

    fn page() -> PageController {
        new_page(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn given_all_correct_answers_when_playing_quiz_then_reports_full_score() {
        // Arrange
        let loader = QuizLoader::new(MockQuestionSource::with_questions(sample_questions(3)), 10);
        let mut page = page();
        let mut input = Cursor::new("1\n1\n1\nn\n");
        let mut out = Vec::new();

        // Act
        play_quiz(&loader, &mut page, &mut StdRng::seed_from_u64(7), &mut input, &mut out)
            .await
            .unwrap();

        // Assert
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1 / 3"));
        assert!(out.contains("3 / 3"));
        assert!(out.contains("You got 3 out of 3 questions!"));
        assert_eq!(page.quiz_state(), QuizState::Finished);
    }

    #[tokio::test]
    async fn given_invalid_answers_when_playing_quiz_then_reprompts_without_advancing() {
        let loader = QuizLoader::new(MockQuestionSource::with_questions(sample_questions(1)), 10);
        let mut page = page();
        let mut input = Cursor::new("9\nabc\n2\n");
        let mut out = Vec::new();

        play_quiz(&loader, &mut page, &mut StdRng::seed_from_u64(7), &mut input, &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Pick an option between 1 and 2."));
        assert!(out.contains("Enter the number of an option."));
        assert!(out.contains("You got 0 out of 1 questions!"));
    }

    #[tokio::test]
    async fn given_refresh_when_quiz_finished_then_starts_new_session() {
        let loader = QuizLoader::new(MockQuestionSource::with_questions(sample_questions(1)), 10);
        let mut page = page();
        let mut input = Cursor::new("1\ny\n");
        let mut out = Vec::new();

        play_quiz(&loader, &mut page, &mut StdRng::seed_from_u64(7), &mut input, &mut out)
            .await
            .unwrap();

        // Input ends on the second session's first question
        assert_eq!(page.quiz_state(), QuizState::Presenting(0));
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("1 / 1").count(), 2);
    }

    #[tokio::test]
    async fn given_failing_source_when_playing_quiz_then_shows_load_error_message() {
        let loader = QuizLoader::new(MockQuestionSource::failing(), 10);
        let mut page = page();
        let mut out = Vec::new();

        play_quiz(&loader, &mut page, &mut StdRng::seed_from_u64(7), &mut Cursor::new(""), &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Error loading the quiz.\n");
        assert_eq!(page.quiz_state(), QuizState::Loading);
    }

    #[tokio::test]
    async fn given_first_page_when_browsing_next_then_fetches_second_page() {
        // Arrange
        let source = MockCatalogSource::builder()
            .with_page(1, result_page(1, 2, 2, 5))
            .with_page(2, result_page(2, 2, 2, 5))
            .build();
        let queries = source.queries();
        let controller = SearchController::new(source);
        let mut page = page();
        let form = SearchForm {
            mission: Some("kepler".to_string()),
            page_size: Some(2),
            ..Default::default()
        };
        run_search(&controller, &mut page, form).await.unwrap();
        let mut input = Cursor::new("p\nn\nq\n");
        let mut out = Vec::new();

        // Act
        browse_results(&controller, &mut page, &mut input, &mut out).await.unwrap();

        // Assert
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("No previous page."));
        assert!(out.contains("Page 2 of 3"));
        let queries = queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert!(queries[1].contains(&("mission".to_string(), "kepler".to_string())));
        assert!(queries[1].contains(&("page".to_string(), "2".to_string())));
    }

    #[tokio::test]
    async fn given_stats_when_animating_without_terminal_then_prints_final_values_once() {
        let stats = crate::domain::mission::mock_mission_stats();
        let mut page = page();
        page.show_stats(&stats).unwrap();
        let mut out = Vec::new();

        animate_counters(&mut page, &stats, &mut out, false).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(2).unwrap().contains("Confirmed:  10 %"));
        assert!(page.pending_counters().is_empty());
        assert_eq!(page.document().get("confirmedTess").unwrap().raw_content(), "10 %");
    }
}
