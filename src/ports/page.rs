// src/ports/page.rs
use crate::constants::QUIZ_LOAD_ERROR_MESSAGE;
use crate::domain::{
    Category, CounterAnimation, DomainError, Mission, MissionStats, Pager, PagerAction,
    QuizSession, QuizState, SearchForm, SearchResultPage, VisibilityObserver,
};
use crate::ports::dom::{self, Document};
use crate::ports::HtmlPresenter;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Counter behaviour of the page.
#[derive(Debug, Clone, Copy)]
pub struct PageSettings {
    pub counter_duration: Duration,
    pub visibility_threshold: f64,
}

/// Owns the document and all page-level state; built once at startup.
#[derive(Debug)]
pub struct PageController {
    document: Document,
    presenter: HtmlPresenter,
    observer: VisibilityObserver,
    settings: PageSettings,
    counter_targets: BTreeMap<String, u64>,
    quiz: Option<QuizSession>,
    form: SearchForm,
    results: Option<SearchResultPage>,
    pager: Option<Pager>,
}

impl PageController {
    /// Fails with `MissingElement` if the document lacks any element the page drives.
    pub fn new(document: Document, settings: PageSettings) -> Result<Self, DomainError> {
        for id in required_elements() {
            document.require(&id)?;
        }

        Ok(Self {
            document,
            presenter: HtmlPresenter::new(),
            observer: VisibilityObserver::new(settings.visibility_threshold),
            settings,
            counter_targets: BTreeMap::new(),
            quiz: None,
            form: SearchForm::default(),
            results: None,
            pager: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn render_page(&self) -> String {
        self.presenter.render_page(&self.document)
    }

    /// Toggle the mobile navigation. Returns whether it is open afterwards.
    pub fn toggle_nav(&mut self) -> Result<bool, DomainError> {
        let open = self.document.require_mut(dom::NAV_MENU)?.toggle_class("open");
        let button = self.document.require_mut(dom::HAMBURGER_BUTTON)?;
        if open {
            button.add_class("open");
        } else {
            button.remove_class("open");
        }
        Ok(open)
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> Result<(), DomainError> {
        let header = self.document.require_mut(dom::HEADER)?;
        if scroll_y > 0.0 {
            header.add_class("scrolled");
        } else {
            header.remove_class("scrolled");
        }
        Ok(())
    }

    /// Whether the section exists and can be scrolled to.
    pub fn scroll_to(&self, section: &str) -> bool {
        let found = self.document.contains(section);
        debug!(section, found, "Scroll to section");
        found
    }

    pub fn quiz_state(&self) -> QuizState {
        match &self.quiz {
            None => QuizState::Loading,
            Some(session) => session.state(),
        }
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    pub fn show_quiz(&mut self, session: QuizSession) -> Result<(), DomainError> {
        self.quiz = Some(session);
        self.render_quiz()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn show_quiz_error(&mut self, err: &DomainError) -> Result<(), DomainError> {
        error!(error = %err, "Failed to load the quiz");
        self.quiz = None;
        self.document
            .require_mut(dom::QUIZ_CONTAINER)?
            .set_text(QUIZ_LOAD_ERROR_MESSAGE);
        Ok(())
    }

    /// Record an answer and re-render the quiz container for the new state.
    pub fn select_answer(&mut self, option: usize) -> Result<QuizState, DomainError> {
        let session = self.quiz.as_mut().ok_or(DomainError::QuizFinished)?;
        let state = session.select(option)?;
        self.render_quiz()?;
        Ok(state)
    }

    fn render_quiz(&mut self) -> Result<(), DomainError> {
        let Some(session) = &self.quiz else {
            return Ok(());
        };
        let html = match session.state() {
            QuizState::Finished => self.presenter.render_final_result(session),
            _ => self.presenter.render_question(session),
        };
        self.document.require_mut(dom::QUIZ_CONTAINER)?.set_html(&html);
        Ok(())
    }

    /// Write percentages into the value and bar elements, then watch the values.
    pub fn show_stats(&mut self, stats: &[MissionStats]) -> Result<(), DomainError> {
        for entry in stats {
            for category in Category::ALL {
                let value = entry.percents.get(category);
                let value_id = category.value_element_id(entry.mission);

                self.document
                    .require_mut(&value_id)?
                    .set_text(&format!("{value} %"));
                self.document
                    .require_mut(&category.bar_element_id(entry.mission))?
                    .set_width_percent(value as f64);

                self.counter_targets.insert(value_id.clone(), value as u64);
                self.observer.observe(&value_id);
            }
        }
        debug!(missions = stats.len(), "Mission stats written to page");
        Ok(())
    }

    /// Elements that still wait for their counter animation.
    pub fn pending_counters(&self) -> &[String] {
        self.observer.observed()
    }

    /// Report visibility of an element; yields its counter animation the first time it qualifies.
    pub fn on_visible(&mut self, element_id: &str, visible_ratio: f64) -> Option<CounterAnimation> {
        if !self.observer.report(element_id, visible_ratio) {
            return None;
        }
        let target = self.counter_targets.get(element_id).copied()?;
        debug!(element_id, target, "Starting counter animation");
        Some(CounterAnimation::new(
            element_id,
            target,
            self.settings.counter_duration,
        ))
    }

    pub fn show_counter_frame(&mut self, element_id: &str, value: u64) -> Result<(), DomainError> {
        self.document
            .require_mut(element_id)?
            .set_text(&format!("{value} %"));
        Ok(())
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn set_form(&mut self, form: SearchForm) -> Result<(), DomainError> {
        let html = self.presenter.render_search_form(&form);
        self.document.require_mut(dom::SEARCH_FORM)?.set_html(&html);
        self.form = form;
        Ok(())
    }

    /// Replace the results view with a new page.
    pub fn show_results(&mut self, page: &SearchResultPage) -> Result<(), DomainError> {
        let html = self.presenter.render_results(page);
        self.document.require_mut(dom::SEARCH_RESULTS)?.set_html(&html);
        self.pager = (!page.items.is_empty()).then(|| page.pager());
        self.results = Some(page.clone());
        Ok(())
    }

    /// The page currently shown in the results view.
    pub fn results(&self) -> Option<&SearchResultPage> {
        self.results.as_ref()
    }

    pub fn pager(&self) -> Option<Pager> {
        self.pager
    }

    /// Form values for a Prev/Next click, or `None` if that control is disabled.
    pub fn pager_form(&self, action: PagerAction) -> Option<SearchForm> {
        let pager = self.pager?;
        let page = pager.target(action)?;
        let page_size = if pager.page_size == 0 {
            self.form.effective_page_size()
        } else {
            pager.page_size
        };
        Some(self.form.at_page(page, page_size))
    }
}

fn required_elements() -> Vec<String> {
    let mut ids: Vec<String> = [
        dom::HEADER,
        dom::HAMBURGER_BUTTON,
        dom::NAV_MENU,
        dom::QUIZ_CONTAINER,
        dom::SEARCH_FORM,
        dom::SEARCH_RESULTS,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for mission in Mission::ALL {
        for category in Category::ALL {
            ids.push(category.value_element_id(mission));
            ids.push(category.bar_element_id(mission));
        }
    }
    ids
}
