// src/ports/html.rs
use crate::constants::NO_RESULTS_MESSAGE;
use crate::domain::catalog::RESULT_COLUMNS;
use crate::domain::{Category, Mission, QuizSession, SearchForm, SearchResultPage};
use crate::ports::dom::{self, Content, Document, Element};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Content of the quiz container while a question is shown.
    pub fn render_question(&self, session: &QuizSession) -> String {
        let Some(question) = session.current_question() else {
            return self.render_final_result(session);
        };

        let mut html = format!(
            r#"<div class="progress-container"><div class="progress-bar" style="width: {}%"></div></div>
<div class="question-box">
  <h2> {} / {}</h2>
  <p><strong>{}</strong></p>
</div>
"#,
            percent(session.progress_percent()),
            session.current_index() + 1,
            session.total(),
            question.question,
        );

        for (i, option) in question.answer_options.iter().enumerate() {
            let _ = writeln!(
                html,
                r#"<button class="answer-btn" data-option="{i}">{}</button>"#,
                encode_text(&option.text)
            );
        }
        html
    }

    pub fn render_final_result(&self, session: &QuizSession) -> String {
        format!(
            r#"<h2>Final Result</h2>
<p>You got <strong>{}</strong> out of <strong>{}</strong> questions!</p>
<button class="finish-btn" onclick="location.reload()">Refresh</button>
"#,
            session.score(),
            session.total()
        )
    }

    /// Results table plus pager, or the empty-result message.
    #[instrument(level = "trace", skip(self, page), fields(items = page.items.len()))]
    pub fn render_results(&self, page: &SearchResultPage) -> String {
        if page.items.is_empty() {
            return format!(r#"<p class="no-results">{NO_RESULTS_MESSAGE}</p>"#);
        }

        let mut html = String::from("<table class=\"results-table\">\n<thead><tr>");
        for column in RESULT_COLUMNS {
            let _ = write!(html, "<th>{column}</th>");
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for record in &page.items {
            html.push_str("<tr>");
            for column in RESULT_COLUMNS {
                let _ = write!(html, "<td>{}</td>", encode_text(&record.cell(column)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");

        let pager = page.pager();
        let disabled = |enabled: bool| if enabled { "" } else { " disabled" };
        let _ = write!(
            html,
            r#"<div class="pager">
  <button class="pager-prev" data-page="{}"{}>Prev</button>
  <span class="pager-info">Page {} of {}</span>
  <button class="pager-next" data-page="{}"{}>Next</button>
</div>
"#,
            page.page.saturating_sub(1),
            disabled(pager.has_prev()),
            page.page,
            pager.total_pages(),
            page.page.saturating_add(1),
            disabled(pager.has_next()),
        );
        html
    }

    /// Inputs of the search form, pre-filled with the current values.
    pub fn render_search_form(&self, form: &SearchForm) -> String {
        let mut html = String::new();
        let text_input = |name: &str, value: Option<&str>| {
            format!(
                r#"<label>{name} <input type="text" name="{name}" value="{}"></label>"#,
                encode_double_quoted_attribute(value.unwrap_or(""))
            )
        };

        let mut missions = String::from(r#"<option value="">any</option>"#);
        for mission in Mission::ALL {
            let selected = form
                .mission
                .as_deref()
                .is_some_and(|m| Mission::from_name(m) == Some(mission));
            let _ = write!(
                missions,
                r#"<option value="{}"{}>{}</option>"#,
                mission.api_key(),
                if selected { " selected" } else { "" },
                mission.label()
            );
        }
        let _ = writeln!(html, r#"<label>mission <select name="mission">{missions}</select></label>"#);
        let _ = writeln!(
            html,
            "{}",
            text_input("final_classification", form.final_classification.as_deref())
        );
        let _ = writeln!(html, "{}", text_input("object_id", form.object_id.as_deref()));
        for (field, min, max) in &form.ranges {
            let fmt = |v: &Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
            let _ = writeln!(html, "{}", text_input(&format!("min_{field}"), Some(fmt(min).as_str())));
            let _ = writeln!(html, "{}", text_input(&format!("max_{field}"), Some(fmt(max).as_str())));
        }
        let _ = writeln!(
            html,
            r#"<input type="hidden" name="page" value="{}"><input type="hidden" name="page_size" value="{}">"#,
            form.effective_page(),
            form.effective_page_size()
        );
        html.push_str(r#"<button type="submit">Search</button>"#);
        html
    }

    /// One element with its attributes and content.
    pub fn render_element(&self, element: &Element) -> String {
        let mut html = format!(r#"<{} id="{}""#, element.tag, encode_double_quoted_attribute(&element.id));
        if !element.classes().is_empty() {
            let _ = write!(
                html,
                r#" class="{}""#,
                encode_double_quoted_attribute(&element.classes().join(" "))
            );
        }
        if let Some(width) = element.width_percent() {
            let _ = write!(html, r#" style="width: {}%""#, percent(width));
        }
        html.push('>');
        match element.content() {
            Content::Empty => {}
            Content::Text(text) => html.push_str(&encode_text(text)),
            Content::Html(markup) => html.push_str(markup),
        }
        let _ = write!(html, "</{}>", element.tag);
        html
    }

    fn slot(&self, document: &Document, id: &str) -> String {
        document
            .get(id)
            .map(|el| self.render_element(el))
            .unwrap_or_default()
    }

    fn stats_section(&self, document: &Document) -> String {
        let mut html = String::new();
        for mission in Mission::ALL {
            let _ = writeln!(html, r#"<div class="mission-card"><h3>{}</h3>"#, mission.label());
            for category in Category::ALL {
                let _ = writeln!(
                    html,
                    r#"<div class="stat"><span class="stat-label">{}</span> {}<div class="stat-track">{}</div></div>"#,
                    category.label(),
                    self.slot(document, &category.value_element_id(mission)),
                    self.slot(document, &category.bar_element_id(mission)),
                );
            }
            html.push_str("</div>\n");
        }
        html
    }

    /// Full standalone page for the current document state.
    pub fn render_page(&self, document: &Document) -> String {
        let header_classes = document
            .get(dom::HEADER)
            .map(|h| h.classes().join(" "))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>ExoSeeker</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 1100px;
            margin: 0 auto;
            padding: 0 1rem 3rem;
            background-color: #0b0d17;
            color: #e8e8f0;
        }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 1rem 0;
        }}
        header.scrolled {{
            border-bottom: 1px solid #2a2f4a;
        }}
        .nav-menu a {{
            color: #9fb3ff;
            margin-left: 1rem;
            text-decoration: none;
        }}
        .nav-menu.open {{
            display: block;
        }}
        section {{
            margin-top: 2.5rem;
        }}
        .missions {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1rem;
        }}
        .mission-card, .quiz-container {{
            background: #151a30;
            border-radius: 8px;
            padding: 1.5rem;
        }}
        .stat-track, .progress-container {{
            background: #2a2f4a;
            border-radius: 4px;
            height: 8px;
            margin: 0.25rem 0 0.75rem;
        }}
        .stat-bar, .progress-bar {{
            background: #6c8cff;
            border-radius: 4px;
            height: 8px;
        }}
        .answer-btn, .finish-btn, .pager button, form button {{
            display: block;
            margin: 0.5rem 0;
            padding: 0.5rem 1rem;
            border: none;
            border-radius: 4px;
            background: #2a2f4a;
            color: inherit;
        }}
        .pager {{
            display: flex;
            gap: 1rem;
            align-items: center;
        }}
        .results-table {{
            width: 100%;
            border-collapse: collapse;
            font-size: 0.85em;
            overflow-x: auto;
        }}
        .results-table th, .results-table td {{
            border-bottom: 1px solid #2a2f4a;
            padding: 4px 6px;
            text-align: left;
        }}
        .search-form label {{
            display: inline-block;
            margin: 0 1rem 0.5rem 0;
        }}
    </style>
</head>
<body>
    <header id="{header_id}" class="{header_classes}">
        <h1>ExoSeeker</h1>
        {hamburger}
        {nav}
    </header>
    <section id="missions">
        <h2>Missions</h2>
        <div class="missions">
{stats}
        </div>
    </section>
    <section id="quiz">
        <h2>Quiz</h2>
        {quiz}
    </section>
    <section id="catalog">
        <h2>Catalog</h2>
        {form}
        {results}
    </section>
</body>
</html>"#,
            header_id = dom::HEADER,
            header_classes = encode_double_quoted_attribute(&header_classes),
            hamburger = self.slot(document, dom::HAMBURGER_BUTTON),
            nav = self.slot(document, dom::NAV_MENU),
            stats = self.stats_section(document),
            quiz = self.slot(document, dom::QUIZ_CONTAINER),
            form = self.slot(document, dom::SEARCH_FORM),
            results = self.slot(document, dom::SEARCH_RESULTS),
        )
    }
}

/// Percentages with at most two decimals and no trailing zeros.
fn percent(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}
