// src/cli/args.rs
use crate::domain::catalog::RANGE_FIELDS;
use crate::domain::SearchForm;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (default: <config_dir>/exoseeker/config.toml)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the catalog API, overrides the config file
    #[arg(long, value_name = "URL", env = "EXOSEEKER_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Take the exoplanet quiz in the terminal
    Quiz {
        /// Question document: `embedded`, a file path or an http(s) URL
        #[arg(long, value_name = "SOURCE")]
        source: Option<String>,

        /// Render the first question as a page and open it in the browser
        #[arg(long)]
        html: bool,
    },

    /// Search the exoplanet catalog
    Search {
        #[command(flatten)]
        filters: SearchFilters,

        /// Page to fetch
        #[arg(long, value_name = "N")]
        page: Option<u32>,

        /// Results per page (1-200)
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,

        /// Output the result page as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Open the results as a page in the browser
        #[arg(long)]
        html: bool,

        /// Page through the results with prev/next prompts
        #[arg(short, long, conflicts_with_all = ["json", "html"])]
        interactive: bool,
    },

    /// Show animated classification stats per mission
    Stats {
        /// Open the stats as a page in the browser
        #[arg(long)]
        html: bool,
    },

    /// List mission descriptions
    Missions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one catalog record
    Item {
        /// Catalog record ID
        #[arg(value_name = "ID")]
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the full landing page with stats, quiz and first result page
    Page {
        /// Write the page here instead of opening it in the browser
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Search form fields
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// kepler, k2 or tess
    #[arg(long)]
    pub mission: Option<String>,

    /// planet, not_planet or candidate
    #[arg(long, value_name = "CLASS")]
    pub classification: Option<String>,

    /// Object identifier, e.g. KOI-7016.01
    #[arg(long, value_name = "ID")]
    pub object_id: Option<String>,

    /// Lower bound, repeatable: FIELD=VALUE (e.g. planet_radius=1.5)
    #[arg(long = "min", value_name = "FIELD=VALUE", value_parser = parse_bound)]
    pub min: Vec<(String, f64)>,

    /// Upper bound, repeatable: FIELD=VALUE
    #[arg(long = "max", value_name = "FIELD=VALUE", value_parser = parse_bound)]
    pub max: Vec<(String, f64)>,

    /// Column to sort by
    #[arg(long, value_name = "FIELD")]
    pub order_by: Option<String>,

    /// asc or desc
    #[arg(long, value_name = "DIR", value_parser = ["asc", "desc"])]
    pub order_dir: Option<String>,
}

impl SearchFilters {
    /// Form values for these filters; bounds on the same field are merged.
    pub fn to_form(&self, page: Option<u32>, page_size: Option<u32>) -> SearchForm {
        let mut form = SearchForm {
            mission: self.mission.clone(),
            final_classification: self.classification.clone(),
            object_id: self.object_id.clone(),
            order_by: self.order_by.clone(),
            order_dir: self.order_dir.clone(),
            page,
            page_size,
            ..Default::default()
        };
        for field in RANGE_FIELDS {
            let bound = |bounds: &[(String, f64)]| {
                bounds.iter().rev().find(|(f, _)| f == field).map(|(_, v)| *v)
            };
            form = form.with_range(field, bound(&self.min), bound(&self.max));
        }
        form
    }
}

fn parse_bound(s: &str) -> Result<(String, f64), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = field.trim();
    if !RANGE_FIELDS.contains(&field) {
        return Err(format!(
            "unknown range field '{field}', expected one of: {}",
            RANGE_FIELDS.join(", ")
        ));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number '{value}': {e}"))?;
    Ok((field.to_string(), value))
}
