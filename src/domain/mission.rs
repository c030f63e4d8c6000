// src/domain/mission.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Survey programs whose classification statistics are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mission {
    Kepler,
    K2,
    #[serde(rename = "TESS")]
    Tess,
}

impl Mission {
    pub const ALL: [Mission; 3] = [Mission::Kepler, Mission::K2, Mission::Tess];

    /// Canonical display label
    pub fn label(&self) -> &'static str {
        match self {
            Mission::Kepler => "Kepler",
            Mission::K2 => "K2",
            Mission::Tess => "TESS",
        }
    }

    /// Key used by the catalog API (`mission=kepler`)
    pub fn api_key(&self) -> &'static str {
        match self {
            Mission::Kepler => "kepler",
            Mission::K2 => "k2",
            Mission::Tess => "tess",
        }
    }

    /// Suffix of the per-mission element ids (`confirmedTess`, `notBarK2`, ...)
    pub fn element_suffix(&self) -> &'static str {
        match self {
            Mission::Kepler => "Kepler",
            Mission::K2 => "K2",
            Mission::Tess => "Tess",
        }
    }

    /// Case-insensitive lookup that ignores punctuation and whitespace.
    pub fn from_name(name: &str) -> Option<Mission> {
        let cleaned: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match cleaned.as_str() {
            "kepler" => Some(Mission::Kepler),
            "k2" => Some(Mission::K2),
            "tess" => Some(Mission::Tess),
            _ => None,
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Object classification categories shown for each mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Confirmed,
    NotPlanet,
    Candidate,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Confirmed, Category::NotPlanet, Category::Candidate];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Confirmed => "Confirmed",
            Category::NotPlanet => "Not a planet",
            Category::Candidate => "Candidates",
        }
    }

    /// Id of the element that shows the percentage as text.
    pub fn value_element_id(&self, mission: Mission) -> String {
        let prefix = match self {
            Category::Confirmed => "confirmed",
            Category::NotPlanet => "not",
            Category::Candidate => "candidates",
        };
        format!("{prefix}{}", mission.element_suffix())
    }

    /// Id of the element whose width tracks the percentage.
    pub fn bar_element_id(&self, mission: Mission) -> String {
        let prefix = match self {
            Category::Confirmed => "confirmedBar",
            Category::NotPlanet => "notBar",
            Category::Candidate => "candidateBar",
        };
        format!("{prefix}{}", mission.element_suffix())
    }

    fn from_key(key: &str) -> Option<Category> {
        match key.to_ascii_lowercase().as_str() {
            "confirmed" | "planet" => Some(Category::Confirmed),
            "not_planet" | "notconfirmed" | "non_planet" | "false_positive" => {
                Some(Category::NotPlanet)
            }
            "candidate" | "candidates" => Some(Category::Candidate),
            _ => None,
        }
    }
}

/// Three-way split in whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PercentBreakdown {
    pub confirmed: u32,
    pub not_planet: u32,
    pub candidate: u32,
}

impl PercentBreakdown {
    /// `round(100 * count / sum)` per category; all zeros when the sum is 0.
    pub fn from_counts(confirmed: f64, not_planet: f64, candidate: f64) -> Self {
        let sum = confirmed + not_planet + candidate;
        if sum <= 0.0 {
            return Self::default();
        }
        let pct = |count: f64| (100.0 * count / sum).round().max(0.0) as u32;
        Self {
            confirmed: pct(confirmed),
            not_planet: pct(not_planet),
            candidate: pct(candidate),
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Confirmed => self.confirmed,
            Category::NotPlanet => self.not_planet,
            Category::Candidate => self.candidate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionStats {
    pub mission: Mission,
    pub percents: PercentBreakdown,
}

/// Descriptive text for one mission, as served by `/missions`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MissionInfo {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// Normalize a mission-stats body into per-mission percentages.
///
/// Accepts `{ "missions": [...] }`, a bare array of entries, or an object
/// keyed by mission name. Output is ordered Kepler, K2, TESS.
pub fn normalize_mission_stats(body: &Value) -> Result<Vec<MissionStats>, DomainError> {
    let mut found: BTreeMap<Mission, PercentBreakdown> = BTreeMap::new();

    let entries: Vec<(String, &Value)> = match body {
        Value::Array(items) => named_entries(items),
        Value::Object(map) => match map.get("missions") {
            Some(Value::Array(items)) => named_entries(items),
            _ => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        },
        _ => {
            return Err(DomainError::InvalidResponse(
                "mission stats must be an object or an array".to_string(),
            ))
        }
    };

    for (name, entry) in entries {
        let Some(mission) = Mission::from_name(&name) else {
            warn!(mission = %name, "Skipping unknown mission in stats response");
            continue;
        };
        let Some(fields) = entry.as_object() else {
            warn!(%mission, "Skipping mission entry that is not an object");
            continue;
        };
        match breakdown_for(fields) {
            Some(percents) => {
                found.insert(mission, percents);
            }
            None => warn!(%mission, "Mission entry has no totals, counts or percents"),
        }
    }

    if found.is_empty() {
        return Err(DomainError::InvalidResponse(
            "no recognizable mission in stats response".to_string(),
        ));
    }

    debug!(missions = found.len(), "Normalized mission stats");
    Ok(found
        .into_iter()
        .map(|(mission, percents)| MissionStats { mission, percents })
        .collect())
}

fn named_entries(items: &[Value]) -> Vec<(String, &Value)> {
    items
        .iter()
        .filter_map(|item| {
            let name = item.get("mission")?.as_str()?;
            Some((name.to_string(), item))
        })
        .collect()
}

fn breakdown_for(fields: &Map<String, Value>) -> Option<PercentBreakdown> {
    if let Some(percents) = fields.get("percents").and_then(Value::as_object) {
        let [confirmed, not_planet, candidate] = category_values(percents);
        let whole = |v: f64| v.round().max(0.0) as u32;
        return Some(PercentBreakdown {
            confirmed: whole(confirmed),
            not_planet: whole(not_planet),
            candidate: whole(candidate),
        });
    }

    let counts = fields
        .get("totals")
        .or_else(|| fields.get("counts"))
        .and_then(Value::as_object)?;
    let [confirmed, not_planet, candidate] = category_values(counts);
    Some(PercentBreakdown::from_counts(confirmed, not_planet, candidate))
}

fn category_values(map: &Map<String, Value>) -> [f64; 3] {
    let mut values = [0.0; 3];
    for (key, value) in map {
        let Some(category) = Category::from_key(key) else {
            continue;
        };
        let slot = match category {
            Category::Confirmed => 0,
            Category::NotPlanet => 1,
            Category::Candidate => 2,
        };
        values[slot] = value.as_f64().unwrap_or(0.0);
    }
    values
}

/// Data shown when the stats endpoint cannot be reached.
pub fn mock_mission_stats() -> Vec<MissionStats> {
    let counts = [
        (Mission::Kepler, 2_746.0, 4_839.0, 1_979.0),
        (Mission::K2, 548.0, 293.0, 977.0),
        (Mission::Tess, 638.0, 1_196.0, 4_674.0),
    ];
    counts
        .into_iter()
        .map(|(mission, confirmed, not_planet, candidate)| MissionStats {
            mission,
            percents: PercentBreakdown::from_counts(confirmed, not_planet, candidate),
        })
        .collect()
}
