//! Application state - single source of truth
//!
//! Two views share the same fetched-data types but keep their own
//! controller state: the browse view pages through entries sequentially,
//! the lookup view resolves an identifier the way a route parameter would.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

/// Dex id shown before the user navigates anywhere (Pikachu).
pub const STARTING_DEX_ID: u16 = 25;

/// Spinner timing while a fetch is in flight.
pub const SPINNER_TICK_MS: u64 = 120;

/// Browse view placeholder when a species has no English entry.
pub const NO_DATA_BROWSE: &str = "NO DATA AVAILABLE.";
/// Lookup view placeholder when the species record is absent entirely.
pub const NO_DATA_LOOKUP: &str = "No data available.";
/// Lookup view placeholder when a species has no English entry.
pub const NO_ENGLISH_LOOKUP: &str = "No English description available.";
/// Shown when the primary record failed to load in the lookup view.
pub const NOT_FOUND_MESSAGE: &str = "Pokemon not found.";
/// Primary type fallback for an absent record or empty type list.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// The primary record for one dex entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pokemon {
    pub id: u16,
    pub name: String,
    /// Ordered by slot; first entry is the primary type
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub sprite_default: Option<String>,
    pub sprite_animated: Option<String>,
    pub sprite_showdown: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

impl Pokemon {
    pub fn stat_value(&self, name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|stat| stat.name == name)
            .map(|stat| stat.value)
    }
}

/// Language-tagged flavor text, kept raw as fetched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Species {
    pub flavor_entries: Vec<FlavorEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlavorEntry {
    pub text: String,
    pub language: String,
}

impl Species {
    /// First English entry with control characters flattened to spaces
    pub fn english_text(&self) -> Option<String> {
        self.flavor_entries
            .iter()
            .find(|entry| entry.language == "en")
            .map(|entry| clean_flavor_text(&entry.text))
    }
}

/// PokeAPI flavor text embeds newlines, carriage returns and form feeds
pub fn clean_flavor_text(text: &str) -> String {
    text.replace(['\n', '\r', '\u{000C}'], " ")
}

/// Dex number formatting: 7 -> "007", 42 -> "042", absent -> "000"
pub fn format_dex_id(id: Option<u16>) -> String {
    match id {
        Some(id) if id > 0 => format!("{id:03}"),
        _ => "000".to_string(),
    }
}

fn non_empty(url: Option<&str>) -> Option<&str> {
    url.filter(|url| !url.is_empty())
}

/// State of the sequential browse view
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct BrowseState {
    pub current_id: u16,
    pub search_input: String,
    pub search_active: bool,
    pub pokemon: Option<Pokemon>,
    /// Already cleaned; set together with the record on settlement
    pub description: String,
    pub loading: bool,
    pub error: bool,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            current_id: STARTING_DEX_ID,
            search_input: String::new(),
            search_active: false,
            pokemon: None,
            description: String::new(),
            loading: false,
            error: false,
        }
    }
}

impl BrowseState {
    /// Animated sprite first, static default second
    pub fn sprite_url(&self) -> String {
        let Some(pokemon) = self.pokemon.as_ref() else {
            return String::new();
        };
        non_empty(pokemon.sprite_animated.as_deref())
            .or_else(|| non_empty(pokemon.sprite_default.as_deref()))
            .unwrap_or("")
            .to_string()
    }

    /// Base stat by name; this view falls back to 0
    pub fn stat(&self, name: &str) -> u16 {
        self.pokemon
            .as_ref()
            .and_then(|pokemon| pokemon.stat_value(name))
            .unwrap_or(0)
    }

    pub fn display_id(&self) -> String {
        format_dex_id(self.pokemon.as_ref().map(|pokemon| pokemon.id))
    }
}

/// State of the route-driven lookup view
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct LookupState {
    /// Route-parameter analogue: the last navigated identifier
    pub query: String,
    pub search_input: String,
    pub search_active: bool,
    pub pokemon: Option<Pokemon>,
    pub species: Option<Species>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LookupState {
    /// Showdown sprite first, then animated, then static default
    pub fn sprite_url(&self) -> String {
        let Some(pokemon) = self.pokemon.as_ref() else {
            return String::new();
        };
        non_empty(pokemon.sprite_showdown.as_deref())
            .or_else(|| non_empty(pokemon.sprite_animated.as_deref()))
            .or_else(|| non_empty(pokemon.sprite_default.as_deref()))
            .unwrap_or("")
            .to_string()
    }

    /// Base stat by name; this view renders "--" when unknown
    pub fn stat(&self, name: &str) -> String {
        self.pokemon
            .as_ref()
            .and_then(|pokemon| pokemon.stat_value(name))
            .map(|value| value.to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    pub fn primary_type(&self) -> String {
        self.pokemon
            .as_ref()
            .and_then(|pokemon| pokemon.types.first().cloned())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }

    pub fn flavor_text(&self) -> String {
        match self.species.as_ref() {
            None => NO_DATA_LOOKUP.to_string(),
            Some(species) => species
                .english_text()
                .unwrap_or_else(|| NO_ENGLISH_LOOKUP.to_string()),
        }
    }

    pub fn display_id(&self) -> String {
        format_dex_id(self.pokemon.as_ref().map(|pokemon| pokemon.id))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ActiveView {
    #[default]
    Browse,
    Lookup,
}

impl ActiveView {
    pub fn toggle(&self) -> Self {
        match self {
            ActiveView::Browse => ActiveView::Lookup,
            ActiveView::Lookup => ActiveView::Browse,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub view: ActiveView,
    pub browse: BrowseState,
    pub lookup: LookupState,
    /// Spinner frame counter; only advances while a fetch is in flight
    pub tick: u64,
}

impl AppState {
    pub fn any_loading(&self) -> bool {
        self.browse.loading || self.lookup.loading
    }

    pub fn search_active(&self) -> bool {
        match self.view {
            ActiveView::Browse => self.browse.search_active,
            ActiveView::Lookup => self.lookup.search_active,
        }
    }

    pub fn search_input(&self) -> &str {
        match self.view {
            ActiveView::Browse => &self.browse.search_input,
            ActiveView::Lookup => &self.lookup.search_input,
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("View")
                .entry("active", ron_string(&self.view))
                .entry("search_active", ron_string(&self.search_active())),
            DebugSection::new("Browse")
                .entry("id", ron_string(&self.browse.current_id))
                .entry(
                    "pokemon",
                    ron_string(&self.browse.pokemon.as_ref().map(|p| p.name.clone())),
                )
                .entry("loading", ron_string(&self.browse.loading))
                .entry("error", ron_string(&self.browse.error)),
            DebugSection::new("Lookup")
                .entry("query", ron_string(&self.lookup.query))
                .entry(
                    "pokemon",
                    ron_string(&self.lookup.pokemon.as_ref().map(|p| p.name.clone())),
                )
                .entry("loading", ron_string(&self.lookup.loading))
                .entry("error", ron_string(&self.lookup.error)),
        ]
    }
}
