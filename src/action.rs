//! Actions with automatic category inference

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Pokemon, Species};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Browse view (sequential fetch pipeline) =====
    /// Intent: load a record by identifier (dex number or lowercase name)
    BrowseLoad(String),

    /// Page forward; ignored while a fetch is in flight
    BrowseNext,

    /// Page backward; ignored while loading or already at dex id 1
    BrowsePrev,

    /// Result: primary record arrived; the description fetch follows
    BrowseDidLoad(Pokemon),

    /// Result: flavor text arrived, the lookup is settled
    BrowseDidDescribe(Species),

    /// Result: either fetch of the pipeline failed
    BrowseDidError(String),

    // ===== Lookup view (route-driven, joined fetch) =====
    /// Route-parameter change: resolve an identifier end to end
    LookupNavigate(String),

    /// Navigate to the loaded record's id + 1
    LookupNext,

    /// Navigate to the loaded record's id - 1 (only above dex id 1)
    LookupPrev,

    /// Result: both concurrent fetches settled, each independently optional
    LookupDidSettle {
        pokemon: Option<Pokemon>,
        species: Option<Species>,
    },

    // ===== Search overlay (routed to the active view) =====
    SearchOpen,
    SearchClose,
    SearchQueryChange(String),
    SearchQuerySubmit(String),

    // ===== UI category =====
    /// Switch between the browse and lookup views
    UiToggleView,

    /// Force a re-render (cursor movement in the search input)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
