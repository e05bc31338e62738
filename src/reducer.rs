//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! The browse view runs its two fetches sequentially (the description is
//! keyed by the resolved dex id), the lookup view joins both fetches and
//! settles once. Either way, `loading` flips on before any effect leaves
//! the reducer and flips off exactly once per settlement.

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{ActiveView, AppState, NOT_FOUND_MESSAGE, NO_DATA_BROWSE};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Browse view =====
        Action::BrowseLoad(identifier) => browse_load(state, &identifier),

        Action::BrowseNext => {
            if state.browse.loading {
                return DispatchResult::unchanged();
            }
            let next = state.browse.current_id.saturating_add(1);
            browse_load(state, &next.to_string())
        }

        Action::BrowsePrev => {
            if state.browse.loading || state.browse.current_id <= 1 {
                return DispatchResult::unchanged();
            }
            let prev = state.browse.current_id - 1;
            browse_load(state, &prev.to_string())
        }

        Action::BrowseDidLoad(pokemon) => {
            // Name lookups normalize to the canonical dex id here, and the
            // description fetch is keyed by that id.
            state.browse.current_id = pokemon.id;
            let id = pokemon.id;
            state.browse.pokemon = Some(pokemon);
            DispatchResult::changed_with(Effect::FetchDescription { id })
        }

        Action::BrowseDidDescribe(species) => {
            state.browse.description = species
                .english_text()
                .unwrap_or_else(|| NO_DATA_BROWSE.to_string());
            state.browse.loading = false;
            state.browse.search_input.clear();
            DispatchResult::changed()
        }

        Action::BrowseDidError(_) => {
            // Shared settlement path for both fetches: the record and the
            // description are never fresh alongside the error flag.
            state.browse.error = true;
            state.browse.pokemon = None;
            state.browse.description.clear();
            state.browse.loading = false;
            state.browse.search_input.clear();
            DispatchResult::changed()
        }

        // ===== Lookup view =====
        Action::LookupNavigate(identifier) => lookup_navigate(state, &identifier),

        Action::LookupNext => {
            let Some(id) = state.lookup.pokemon.as_ref().map(|p| p.id) else {
                return DispatchResult::unchanged();
            };
            lookup_navigate(state, &id.saturating_add(1).to_string())
        }

        Action::LookupPrev => {
            let Some(id) = state.lookup.pokemon.as_ref().map(|p| p.id) else {
                return DispatchResult::unchanged();
            };
            if id <= 1 {
                return DispatchResult::unchanged();
            }
            lookup_navigate(state, &(id - 1).to_string())
        }

        Action::LookupDidSettle { pokemon, species } => {
            if pokemon.is_none() {
                state.lookup.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            // A missing species degrades silently to the placeholder text.
            state.lookup.pokemon = pokemon;
            state.lookup.species = species;
            state.lookup.loading = false;
            state.lookup.search_input.clear();
            DispatchResult::changed()
        }

        // ===== Search overlay (active view owns the input) =====
        Action::SearchOpen => {
            match state.view {
                ActiveView::Browse => {
                    state.browse.search_active = true;
                    state.browse.search_input.clear();
                }
                ActiveView::Lookup => {
                    state.lookup.search_active = true;
                    state.lookup.search_input.clear();
                }
            }
            DispatchResult::changed()
        }

        Action::SearchClose => {
            match state.view {
                ActiveView::Browse => {
                    state.browse.search_active = false;
                    state.browse.search_input.clear();
                }
                ActiveView::Lookup => {
                    state.lookup.search_active = false;
                    state.lookup.search_input.clear();
                }
            }
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            match state.view {
                ActiveView::Browse => state.browse.search_input = query,
                ActiveView::Lookup => state.lookup.search_input = query,
            }
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            let query = query.trim().to_lowercase();
            match state.view {
                ActiveView::Browse => {
                    state.browse.search_active = false;
                    if query.is_empty() {
                        return DispatchResult::changed();
                    }
                    browse_load(state, &query)
                }
                ActiveView::Lookup => {
                    state.lookup.search_active = false;
                    if query.is_empty() {
                        return DispatchResult::changed();
                    }
                    lookup_navigate(state, &query)
                }
            }
        }

        // ===== UI =====
        Action::UiToggleView => {
            state.view = state.view.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global =====
        Action::Tick => {
            if state.any_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Browse pipeline entry point. Empty identifiers are a no-op; otherwise
/// the loading flag goes up before the fetch effect is emitted.
fn browse_load(state: &mut AppState, identifier: &str) -> DispatchResult<Effect> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return DispatchResult::unchanged();
    }
    state.browse.loading = true;
    state.browse.error = false;
    DispatchResult::changed_with(Effect::FetchPokemon {
        identifier: identifier.to_string(),
    })
}

/// Lookup pipeline entry point, the route-parameter analogue. Identifiers
/// are trimmed and lowercased; empty ones are filtered out.
fn lookup_navigate(state: &mut AppState, identifier: &str) -> DispatchResult<Effect> {
    let query = identifier.trim().to_lowercase();
    if query.is_empty() {
        return DispatchResult::unchanged();
    }
    state.lookup.query = query.clone();
    state.lookup.loading = true;
    state.lookup.error = None;
    DispatchResult::changed_with(Effect::FetchEntry { query })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FlavorEntry, Pokemon, PokemonStat, Species, NO_DATA_LOOKUP};

    fn mock_pokemon(id: u16) -> Pokemon {
        Pokemon {
            id,
            name: "pikachu".into(),
            types: vec!["electric".into()],
            stats: vec![PokemonStat {
                name: "speed".into(),
                value: 90,
            }],
            sprite_default: Some("static.png".into()),
            sprite_animated: None,
            sprite_showdown: None,
        }
    }

    fn english_species(text: &str) -> Species {
        Species {
            flavor_entries: vec![FlavorEntry {
                text: text.into(),
                language: "en".into(),
            }],
        }
    }

    #[test]
    fn test_browse_load_sets_loading_before_effect() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::BrowseLoad("25".into()));

        assert!(result.changed);
        assert!(state.browse.loading);
        assert!(!state.browse.error);
        assert_eq!(result.effects.len(), 1);
        assert!(
            matches!(&result.effects[0], Effect::FetchPokemon { identifier } if identifier == "25")
        );
    }

    #[test]
    fn test_browse_load_empty_identifier_is_noop() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::BrowseLoad("   ".into()));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.browse.loading);
    }

    #[test]
    fn test_browse_did_load_normalizes_id_and_chains_description() {
        let mut state = AppState::default();
        reducer(&mut state, Action::BrowseLoad("pikachu".into()));

        let result = reducer(&mut state, Action::BrowseDidLoad(mock_pokemon(25)));

        assert_eq!(state.browse.current_id, 25);
        assert!(state.browse.loading, "still loading until description settles");
        assert!(matches!(result.effects[0], Effect::FetchDescription { id: 25 }));
    }

    #[test]
    fn test_browse_settlement_clears_loading_and_search() {
        let mut state = AppState::default();
        state.browse.search_input = "pikachu".into();
        reducer(&mut state, Action::BrowseLoad("pikachu".into()));
        reducer(&mut state, Action::BrowseDidLoad(mock_pokemon(25)));
        reducer(
            &mut state,
            Action::BrowseDidDescribe(english_species("Mouse\nPokemon")),
        );

        assert!(!state.browse.loading);
        assert!(!state.browse.error);
        assert_eq!(state.browse.description, "Mouse Pokemon");
        assert!(state.browse.search_input.is_empty());
    }

    #[test]
    fn test_browse_error_clears_record_and_description() {
        let mut state = AppState::default();
        state.browse.pokemon = Some(mock_pokemon(25));
        state.browse.description = "old text".into();
        state.browse.search_input = "999999".into();
        reducer(&mut state, Action::BrowseLoad("999999".into()));

        reducer(&mut state, Action::BrowseDidError("404".into()));

        assert!(state.browse.error);
        assert!(state.browse.pokemon.is_none());
        assert!(state.browse.description.is_empty());
        assert!(!state.browse.loading);
        assert!(state.browse.search_input.is_empty());
    }

    #[test]
    fn test_browse_no_english_uses_placeholder() {
        let mut state = AppState::default();
        reducer(&mut state, Action::BrowseLoad("25".into()));
        reducer(&mut state, Action::BrowseDidLoad(mock_pokemon(25)));
        reducer(
            &mut state,
            Action::BrowseDidDescribe(Species {
                flavor_entries: vec![FlavorEntry {
                    text: "texte".into(),
                    language: "fr".into(),
                }],
            }),
        );

        assert_eq!(state.browse.description, NO_DATA_BROWSE);
    }

    #[test]
    fn test_browse_next_blocked_while_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::BrowseLoad("25".into()));

        let result = reducer(&mut state, Action::BrowseNext);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_browse_prev_blocked_at_first_entry() {
        let mut state = AppState::default();
        state.browse.current_id = 1;

        let result = reducer(&mut state, Action::BrowsePrev);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_browse_prev_requests_previous_id() {
        let mut state = AppState::default();
        state.browse.current_id = 25;

        let result = reducer(&mut state, Action::BrowsePrev);
        assert!(
            matches!(&result.effects[0], Effect::FetchPokemon { identifier } if identifier == "24")
        );
    }

    #[test]
    fn test_lookup_navigate_lowercases_and_trims() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LookupNavigate(" Pikachu ".into()));

        assert_eq!(state.lookup.query, "pikachu");
        assert!(state.lookup.loading);
        assert!(state.lookup.error.is_none());
        assert!(matches!(&result.effects[0], Effect::FetchEntry { query } if query == "pikachu"));
    }

    #[test]
    fn test_lookup_navigate_empty_is_filtered() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::LookupNavigate("  ".into()));
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_lookup_settle_missing_record_sets_message() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LookupNavigate("999999".into()));
        reducer(
            &mut state,
            Action::LookupDidSettle {
                pokemon: None,
                species: None,
            },
        );

        assert_eq!(state.lookup.error.as_deref(), Some(NOT_FOUND_MESSAGE));
        assert!(state.lookup.pokemon.is_none());
        assert!(!state.lookup.loading);
    }

    #[test]
    fn test_lookup_settle_missing_species_degrades_silently() {
        let mut state = AppState::default();
        reducer(&mut state, Action::LookupNavigate("25".into()));
        reducer(
            &mut state,
            Action::LookupDidSettle {
                pokemon: Some(mock_pokemon(25)),
                species: None,
            },
        );

        assert!(state.lookup.error.is_none());
        assert!(state.lookup.pokemon.is_some());
        assert_eq!(state.lookup.flavor_text(), NO_DATA_LOOKUP);
    }

    #[test]
    fn test_lookup_next_navigates_from_loaded_id() {
        let mut state = AppState::default();
        state.lookup.pokemon = Some(mock_pokemon(25));

        let result = reducer(&mut state, Action::LookupNext);
        assert!(matches!(&result.effects[0], Effect::FetchEntry { query } if query == "26"));

        // Without a loaded record there is nothing to navigate from
        state.lookup.pokemon = None;
        let result = reducer(&mut state, Action::LookupNext);
        assert!(!result.changed);
    }

    #[test]
    fn test_lookup_prev_blocked_at_first_entry() {
        let mut state = AppState::default();
        state.lookup.pokemon = Some(mock_pokemon(1));

        let result = reducer(&mut state, Action::LookupPrev);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_search_submit_routes_to_active_view() {
        let mut state = AppState::default();
        state.browse.search_active = true;
        let result = reducer(&mut state, Action::SearchQuerySubmit(" Pikachu ".into()));
        assert!(!state.browse.search_active);
        assert!(
            matches!(&result.effects[0], Effect::FetchPokemon { identifier } if identifier == "pikachu")
        );

        let mut state = AppState::default();
        state.view = ActiveView::Lookup;
        state.lookup.search_active = true;
        let result = reducer(&mut state, Action::SearchQuerySubmit("Mew".into()));
        assert!(!state.lookup.search_active);
        assert!(matches!(&result.effects[0], Effect::FetchEntry { query } if query == "mew"));
    }

    #[test]
    fn test_search_submit_empty_only_closes_overlay() {
        let mut state = AppState::default();
        state.browse.search_active = true;
        let result = reducer(&mut state, Action::SearchQuerySubmit("   ".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.browse.search_active);
    }

    #[test]
    fn test_tick_only_advances_while_loading() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);
        assert_eq!(state.tick, 0);

        state.browse.loading = true;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_toggle_view() {
        let mut state = AppState::default();
        assert_eq!(state.view, ActiveView::Browse);
        reducer(&mut state, Action::UiToggleView);
        assert_eq!(state.view, ActiveView::Lookup);
        reducer(&mut state, Action::UiToggleView);
        assert_eq!(state.view, ActiveView::Browse);
    }
}
