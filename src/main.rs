//! Pokedex lookup TUI - two PokeAPI-backed views over one record at a time

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::components::{
    BrowseView, BrowseViewProps, Component, LookupView, LookupViewProps, SearchOverlay,
    SearchOverlayProps,
};
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::{ActiveView, AppState, SPINNER_TICK_MS, STARTING_DEX_ID};

/// Pokedex lookup TUI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse and look up PokeAPI dex entries from the terminal")]
struct Args {
    /// Initial entry to load (dex number or name)
    #[arg(long, short, default_value_t = STARTING_DEX_ID.to_string())]
    identifier: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Browse,
    Lookup,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Main,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search_active() {
            Some(DexComponentId::Search)
        } else {
            match self.view {
                ActiveView::Browse => Some(DexComponentId::Browse),
                ActiveView::Lookup => Some(DexComponentId::Lookup),
            }
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search_active() {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Browse | DexComponentId::Lookup => DexContext::Main,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        identifier,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, identifier, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct DexUi {
    browse: BrowseView,
    lookup: LookupView,
    search: SearchOverlay,
}

impl DexUi {
    fn new() -> Self {
        Self {
            browse: BrowseView,
            lookup: LookupView,
            search: SearchOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let view_focused = render_ctx.is_focused() && !state.search_active();
        match state.view {
            ActiveView::Browse => {
                event_ctx.set_component_area(DexComponentId::Browse, area);
                event_ctx.component_areas.remove(&DexComponentId::Lookup);
                self.browse.render(
                    frame,
                    area,
                    BrowseViewProps {
                        state,
                        is_focused: view_focused,
                    },
                );
            }
            ActiveView::Lookup => {
                event_ctx.set_component_area(DexComponentId::Lookup, area);
                event_ctx.component_areas.remove(&DexComponentId::Browse);
                self.lookup.render(
                    frame,
                    area,
                    LookupViewProps {
                        state,
                        is_focused: view_focused,
                    },
                );
            }
        }

        self.search.set_open(state.search_active());
        if state.search_active() {
            let modal_area = centered_rect(50, 5, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            self.search.render(
                frame,
                area,
                SearchOverlayProps {
                    query: state.search_input(),
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }
    }

    fn handle_browse_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = BrowseViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.browse.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_lookup_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = LookupViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.lookup.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_active());
        let props = SearchOverlayProps {
            query: state.search_input(),
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    identifier: String,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_browse = Rc::clone(&ui);
    bus.register(DexComponentId::Browse, move |event, state| {
        ui_browse
            .borrow_mut()
            .handle_browse_event(&event.kind, state)
    });

    let ui_lookup = Rc::clone(&ui);
    bus.register(DexComponentId::Lookup, move |event, state| {
        ui_lookup
            .borrow_mut()
            .handle_lookup_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::BrowseLoad(identifier.trim().to_lowercase())),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Each pipeline uses a fixed task key,
/// so a newer lookup supersedes one still in flight instead of racing it.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemon { identifier } => {
            ctx.tasks().spawn(TaskKey::new("browse_pokemon"), async move {
                match api::fetch_pokemon(&identifier).await {
                    Ok(pokemon) => Action::BrowseDidLoad(pokemon),
                    Err(error) => Action::BrowseDidError(error),
                }
            });
        }
        Effect::FetchDescription { id } => {
            ctx.tasks().spawn(TaskKey::new("browse_species"), async move {
                match api::fetch_species(&id.to_string()).await {
                    Ok(species) => Action::BrowseDidDescribe(species),
                    Err(error) => Action::BrowseDidError(error),
                }
            });
        }
        Effect::FetchEntry { query } => {
            // Both requests in flight together, each failure collapsed
            // independently
            ctx.tasks().spawn(TaskKey::new("lookup_entry"), async move {
                let (pokemon, species) =
                    tokio::join!(api::fetch_pokemon(&query), api::fetch_species(&query));
                Action::LookupDidSettle {
                    pokemon: pokemon.ok(),
                    species: species.ok(),
                }
            });
        }
    }
}
