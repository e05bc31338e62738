//! Browse view - sequential pager over dex entries
//!
//! The first of the two lookup surfaces: one record at a time, paged with
//! left/right, with a cleaned description fetched after the record itself.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{loading_dots, Component};
use crate::action::Action;
use crate::state::{AppState, BrowseState};

/// Stats shown in this view, in template order
const STAT_ROWS: [(&str, &str); 4] = [
    ("HP", "hp"),
    ("ATK", "attack"),
    ("DEF", "defense"),
    ("SPD", "speed"),
];

pub struct BrowseViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct BrowseView;

impl Component<Action> for BrowseView {
    type Props<'a> = BrowseViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Right | KeyCode::Char('l') => Some(Action::BrowseNext),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::BrowsePrev),
                KeyCode::Char('/') => Some(Action::SearchOpen),
                KeyCode::Tab => Some(Action::UiToggleView),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Entry card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_entry(frame, chunks[0], &props.state.browse, props.state.tick);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("←/→", "page"),
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("tab", "lookup view"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_entry(frame: &mut Frame, area: Rect, browse: &BrowseState, tick: u64) {
    let mut lines: Vec<Line> = Vec::new();

    if browse.loading {
        lines.push(Line::from(Span::styled(
            format!("Loading{}", loading_dots(tick)),
            Style::default().fg(Color::Yellow),
        )));
    } else if browse.error {
        lines.push(Line::from(Span::styled(
            "Could not load that entry. Try another number or name.",
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(pokemon) = browse.pokemon.as_ref() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("#{}", browse.display_id()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                pokemon.name.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!("Type: {}", pokemon.types.join(" / "))));
        lines.push(Line::from(format!("Sprite: {}", browse.sprite_url())));
        lines.push(Line::default());

        let stats = STAT_ROWS
            .iter()
            .map(|(label, name)| format!("{label} {:>3}", browse.stat(name)))
            .collect::<Vec<_>>()
            .join("   ");
        lines.push(Line::from(stats));
        lines.push(Line::default());
        lines.push(Line::from(browse.description.clone()));
    }

    let card = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BrowseState, Pokemon, PokemonStat};
    use tui_dispatch::testing::*;

    fn loaded_state() -> AppState {
        AppState {
            browse: BrowseState {
                current_id: 25,
                pokemon: Some(Pokemon {
                    id: 25,
                    name: "pikachu".into(),
                    types: vec!["electric".into()],
                    stats: vec![PokemonStat {
                        name: "speed".into(),
                        value: 90,
                    }],
                    sprite_default: Some("static.png".into()),
                    sprite_animated: None,
                    sprite_showdown: None,
                }),
                description: "Mouse Pokemon.".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_handle_event_paging() {
        let mut component = BrowseView;
        let state = loaded_state();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("l")),
                BrowseViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::BrowseNext);

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("h")),
                BrowseViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::BrowsePrev);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = BrowseView;
        let state = loaded_state();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("l")),
                BrowseViewProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loaded_entry() {
        let mut render = RenderHarness::new(70, 24);
        let mut component = BrowseView;
        let state = loaded_state();

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                BrowseViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("#025"));
        assert!(output.contains("PIKACHU"));
        assert!(output.contains("Mouse Pokemon."));
        assert!(output.contains("SPD  90"));
    }

    #[test]
    fn test_render_error_entry() {
        let mut render = RenderHarness::new(70, 24);
        let mut component = BrowseView;
        let state = AppState {
            browse: BrowseState {
                error: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                BrowseViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Could not load"));
    }
}
