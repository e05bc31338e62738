//! Lookup view - identifier-driven detail card
//!
//! The second lookup surface: navigation writes an identifier the way a
//! route parameter would, and both records are fetched together. Unknown
//! stats render as "--" and the flavor text degrades through its
//! placeholders instead of failing the card.

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
use crate::state::{AppState, LookupState};

/// Stats shown in this view, in template order
const STAT_ROWS: [(&str, &str); 6] = [
    ("HP", "hp"),
    ("ATK", "attack"),
    ("DEF", "defense"),
    ("SPA", "special-attack"),
    ("SPD", "special-defense"),
    ("SPE", "speed"),
];

pub struct LookupViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct LookupView;

impl Component<Action> for LookupView {
    type Props<'a> = LookupViewProps<'a>;

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
                KeyCode::Right | KeyCode::Char('l') => Some(Action::LookupNext),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::LookupPrev),
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
            Constraint::Min(1),    // Detail card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_detail(frame, chunks[0], &props.state.lookup, props.state.tick);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("←/→", "adjacent entry"),
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("tab", "browse view"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_detail(frame: &mut Frame, area: Rect, lookup: &LookupState, tick: u64) {
    let mut lines: Vec<Line> = Vec::new();

    if lookup.loading {
        lines.push(Line::from(Span::styled(
            format!("Loading{}", loading_dots(tick)),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = lookup.error.as_deref() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    if lookup.pokemon.is_none() && !lookup.loading && lookup.error.is_none() {
        lines.push(Line::from(Span::styled(
            "Press / to look up a Pokemon by name or number.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(pokemon) = lookup.pokemon.as_ref() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("#{}", lookup.display_id()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                pokemon.name.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!("Primary type: {}", lookup.primary_type())));
        lines.push(Line::from(format!("Sprite: {}", lookup.sprite_url())));
        lines.push(Line::default());

        let stats = STAT_ROWS
            .iter()
            .map(|(label, name)| format!("{label} {:>3}", lookup.stat(name)))
            .collect::<Vec<_>>()
            .join("   ");
        lines.push(Line::from(stats));
        lines.push(Line::default());
        lines.push(Line::from(lookup.flavor_text()));
    }

    let card = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(card, area);
}
