use crate::graph::edge::EdgeKey;
use crate::graph::node::Position;
use crate::render::surface::{Canvas, VisualClass};
use crate::solver::SolverBackend;
use crate::state::panels::EMPTY;
use crate::state::sync::SyncState;
use crate::tui::app::{App, Mode, NoticeLevel};
use crate::tui::tabs::Panel;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{self, Context};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap};

pub fn draw_app<B: SolverBackend>(frame: &mut Frame, app: &App<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_tabs(app), chunks[1]);
    match app.tabs().active() {
        Panel::Visualization => draw_visualization(frame, app, chunks[2]),
        Panel::Summary => frame.render_widget(build_summary(app), chunks[2]),
        Panel::Steps => frame.render_widget(build_steps(app), chunks[2]),
        Panel::Assignments => frame.render_widget(build_assignments(app), chunks[2]),
        Panel::Statement => {
            frame.render_widget(build_text(" Statement ", app.statement()), chunks[2])
        }
        Panel::Exercise => draw_exercise(frame, app, chunks[2]),
    }
    frame.render_widget(build_footer(app), chunks[3]);
}

fn build_header<B: SolverBackend>(app: &'_ App<B>) -> Block<'_> {
    let network = app.solver().network();
    let status = match app.sync().state() {
        SyncState::Idle => Span::raw("idle").dim(),
        SyncState::Pending(_) => Span::raw("solving…").yellow(),
        SyncState::Resolved => Span::raw("solved").green(),
        SyncState::Failed(_) => Span::raw("failed").red(),
    };
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Flowlab ").style(Style::default().bold().cyan()),
            Span::raw("—").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(" n=").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(network.node_count().to_string()).bold(),
            Span::raw(" s=").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(network.source().index().to_string()).bold(),
            Span::raw(" t=").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(network.sink().index().to_string()).bold(),
            Span::raw(" — ").style(Style::default().add_modifier(Modifier::DIM)),
            status,
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_tabs<B: SolverBackend>(app: &App<B>) -> Tabs<'static> {
    let active = Panel::ALL
        .iter()
        .position(|p| *p == app.tabs().active())
        .unwrap_or(0);
    Tabs::new(
        Panel::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}", i + 1, p.title())),
    )
    .select(active)
    .highlight_style(Style::default().bold().bg(Color::DarkGray).fg(White))
}

fn build_footer<B: SolverBackend>(app: &'_ App<B>) -> Paragraph<'_> {
    let help = match (app.mode(), app.tabs().active()) {
        (Mode::EditingEdges, _) => "type `u v capacity` per line · Esc apply",
        (_, Panel::Exercise) => {
            "r new · d describe · u use in solver · [ ] source · { } sink · \
             < > min · , . max · q quit"
        }
        _ => {
            "Enter solve · g random · a animate · c cancel · e edit · +/- nodes · \
             [ ] source · { } sink · f/w statement · x clear · q quit"
        }
    };
    let line = match app.notice() {
        Some(notice) => {
            let style = match notice.level {
                NoticeLevel::Info => Style::default().green(),
                NoticeLevel::Error => Style::default().red().bold(),
            };
            Line::from(vec![
                Span::raw(format!(" {} ", notice.text)).style(style),
                Span::raw("│ ").dim(),
                Span::raw(help).dim(),
            ])
        }
        None => Line::from(Span::raw(format!(" {help}")).dim()),
    };
    Paragraph::new(line)
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![Span::from(title).style(Style::default().bold())]))
        .padding(Padding::horizontal(1))
}

fn draw_visualization<B: SolverBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(24)])
        .split(area);

    if let Some(surface) = app.solver().surface() {
        draw_surface(frame, surface, " Network ", chunks[0]);
    }

    let editing = app.mode() == Mode::EditingEdges;
    let mut block = titled(" Edges (u v c) ");
    if editing {
        block = block.border_style(Style::default().yellow());
    }
    let text = if editing {
        format!("{}▏", app.edges_text())
    } else {
        app.edges_text().to_string()
    };
    frame.render_widget(Paragraph::new(text).block(block), chunks[1]);
}

fn draw_exercise<B: SolverBackend>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    if let Some(surface) = app.lite().surface() {
        draw_surface(frame, surface, " Exercise ", chunks[0]);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(chunks[1]);

    let exercise = app.exercise();
    let lite = app.lite().network();
    let settings = vec![
        Line::from(vec![
            Span::raw("Source ").dim(),
            Span::raw(lite.display_name(lite.source())).bold(),
            Span::raw("  Sink ").dim(),
            Span::raw(lite.display_name(lite.sink())).bold(),
        ]),
        Line::from(vec![
            Span::raw("Capacities ").dim(),
            Span::raw(format!("{}..={}", exercise.cap_min(), exercise.cap_max())).bold(),
        ]),
    ];
    frame.render_widget(Paragraph::new(settings).block(titled(" Settings ")), right[0]);

    let text = if app.exercise_text().is_empty() {
        "Press r to generate an exercise."
    } else {
        app.exercise_text()
    };
    frame.render_widget(build_text(" Statement ", text), right[1]);
}

/// Paints a surface with the viewport's y axis flipped to screen orientation.
fn draw_surface(frame: &mut Frame, surface: &Canvas, title: &str, area: Rect) {
    let viewport = surface.viewport();
    let flip = |y: f64| viewport.y[0] + viewport.y[1] - y;
    let widget = canvas::Canvas::default()
        .block(titled(title))
        .marker(Marker::Braille)
        .x_bounds(viewport.x)
        .y_bounds(viewport.y)
        .paint(|ctx: &mut Context| {
            for (key, edge) in surface.edges() {
                let Some((a, b)) = endpoints(surface, *key) else {
                    continue;
                };
                let color = if edge.has_class(VisualClass::Highlight) {
                    Color::Green
                } else if edge.has_class(VisualClass::Cut) {
                    Color::Red
                } else {
                    Color::DarkGray
                };
                ctx.draw(&canvas::Line::new(a.x, flip(a.y), b.x, flip(b.y), color));
            }
            ctx.layer();
            for (key, edge) in surface.edges() {
                let Some((a, b)) = endpoints(surface, *key) else {
                    continue;
                };
                let style = if edge.has_class(VisualClass::Highlight) {
                    Style::default().green().bold()
                } else if edge.has_class(VisualClass::Cut) {
                    Style::default().red()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                ctx.print(
                    (a.x + b.x) / 2.0,
                    flip((a.y + b.y) / 2.0),
                    Span::styled(edge.label().to_string(), style),
                );
            }
            for node in surface.nodes().values() {
                let p = node.position();
                ctx.print(
                    p.x,
                    flip(p.y),
                    Span::styled(format!("●{}", node.label()), Style::default().cyan().bold()),
                );
            }
        });
    frame.render_widget(widget, area);
}

fn endpoints(surface: &Canvas, key: EdgeKey) -> Option<(Position, Position)> {
    let nodes = surface.nodes();
    Some((
        nodes.get(&key.from())?.position(),
        nodes.get(&key.to())?.position(),
    ))
}

fn build_summary<B: SolverBackend>(app: &'_ App<B>) -> Paragraph<'_> {
    let panels = app.sync().panels();
    let mut lines = vec![
        Line::from(Span::raw(panels.summary()).bold()),
        Line::from(""),
    ];
    lines.extend(panels.cut().lines().map(Line::from));
    if let SyncState::Failed(reason) = app.sync().state() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::raw(format!("Last request failed: {reason}")).red()));
    }
    Paragraph::new(lines)
        .block(titled(" Summary "))
        .wrap(Wrap { trim: false })
}

fn build_steps<B: SolverBackend>(app: &'_ App<B>) -> Paragraph<'_> {
    let steps = app.sync().panels().steps();
    let lines = if steps.is_empty() {
        vec![Line::from(EMPTY)]
    } else {
        steps.iter().map(|s| Line::from(s.as_str())).collect()
    };
    Paragraph::new(lines)
        .block(titled(" Augmenting paths "))
        .wrap(Wrap { trim: false })
}

fn build_assignments<B: SolverBackend>(app: &'_ App<B>) -> Paragraph<'_> {
    let assignments = app.sync().panels().assignments();
    let lines = if assignments.is_empty() {
        vec![Line::from(EMPTY)]
    } else {
        assignments
            .iter()
            .map(|a| {
                let style = if a.ends_with("= 0") {
                    Style::default().add_modifier(Modifier::DIM)
                } else {
                    Style::default().green()
                };
                Line::from(Span::styled(a.as_str(), style))
            })
            .collect()
    };
    Paragraph::new(lines)
        .block(titled(" Flow assignment "))
        .wrap(Wrap { trim: false })
}

fn build_text<'a>(title: &'a str, text: &'a str) -> Paragraph<'a> {
    Paragraph::new(text)
        .block(titled(title))
        .wrap(Wrap { trim: false })
}
