//! Stateless UI rendering: a side view of the board plus a status bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Line},
    },
};
use towers_core::{BoardGeometry, DiscColor, DiscId, DiscPose, PegId, PuzzleSession};

use super::app::App;
use super::input::HELP;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(10),   // Board
            Constraint::Length(4), // Status
        ])
        .split(frame.area());

    let title = Paragraph::new("Towers of Hanoi")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);
    draw_status(frame, chunks[2], app);

    if *app.show_help() {
        draw_help(frame, chunks[1]);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let geometry = session.board().geometry().clone();
    let half_width = geometry.board_width() / 2.0;
    let top = geometry.lift_height() + geometry.peg_base_radius() * 1.5;
    let selected = *app.selected();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-half_width, half_width])
        .y_bounds([0.0, top])
        .paint(move |ctx| {
            paint_pegs(ctx, session, &geometry, selected);
            ctx.layer();
            for (disc, pose) in session.discs().iter() {
                paint_disc(ctx, &geometry, disc, pose);
            }
        });
    frame.render_widget(canvas, area);
}

fn paint_pegs(ctx: &mut Context, session: &PuzzleSession, geometry: &BoardGeometry, selected: Option<PegId>) {
    let half_width = geometry.board_width() / 2.0;
    ctx.draw(&Line::new(-half_width, 0.0, half_width, 0.0, Color::Gray));

    for peg in session.board().pegs() {
        let x = peg
            .slot_position(0)
            .map_or((peg.id().index() as f64 - 1.0) * geometry.peg_spacing(), |p| p.x);
        let color = if selected == Some(peg.id()) {
            Color::LightYellow
        } else {
            Color::DarkGray
        };
        ctx.draw(&Line::new(x, 0.0, x, *geometry.peg_height(), color));
        ctx.print(x, 0.0, Span::styled(format!("{}", peg.id().index() + 1), Style::default().fg(color)));
    }
}

/// A disc seen edge-on: a segment across its face, tilted by its normal.
fn paint_disc(ctx: &mut Context, geometry: &BoardGeometry, disc: DiscId, pose: &DiscPose) {
    let [r, g, b] = DiscColor::for_disc(disc).rgb();
    let color = Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);

    // In the XZ view plane the face runs perpendicular to the normal.
    let (nx, nz) = (pose.normal.x, pose.normal.z);
    let len = (nx * nx + nz * nz).sqrt();
    let (ux, uz) = if len > 0.0 { (nz / len, -nx / len) } else { (1.0, 0.0) };
    let (tx, tz) = if len > 0.0 { (nx / len, nz / len) } else { (0.0, 1.0) };

    let radius = geometry.disc_radius(disc.index());
    let half_tube = geometry.tube_radius() / 2.0;
    for offset in [-half_tube, 0.0, half_tube] {
        let cx = pose.position.x + tx * offset;
        let cz = pose.position.z + tz * offset;
        ctx.draw(&Line::new(
            cx - ux * radius,
            cz - uz * radius,
            cx + ux * radius,
            cz + uz * radius,
            color,
        ));
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let speed = session.speed();
    let light = session.light();

    let mut state = vec![Span::raw(format!("Speed {} fps ({}%)", speed.fps(), speed.percent()))];
    if app.clock().is_paused() {
        state.push(Span::styled("  PAUSED", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)));
    }
    if session.is_solving() {
        state.push(Span::raw(format!("  Solving, {} queued", session.queue().len())));
    }
    let mode = if light.is_directional() { "directional" } else { "positional" };
    let orbit = if light.auto_motion() { ", orbiting" } else { "" };
    state.push(Span::raw(format!(
        "  Light {} {:.2} rad, h {:.1}{}",
        mode,
        light.angle(),
        light.height(),
        orbit
    )));

    let text = vec![
        TextLine::from(state),
        TextLine::from(Span::styled(
            app.status_message().as_str(),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let lines: Vec<TextLine> = HELP
        .iter()
        .map(|(key, what)| {
            TextLine::from(vec![
                Span::styled(format!("{:>8}  ", key), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect();
    let popup = center_rect(area, 48, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Keys").borders(Borders::ALL)),
        popup,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
