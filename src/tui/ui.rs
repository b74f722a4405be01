//! Frame layout: presented layers plus the live status readout.
//!
//! The base screen fills the main area; each modal layer draws inset over
//! it, and overlays float in the top-right corner. The status panel below
//! renders the tracked [`NavigationStatus`] verbatim, which is the whole
//! point of the playground: watch it move as transitions confirm.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::status::NavigationStatus;
use crate::engine::{Hierarchy, ScreenInstance};
use crate::tui::component::Component;
use crate::tui::screens::ScreenRegistry;

pub fn draw(
    frame: &mut Frame,
    hierarchy: &Hierarchy,
    registry: &ScreenRegistry,
    status: &NavigationStatus,
    message: &str,
) {
    use Constraint::{Length, Min};
    let [main_area, status_area, message_area] =
        Layout::vertical([Min(0), Length(7), Length(1)]).areas(frame.area());

    match hierarchy.root.last() {
        Some(base) => render_screen(frame, registry, base, main_area),
        None => frame.render_widget(
            Paragraph::new("no root set").block(Block::bordered().title("waypoint")),
            main_area,
        ),
    }

    for (depth, layer) in hierarchy.modals.iter().enumerate() {
        if let Some(top) = layer.last() {
            let area = inset(main_area, 2 + 2 * depth as u16);
            frame.render_widget(Clear, area);
            render_screen(frame, registry, top, area);
        }
    }

    for (index, overlay) in hierarchy.overlays.iter().enumerate() {
        let area = overlay_rect(main_area, index as u16);
        frame.render_widget(Clear, area);
        render_screen(frame, registry, overlay, area);
    }

    draw_status_panel(frame, status_area, status);

    frame.render_widget(
        Paragraph::new(message).style(Style::default().add_modifier(Modifier::DIM)),
        message_area,
    );
}

fn render_screen(
    frame: &mut Frame,
    registry: &ScreenRegistry,
    instance: &ScreenInstance,
    area: Rect,
) {
    match registry.build(instance) {
        Some(mut screen) => screen.render(frame, area),
        None => frame.render_widget(
            Paragraph::new(format!("unregistered screen: {}", instance.name))
                .block(Block::bordered()),
            area,
        ),
    }
}

fn draw_status_panel(frame: &mut Frame, area: Rect, status: &NavigationStatus) {
    let id_or_dash = |id: &Option<crate::engine::ComponentId>| {
        id.as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let stack = if status.previous_stack_component_ids.is_empty() {
        "(empty)".to_string()
    } else {
        status
            .previous_stack_component_ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let command = status
        .command_type
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| "-".to_string());

    let updating_style = if status.updating {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("updating: "),
            Span::styled(status.updating.to_string(), updating_style),
            Span::raw("   command: "),
            Span::raw(command),
        ]),
        Line::from(format!("current:  {}", id_or_dash(&status.current_component_id))),
        Line::from(format!(
            "previous: {}",
            id_or_dash(&status.previous_component_id)
        )),
        Line::from(format!("stack:    {stack}")),
        Line::from(Span::styled(
            "1/2 push  b pop  g/t pop-to  m/s modal  o overlay  d/D/x dismiss  Esc back  q quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("navigation status")),
        area,
    );
}

fn inset(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 3).min(area.height / 3);
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

fn overlay_rect(area: Rect, index: u16) -> Rect {
    let width = 36.min(area.width);
    let height = 5.min(area.height);
    let x = area.x + area.width.saturating_sub(width + 1);
    let y = area.y + 1 + index * height;
    Rect {
        x,
        y: y.min(area.y + area.height.saturating_sub(height)),
        width,
        height,
    }
}
