//! A floating overlay screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::engine::ScreenInstance;
use crate::tui::component::Component;

pub struct SingleOverlayScreen {
    instance: ScreenInstance,
}

impl SingleOverlayScreen {
    pub fn new(instance: ScreenInstance) -> Self {
        Self { instance }
    }
}

impl Component for SingleOverlayScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .instance
            .options
            .title
            .clone()
            .unwrap_or_else(|| "Overlay".to_string());
        let pass_through = self.instance.options.pass_through.unwrap_or(false);
        let body = format!(
            "id: {}\n\
             pass-through: {pass_through}\n\
             x  dismiss overlay",
            self.instance.id
        );
        let paragraph = Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
