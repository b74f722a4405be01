//! A single-layout modal screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::engine::ScreenInstance;
use crate::tui::component::Component;

pub struct SingleModalScreen {
    instance: ScreenInstance,
}

impl SingleModalScreen {
    pub fn new(instance: ScreenInstance) -> Self {
        Self { instance }
    }
}

impl Component for SingleModalScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .instance
            .options
            .title
            .clone()
            .unwrap_or_else(|| "Modal".to_string());
        let body = format!(
            "Modal layer. The screen beneath is suspended until this\n\
             layer is dismissed.\n\
             \n\
             component id: {}\n\
             \n\
             m  nest another modal   d  dismiss modal\n\
             D  dismiss all modals   c  top-bar close button\n\
             Esc  system back",
            self.instance.id
        );
        let paragraph = Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
