//! Top screen of the stacked modal layout.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::engine::ScreenInstance;
use crate::tui::component::Component;

pub struct StackModalScreen {
    instance: ScreenInstance,
}

impl StackModalScreen {
    pub fn new(instance: ScreenInstance) -> Self {
        Self { instance }
    }
}

impl Component for StackModalScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .instance
            .options
            .title
            .clone()
            .unwrap_or_else(|| "Stack modal".to_string());
        let body = format!(
            "Modal presented as a stack: two screens arrived in one\n\
             layout, this one on top. Popping stays inside the layer.\n\
             \n\
             component id: {}\n\
             \n\
             b  pop within the modal stack\n\
             d  dismiss modal        D  dismiss all modals",
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
