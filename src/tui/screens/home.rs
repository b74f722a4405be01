//! The playground's root screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::engine::ScreenInstance;
use crate::tui::component::Component;

pub struct HomeScreen {
    instance: ScreenInstance,
}

impl HomeScreen {
    pub fn new(instance: ScreenInstance) -> Self {
        Self { instance }
    }
}

impl Component for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .instance
            .options
            .title
            .clone()
            .unwrap_or_else(|| "Home".to_string());
        let body = format!(
            "Root screen.\n\
             \n\
             component id: {}\n\
             \n\
             2  push detail          m  show modal\n\
             s  show stack modal     o  show overlay\n\
             r  set root             R  set stack root\n\
             q  quit",
            self.instance.id
        );
        let paragraph = Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
