//! A pushable screen for exercising stack navigation.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::engine::ScreenInstance;
use crate::tui::component::Component;

pub struct DetailScreen {
    instance: ScreenInstance,
}

impl DetailScreen {
    pub fn new(instance: ScreenInstance) -> Self {
        Self { instance }
    }
}

impl Component for DetailScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self
            .instance
            .options
            .title
            .clone()
            .unwrap_or_else(|| "Detail".to_string());
        let props = self
            .instance
            .props
            .as_ref()
            .map(|props| format!("props: {props}\n"))
            .unwrap_or_default();
        let body = format!(
            "Pushed screen. Push again to nest deeper.\n\
             \n\
             component id: {}\n\
             {props}\n\
             2  push another         b  pop\n\
             g  pop to first         t  pop to root\n\
             m  show modal           o  show overlay",
            self.instance.id
        );
        let paragraph = Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
