use ratatui::Frame;
use ratatui::layout::Rect;

/// A renderable piece of the playground UI.
///
/// Screens receive their data as props when the registry builds them for a
/// presented instance, and render into whatever area the layer layout
/// assigns. `render` takes `&mut self` so a component can maintain
/// presentation caches, per Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
