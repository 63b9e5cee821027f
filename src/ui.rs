//! Menu rendering

use image::RgbImage;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
    Frame,
};
use std::path::Path;

use crate::icons::Icon;
use crate::keys::button_name;
use crate::menu::Bindings;

/// Everything needed to draw one frame
pub struct MenuView<'a> {
    pub index: usize,
    pub count: usize,
    pub name: &'a str,
    pub icon: Option<&'a mut Icon>,
    /// Where the icon was looked for, shown when it is missing
    pub icon_path: Option<&'a Path>,
    /// Footer bindings, `None` hides the footer
    pub status: Option<&'a Bindings>,
}

pub fn draw(frame: &mut Frame, view: MenuView<'_>) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

    let (content, footer) = if view.status.is_some() && area.height > 1 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    match view.icon {
        Some(icon) => {
            // Each cell shows two stacked pixels.
            let width = u32::from(content.width);
            let height = u32::from(content.height) * 2;
            if let Some(pixels) = icon.scaled(width, height) {
                frame.render_widget(IconView(pixels), content);
            }
        }
        None => {
            let resource = view
                .icon_path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("{}.png", view.index));
            let text = format!(
                "Missing graphic ({}) for application {}.",
                resource, view.index
            );
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::Black)),
                content,
            );
        }
    }

    if let (Some(bindings), Some(footer)) = (view.status, footer) {
        let line = Line::from(vec![
            Span::raw(format!(" < {} ({}/{}) > ", view.name, view.index, view.count)).bold(),
            Span::raw(format!(
                "  [{}/{}] Select  [{}] Launch  [ESC] Quit",
                button_name(bindings.select_left),
                button_name(bindings.select_right),
                button_name(bindings.confirm),
            )),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(Color::DarkGray).bg(Color::Black)),
            footer,
        );
    }
}

/// Half-block raster of an image already scaled to `width × 2·height`
struct IconView<'a>(&'a RgbImage);

impl Widget for IconView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pixels = self.0;
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (u32::from(col), u32::from(row) * 2);
                if x >= pixels.width() || y + 1 >= pixels.height() {
                    continue;
                }
                let top = pixels.get_pixel(x, y);
                let bottom = pixels.get_pixel(x, y + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(Color::Rgb(top[0], top[1], top[2]))
                        .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_missing_icon_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        let path = PathBuf::from("2.png");
        terminal
            .draw(|f| {
                draw(
                    f,
                    MenuView {
                        index: 2,
                        count: 3,
                        name: "Application 2",
                        icon: None,
                        icon_path: Some(&path),
                        status: None,
                    },
                )
            })
            .unwrap();

        assert!(screen(&terminal).contains("Missing graphic (2.png) for application 2."));
    }

    #[test]
    fn test_icon_fills_content_area() {
        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        let mut icon = Icon::from_image(RgbImage::from_pixel(3, 3, Rgb([0, 0, 0])));
        terminal
            .draw(|f| {
                draw(
                    f,
                    MenuView {
                        index: 1,
                        count: 2,
                        name: "Application 1",
                        icon: Some(&mut icon),
                        icon_path: None,
                        status: None,
                    },
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        for y in 0..3 {
            for x in 0..6 {
                let cell = &buffer[(x, y)];
                assert_eq!(cell.symbol(), "▀");
                assert_eq!(cell.fg, Color::Rgb(0, 0, 0));
            }
        }
    }

    #[test]
    fn test_footer_names_selection_and_keys() {
        let mut terminal = Terminal::new(TestBackend::new(80, 4)).unwrap();
        let bindings = Bindings::default();
        terminal
            .draw(|f| {
                draw(
                    f,
                    MenuView {
                        index: 3,
                        count: 4,
                        name: "Emulator",
                        icon: None,
                        icon_path: None,
                        status: Some(&bindings),
                    },
                )
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Missing graphic (3.png) for application 3."));
        assert!(text.contains("< Emulator (3/4) >"));
        assert!(text.contains("[LEFT/RIGHT] Select  [ENTER] Launch"));
    }
}
