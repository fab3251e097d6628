use crate::app::{App, LEGEND_WIDTH};
use crate::braille::BrailleCanvas;
use crate::encode::DEPTH_BUCKETS;
use crate::map::MapLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map row and status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map + legend
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if app.renderer.settings.show_legend {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
            .split(rows[0]);
        render_map(frame, app, columns[0]);
        render_legend(frame, app, columns[1]);
    } else {
        render_map(frame, app, rows[0]);
    }

    render_status_bar(frame, app, rows[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.basemap.style.palette().chrome))
        .title(Span::styled(
            " Earthquakes, past 7 days ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Render at the actual pane size; braille gives 2x4 pixels per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .renderer
        .render(inner.width as usize, inner.height as usize, &viewport);

    frame.render_widget(
        MapWidget {
            layers,
            palette: app.basemap.style.palette(),
        },
        inner,
    );

    if let Some(marker) = app.hovered_marker() {
        render_popup(frame, app, inner, &marker.popup);
    }
}

/// Stacks the per-color layer canvases into the frame buffer.
struct MapWidget {
    layers: MapLayers,
    palette: crate::basemap::Palette,
}

impl MapWidget {
    /// Render one braille canvas in a single color
    fn render_layer(&self, canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: coastline, fault lines, marker strokes, then one
        // layer per depth bucket so every bucket keeps its own color.
        self.render_layer(&self.layers.basemap, self.palette.coastline, area, buf);
        self.render_layer(&self.layers.boundaries, self.palette.boundary, area, buf);
        self.render_layer(&self.layers.strokes, Color::DarkGray, area, buf);
        for (canvas, &(_, hex)) in self.layers.markers.iter().zip(DEPTH_BUCKETS.iter()) {
            self.render_layer(canvas, hex_color(hex), area, buf);
        }
    }
}

/// Popup near the cursor, clamped to the map pane.
fn render_popup(frame: &mut Frame, app: &App, map_area: Rect, popup: &str) {
    let Some((col, row)) = app.mouse_pos else {
        return;
    };

    let lines: Vec<&str> = popup.lines().collect();
    let width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2)
        .min(map_area.width);
    let height = (lines.len() as u16 + 2).min(map_area.height);

    // Prefer below-right of the cursor, flip when it would overflow
    let mut x = col.saturating_add(2);
    let mut y = row.saturating_add(1);
    if x + width > map_area.right() {
        x = col.saturating_sub(width + 1).max(map_area.left());
    }
    if y + height > map_area.bottom() {
        y = row.saturating_sub(height).max(map_area.top());
    }

    let area = Rect::new(x, y, width, height).intersection(map_area);
    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        ),
        area,
    );
}

/// Legend panel: one swatch and range per depth bucket.
fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .legend
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(hex_color(entry.color))),
                Span::raw(entry.label.clone()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.basemap.style.palette().chrome))
            .title(" Depth (km) "),
    );
    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.renderer.settings;
    let on = Style::default().fg(Color::Green);
    let off = Style::default().fg(Color::DarkGray);
    let dim = Style::default().fg(Color::DarkGray);

    let status = Line::from(vec![
        Span::styled(" Style: ", dim),
        Span::styled(app.basemap.style.name(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", dim),
        Span::styled(
            if settings.show_earthquakes { "[E]quakes " } else { "[e]quakes " },
            if settings.show_earthquakes { on } else { off },
        ),
        Span::styled(
            if settings.show_boundaries { "[F]aults " } else { "[f]aults " },
            if settings.show_boundaries { on } else { off },
        ),
        Span::styled(
            if settings.show_legend { "[L]egend " } else { "[l]egend " },
            if settings.show_legend { on } else { off },
        ),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} events ", app.renderer.markers.len()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled("| ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" @ ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", dim),
        Span::styled(app.basemap.attribution(), dim),
        Span::styled(" | hjkl:pan +/-:zoom s:style r:reset q:quit", dim),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}

/// Parse a `#rgb` or `#rrggbb` hex color; anything else falls back to white.
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Color::White,
    };
    match (
        u8::from_str_radix(&expanded[0..2], 16),
        u8::from_str_radix(&expanded[2..4], 16),
        u8::from_str_radix(&expanded[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}
