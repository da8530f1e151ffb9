//! # Drawing Surface
//!
//! The single seam between layout and any concrete backend. Composers in
//! [`crate::layout`] are generic over [`Surface`] and only ever issue these
//! four primitives at absolute page coordinates (millimetres, origin at the
//! top-left corner, `y` growing downwards).
//!
//! Production layout draws into a [`DisplayList`], which records each call as
//! a [`DrawCommand`]. The PDF writer later replays the list against its own
//! surface. Tests inspect the list directly; no PDF is involved.

use crate::style::{Color, LineStyle, TextStyle};

/// Capability set every rendering backend provides.
///
/// No method may fail for finite coordinates. Text longer than
/// `style.max_width` is the surface's problem to truncate, not the caller's.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64);

    /// Draw `text` with its baseline at `y`, anchored at `x` per `style.align`.
    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle);

    /// Filled rectangle with rounded corners. Backends without curves may
    /// keep the default square corners.
    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, _radius: f64, color: Color) {
        self.fill_rect(x, y, w, h, color);
    }
}

/// One recorded drawing call, with every coordinate resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        radius: f64,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        line_width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
}

impl DrawCommand {
    /// The text of a `Text` command.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Lowest point (largest `y`) the command touches.
    pub fn bottom(&self) -> f64 {
        match self {
            DrawCommand::FillRect { y, h, .. } | DrawCommand::StrokeRect { y, h, .. } => y + h,
            DrawCommand::Text { y, .. } => *y,
            DrawCommand::Line { y1, y2, .. } => y1.max(*y2),
        }
    }

    /// Highest point (smallest `y`) the command touches. Text reaches up to
    /// the font ascender; descenders are ignored by [`DrawCommand::bottom`].
    pub fn top(&self) -> f64 {
        match self {
            DrawCommand::FillRect { y, .. } | DrawCommand::StrokeRect { y, .. } => *y,
            DrawCommand::Text { y, style, .. } => {
                y - style.size * crate::font::ASCENDER * crate::font::MM_PER_PT
            }
            DrawCommand::Line { y1, y2, .. } => y1.min(*y2),
        }
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        let values: [f64; 5] = match self {
            DrawCommand::FillRect { x, y, w, h, radius, .. } => [*x, *y, *w, *h, *radius],
            DrawCommand::StrokeRect { x, y, w, h, line_width, .. } => [*x, *y, *w, *h, *line_width],
            DrawCommand::Text { x, y, style, .. } => {
                [*x, *y, style.size, style.max_width.unwrap_or(0.0), 0.0]
            }
            DrawCommand::Line { x1, y1, x2, y2, style } => [*x1, *y1, *x2, *y2, style.width],
        };
        values.iter().all(|v| v.is_finite())
    }

    /// Replay this command against another surface.
    pub fn draw_on<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::FillRect { x, y, w, h, color, radius } => {
                if *radius > 0.0 {
                    surface.fill_rounded_rect(*x, *y, *w, *h, *radius, *color);
                } else {
                    surface.fill_rect(*x, *y, *w, *h, *color);
                }
            }
            DrawCommand::StrokeRect { x, y, w, h, color, line_width } => {
                surface.stroke_rect(*x, *y, *w, *h, *color, *line_width);
            }
            DrawCommand::Text { x, y, text, style } => surface.text(*x, *y, text, style),
            DrawCommand::Line { x1, y1, x2, y2, style } => surface.line(*x1, *y1, *x2, *y2, style),
        }
    }
}

/// A surface that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text runs, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    /// Replay every recorded command, in order, against `surface`.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            command.draw_on(surface);
        }
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color, radius: 0.0 });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h, color, line_width });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            style: *style,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2, style: *style });
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color, radius });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::palette;

    #[test]
    fn test_display_list_records_in_order() {
        let mut list = DisplayList::new();
        list.fill_rect(0.0, 0.0, 10.0, 5.0, palette::GREEN);
        list.text(1.0, 4.0, "Hola", &TextStyle::new(6.0));
        list.line(0.0, 5.0, 10.0, 5.0, &LineStyle::solid(palette::MUTED, 0.25));

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Hola"]);
        assert!(matches!(list.commands()[2], DrawCommand::Line { .. }));
    }

    #[test]
    fn test_replay_reproduces_list() {
        let mut list = DisplayList::new();
        list.fill_rounded_rect(11.0, 1.5, 12.0, 12.0, 1.5, palette::WHITE);
        list.stroke_rect(11.0, 20.0, 32.0, 3.9, palette::RULE, 0.18);
        list.line(5.0, 139.7, 210.9, 139.7, &LineStyle::dashed(palette::CUT, 0.2, 2.5, 1.5));

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }

    #[test]
    fn test_extent_helpers() {
        let rect = DrawCommand::FillRect {
            x: 0.0, y: 10.0, w: 5.0, h: 3.5, color: palette::GOLD, radius: 0.0,
        };
        assert_eq!(rect.top(), 10.0);
        assert_eq!(rect.bottom(), 13.5);
        assert!(rect.is_finite());

        let bad = DrawCommand::Line {
            x1: 0.0, y1: f64::NAN, x2: 1.0, y2: 1.0,
            style: LineStyle::solid(palette::CUT, 0.2),
        };
        assert!(!bad.is_finite());
    }
}
