//! Declarative drawing vocabulary handed to the presentation surface.
//!
//! All coordinates are canvas pixels with the margins already applied, so a
//! surface only has to paint commands in order.

use glam::Vec2;

use crate::feature::FeatureCategory;
use crate::selection::SelectionKey;
use crate::util::color::Rgb;

/// Geometry of one draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        origin: Vec2,
        /// Width and height.
        size: Vec2,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
    },
    /// Triangle.
    Triangle {
        /// Corners.
        points: [Vec2; 3],
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
    },
    /// Text label, right-aligned: the anchor is where the text ends, so
    /// labels hang off the axes they annotate.
    Text {
        /// End point of the text baseline.
        anchor: Vec2,
        /// Label text.
        content: String,
        /// Rotation around the anchor in degrees (clockwise).
        rotation: f32,
        /// Font size in pixels.
        font_size: f32,
        /// Bold weight.
        bold: bool,
    },
}

/// Outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Outline color.
    pub color: Rgb,
    /// Outline width in pixels.
    pub width: f32,
}

/// Pointer shown while hovering a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Platform default arrow.
    #[default]
    Default,
    /// Clickable.
    Pointer,
    /// Has a help/tooltip affordance.
    Help,
}

/// What a click on a shape refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// A single glyph.
    Glyph(SelectionKey),
    /// A whole lane, via its label.
    Lane(FeatureCategory),
}

/// One shape to paint, with its interaction metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Geometry.
    pub shape: Shape,
    /// Fill color; `None` for unfilled shapes and lines.
    pub fill: Option<Rgb>,
    /// Outline; `None` for no outline.
    pub stroke: Option<Stroke>,
    /// Hover cursor.
    pub cursor: Cursor,
    /// Click handler reference; `None` for inert shapes.
    pub on_click: Option<ClickTarget>,
    /// Glyph whose tooltip is shown on hover, computed on demand.
    pub hover: Option<SelectionKey>,
    /// Whether the shape is drawn with selection emphasis.
    pub emphasized: bool,
}

impl DrawCommand {
    /// Inert shape with no fill, stroke, or interaction.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            cursor: Cursor::Default,
            on_click: None,
            hover: None,
            emphasized: false,
        }
    }

    /// Stroked line segment.
    #[must_use]
    pub fn line(from: Vec2, to: Vec2, color: Rgb) -> Self {
        Self::new(Shape::Line { from, to }).with_stroke(color, 1.0)
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set the outline.
    #[must_use]
    pub fn with_stroke(mut self, color: Rgb, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    /// Set the hover cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Attach a click handler (and the pointer cursor).
    #[must_use]
    pub fn clickable(mut self, target: ClickTarget) -> Self {
        self.on_click = Some(target);
        self.cursor = Cursor::Pointer;
        self
    }
}
