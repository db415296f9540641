//! SVG surface for [`DrawCommand`] lists.
//!
//! Clickable shapes carry a `data-key` attribute with the selection key (or
//! lane label) they refer to, and a `glyph` or `lane` class, so a host page
//! can wire click handlers without re-deriving geometry.

use svg::node::element::{Circle, Line, Polygon, Rectangle, Text};
use svg::{Document, Node};

use super::draw::{ClickTarget, Cursor, DrawCommand, Shape};

/// Paint `commands` in order onto a `width` × `height` document.
#[must_use]
pub fn to_document(commands: &[DrawCommand], width: f32, height: f32) -> Document {
    commands.iter().fold(
        Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height)
            .set("font-family", "sans-serif"),
        paint,
    )
}

/// [`to_document`] serialized to markup.
#[must_use]
pub fn to_markup(commands: &[DrawCommand], width: f32, height: f32) -> String {
    to_document(commands, width, height).to_string()
}

fn paint(doc: Document, cmd: &DrawCommand) -> Document {
    match &cmd.shape {
        Shape::Rect { origin, size } => doc.add(decorate(
            Rectangle::new()
                .set("x", origin.x)
                .set("y", origin.y)
                .set("width", size.x)
                .set("height", size.y),
            cmd,
        )),
        Shape::Circle { center, radius } => doc.add(decorate(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", *radius),
            cmd,
        )),
        Shape::Triangle { points } => {
            let points = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            doc.add(decorate(Polygon::new().set("points", points), cmd))
        }
        Shape::Line { from, to } => doc.add(decorate(
            Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y),
            cmd,
        )),
        Shape::Text {
            anchor,
            content,
            rotation,
            font_size,
            bold,
        } => {
            let mut text = Text::new(content.as_str())
                .set("x", anchor.x)
                .set("y", anchor.y)
                .set("font-size", *font_size)
                .set("text-anchor", "end");
            if *bold {
                text = text.set("font-weight", "bold");
            }
            if *rotation != 0.0 {
                text = text.set(
                    "transform",
                    format!("rotate({rotation} {} {})", anchor.x, anchor.y),
                );
            }
            doc.add(decorate(text, cmd))
        }
    }
}

/// Paint and interaction attributes shared by every shape.
fn decorate<N: Node>(mut node: N, cmd: &DrawCommand) -> N {
    match cmd.fill {
        Some(fill) => node.assign("fill", fill.to_hex()),
        None => node.assign("fill", "none"),
    }
    if let Some(stroke) = cmd.stroke {
        node.assign("stroke", stroke.color.to_hex());
        node.assign("stroke-width", stroke.width);
    }
    if let Some(cursor) = cursor_keyword(cmd.cursor) {
        node.assign("cursor", cursor);
    }
    match &cmd.on_click {
        Some(ClickTarget::Glyph(key)) => {
            node.assign("class", "glyph");
            node.assign("data-key", key.as_str());
        }
        Some(ClickTarget::Lane(category)) => {
            node.assign("class", "lane");
            node.assign("data-key", category.label());
        }
        None => {}
    }
    node
}

const fn cursor_keyword(cursor: Cursor) -> Option<&'static str> {
    match cursor {
        Cursor::Default => None,
        Cursor::Pointer => Some("pointer"),
        Cursor::Help => Some("help"),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::feature::FeatureCategory;
    use crate::selection::SelectionKey;
    use crate::util::color::Rgb;

    #[test]
    fn clickable_glyph_carries_key() {
        let key = SelectionKey::instance(FeatureCategory::MissenseVariant, 4);
        let cmd = DrawCommand::new(Shape::Circle {
            center: Vec2::new(10.0, 20.0),
            radius: 5.0,
        })
        .with_fill(Rgb::new(0, 0, 255))
        .clickable(ClickTarget::Glyph(key));

        let markup = to_markup(&[cmd], 100.0, 50.0);
        assert!(markup.contains("<circle"));
        assert!(markup.contains(r#"data-key="gnomAD missense-4""#));
        assert!(markup.contains(r##"fill="#0000FF""##));
        assert!(markup.contains(r#"cursor="pointer""#));
    }

    #[test]
    fn rotated_label() {
        let cmd = DrawCommand::new(Shape::Text {
            anchor: Vec2::new(30.0, 40.0),
            content: "200".to_owned(),
            rotation: -45.0,
            font_size: 14.0,
            bold: true,
        });
        let markup = to_markup(&[cmd], 100.0, 50.0);
        // The svg writer puts text content on its own line.
        assert!(markup.contains("\n200\n</text>"));
        assert!(markup.contains(r#"transform="rotate(-45 30 40)""#));
        assert!(markup.contains(r#"font-weight="bold""#));
        assert!(markup.contains(r#"text-anchor="end""#));
    }

    #[test]
    fn triangle_and_line() {
        let cmds = [
            DrawCommand::new(Shape::Triangle {
                points: [
                    Vec2::new(0.0, 10.0),
                    Vec2::new(10.0, -10.0),
                    Vec2::new(-10.0, -10.0),
                ],
            })
            .with_stroke(Rgb::BLACK, 2.5),
            DrawCommand::line(Vec2::ZERO, Vec2::new(0.0, 6.0), Rgb::BLACK),
        ];
        let markup = to_markup(&cmds, 10.0, 10.0);
        assert!(markup.contains(r#"points="0,10 10,-10 -10,-10""#));
        assert!(markup.contains(r#"stroke-width="2.5""#));
        assert!(markup.contains("<line"));
    }
}
