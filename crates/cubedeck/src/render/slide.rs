use eframe::egui::{self, Color32, FontId, Pos2};
use std::sync::Arc;

use crate::deck::Slide;
use crate::render::animator::Props;
use crate::theme::Theme;

/// Draw one slide. `props` come from the slide's own tween; `element` gives
/// the entrance props of each element line.
///
/// Text is laid out uncoloured and tinted at paint time.
pub fn render(
    painter: &egui::Painter,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    props: Props,
    element: impl Fn(usize) -> Props,
) {
    if props.opacity <= 0.0 {
        return;
    }

    let zoom = scale * props.scale;
    let center = rect.center();
    let padding = 80.0 * scale;
    let width = (rect.width() - padding * 2.0).max(1.0) * props.scale;

    // Slides with a subtitle are title slides: bigger heading, centered taglines
    let title_slide = slide.subtitle.is_some();
    let heading_size = if title_slide {
        theme.title_size
    } else {
        theme.heading_size
    };

    let heading = painter.layout(
        slide.heading.clone(),
        FontId::proportional(heading_size * zoom),
        Color32::PLACEHOLDER,
        width,
    );
    let subtitle = slide.subtitle.as_ref().map(|s| {
        painter.layout(
            s.clone(),
            FontId::proportional(theme.subtitle_size * zoom),
            Color32::PLACEHOLDER,
            width,
        )
    });
    let elements: Vec<Arc<egui::Galley>> = slide
        .elements
        .iter()
        .map(|e| {
            painter.layout(
                e.clone(),
                FontId::proportional(theme.body_size * zoom),
                Color32::PLACEHOLDER,
                width,
            )
        })
        .collect();

    let heading_gap = 40.0 * zoom;
    let line_gap = 24.0 * zoom;
    let mut total = heading.rect.height() + heading_gap;
    if let Some(ref s) = subtitle {
        total += s.rect.height() + heading_gap;
    }
    total += elements
        .iter()
        .map(|g| g.rect.height() + line_gap)
        .sum::<f32>();

    let mut y = center.y - total / 2.0;

    let heading_color = Theme::with_opacity(theme.heading_color, props.opacity);
    let heading_h = heading.rect.height();
    painter.galley(
        Pos2::new(center.x - heading.rect.width() / 2.0, y),
        heading,
        heading_color,
    );
    y += heading_h;

    // Accent rule under the heading
    let rule = egui::Rect::from_center_size(
        Pos2::new(center.x, y + heading_gap / 2.0),
        egui::vec2(120.0 * zoom, 4.0 * zoom),
    );
    painter.rect_filled(
        rule,
        2.0 * zoom,
        Theme::with_opacity(theme.accent, props.opacity),
    );
    y += heading_gap;

    if let Some(galley) = subtitle {
        let h = galley.rect.height();
        painter.galley(
            Pos2::new(center.x - galley.rect.width() / 2.0, y),
            galley,
            Theme::with_opacity(theme.accent, props.opacity),
        );
        y += h + heading_gap;
    }

    for (i, galley) in elements.into_iter().enumerate() {
        let p = element(i);
        let opacity = props.opacity * p.opacity;
        let h = galley.rect.height();
        if opacity > 0.0 {
            let top = y + p.offset_y * zoom;
            let left = center.x - galley.rect.width() / 2.0;
            if !title_slide {
                painter.circle_filled(
                    Pos2::new(left - 24.0 * zoom, top + h / 2.0),
                    6.0 * zoom * p.scale,
                    Theme::with_opacity(theme.accent, opacity),
                );
            }
            painter.galley(
                Pos2::new(left, top),
                galley,
                Theme::with_opacity(theme.foreground, opacity),
            );
        }
        y += h + line_gap;
    }
}
