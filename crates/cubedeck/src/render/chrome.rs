//! Everything drawn around the slide: progress bar, counter, buttons, the
//! navigator panel and the start overlay.

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Stroke, pos2, vec2};

use crate::presentation::input::PointerTarget;
use crate::presentation::navigator::Thumbnail;
use crate::theme::Theme;

const PROGRESS_HEIGHT: f32 = 6.0;
const BUTTON_SIZE: f32 = 56.0;
const BUTTON_GAP: f32 = 16.0;
const BUTTON_MARGIN: f32 = 40.0;
const PANEL_WIDTH: f32 = 420.0;
const PANEL_PADDING: f32 = 20.0;
const PANEL_HEADER: f32 = 48.0;
const THUMB_HEIGHT: f32 = 96.0;
const THUMB_SPACING: f32 = 10.0;

/// Screen geometry of the chrome for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    pub rect: Rect,
    pub scale: f32,
    pub progress_track: Rect,
    pub previous: Rect,
    pub navigator: Rect,
    pub next: Rect,
    pub panel: Rect,
    pub thumbnails: Vec<Rect>,
}

impl ChromeLayout {
    pub fn new(rect: Rect, scale: f32, thumbnail_count: usize) -> Self {
        let progress_track =
            Rect::from_min_size(rect.left_top(), vec2(rect.width(), PROGRESS_HEIGHT * scale));

        let size = BUTTON_SIZE * scale;
        let gap = BUTTON_GAP * scale;
        let top = rect.bottom() - BUTTON_MARGIN * scale - size;
        let cx = rect.center().x;
        let navigator = Rect::from_min_size(pos2(cx - size / 2.0, top), vec2(size, size));
        let previous = navigator.translate(vec2(-(size + gap), 0.0));
        let next = navigator.translate(vec2(size + gap, 0.0));

        let panel_width = (PANEL_WIDTH * scale).min(rect.width());
        let panel = Rect::from_min_max(pos2(rect.right() - panel_width, rect.top()), rect.right_bottom());

        let padding = PANEL_PADDING * scale;
        let spacing = THUMB_SPACING * scale;
        let list_top = panel.top() + padding + PANEL_HEADER * scale;
        let available = panel.bottom() - padding - list_top;
        let thumb_height = if thumbnail_count == 0 {
            0.0
        } else {
            let fit = (available - spacing * (thumbnail_count - 1) as f32) / thumbnail_count as f32;
            (THUMB_HEIGHT * scale).min(fit).max(0.0)
        };
        let thumbnails = (0..thumbnail_count)
            .map(|i| {
                Rect::from_min_size(
                    pos2(
                        panel.left() + padding,
                        list_top + i as f32 * (thumb_height + spacing),
                    ),
                    vec2((panel.width() - padding * 2.0).max(0.0), thumb_height),
                )
            })
            .collect();

        Self {
            rect,
            scale,
            progress_track,
            previous,
            navigator,
            next,
            panel,
            thumbnails,
        }
    }

    /// What a click at `pos` lands on. The overlay covers everything; an open
    /// panel covers the controls beneath it.
    pub fn hit_test(
        &self,
        pos: Pos2,
        navigator_open: bool,
        overlay_visible: bool,
    ) -> Option<PointerTarget> {
        if overlay_visible {
            return self.rect.contains(pos).then_some(PointerTarget::Overlay);
        }
        if navigator_open && self.panel.contains(pos) {
            return self
                .thumbnails
                .iter()
                .position(|r| r.contains(pos))
                .map(PointerTarget::Thumbnail);
        }
        if self.previous.contains(pos) {
            Some(PointerTarget::PreviousButton)
        } else if self.next.contains(pos) {
            Some(PointerTarget::NextButton)
        } else if self.navigator.contains(pos) {
            Some(PointerTarget::NavigatorButton)
        } else {
            None
        }
    }
}

pub fn draw_progress(painter: &egui::Painter, layout: &ChromeLayout, theme: &Theme, percent: f32) {
    let track = layout.progress_track;
    painter.rect_filled(track, 0.0, Theme::with_opacity(theme.foreground, 0.1));
    let width = track.width() * (percent / 100.0).clamp(0.0, 1.0);
    let fill = Rect::from_min_size(track.min, vec2(width, track.height()));
    painter.rect_filled(fill, 0.0, theme.accent);
}

pub fn draw_counter(painter: &egui::Painter, layout: &ChromeLayout, theme: &Theme, counter: &str) {
    let scale = layout.scale;
    let color = Theme::with_opacity(theme.foreground, 0.6);
    let galley =
        painter.layout_no_wrap(counter.to_string(), FontId::monospace(22.0 * scale), color);
    let pos = pos2(
        layout.rect.right() - galley.rect.width() - 32.0 * scale,
        layout.rect.bottom() - galley.rect.height() - 32.0 * scale,
    );
    painter.galley(pos, galley, color);
}

pub fn draw_buttons(
    painter: &egui::Painter,
    layout: &ChromeLayout,
    theme: &Theme,
    hovered: Option<PointerTarget>,
    busy: bool,
) {
    let scale = layout.scale;
    let buttons = [
        (layout.previous, PointerTarget::PreviousButton),
        (layout.navigator, PointerTarget::NavigatorButton),
        (layout.next, PointerTarget::NextButton),
    ];
    for (rect, target) in buttons {
        let hot = hovered == Some(target);
        let bg = Theme::with_opacity(theme.panel_background, if hot { 0.95 } else { 0.6 });
        // Dimmed while a transition ignores input
        let fg = if busy {
            Theme::with_opacity(theme.foreground, 0.35)
        } else if hot {
            theme.highlight
        } else {
            Theme::with_opacity(theme.foreground, 0.85)
        };
        painter.rect_filled(rect, 10.0 * scale, bg);
        match target {
            PointerTarget::NavigatorButton => {
                // Three bars
                let stroke = Stroke::new(3.0 * scale, fg);
                let half = rect.width() * 0.25;
                for dy in [-10.0, 0.0, 10.0] {
                    let y = rect.center().y + dy * scale;
                    painter.line_segment(
                        [pos2(rect.center().x - half, y), pos2(rect.center().x + half, y)],
                        stroke,
                    );
                }
            }
            _ => {
                let glyph = if target == PointerTarget::PreviousButton {
                    "\u{2190}"
                } else {
                    "\u{2192}"
                };
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    glyph,
                    FontId::proportional(28.0 * scale),
                    fg,
                );
            }
        }
    }
}

pub fn draw_navigator(
    painter: &egui::Painter,
    layout: &ChromeLayout,
    theme: &Theme,
    thumbnails: &[Thumbnail],
    highlighted: usize,
    hovered: Option<PointerTarget>,
) {
    let scale = layout.scale;
    let panel = layout.panel;
    painter.rect_filled(panel, 0.0, Theme::with_opacity(theme.panel_background, 0.94));

    let padding = PANEL_PADDING * scale;
    painter.text(
        pos2(panel.left() + padding, panel.top() + padding),
        Align2::LEFT_TOP,
        "Slides",
        FontId::proportional(26.0 * scale),
        theme.heading_color,
    );

    for (thumb, rect) in thumbnails.iter().zip(&layout.thumbnails) {
        let rect = *rect;
        if rect.height() < 1.0 {
            continue;
        }
        let active = thumb.index == highlighted;
        let hot = hovered == Some(PointerTarget::Thumbnail(thumb.index));
        let bg = if active {
            Theme::with_opacity(theme.accent, 0.25)
        } else if hot {
            Theme::with_opacity(theme.foreground, 0.12)
        } else {
            Theme::with_opacity(theme.foreground, 0.05)
        };
        painter.rect_filled(rect, 8.0 * scale, bg);
        if active {
            painter.rect_stroke(
                rect,
                8.0 * scale,
                Stroke::new(2.0 * scale, theme.accent),
                egui::StrokeKind::Inside,
            );
        }

        draw_badge(painter, rect, &thumb.number(), theme, scale);

        let text_left = rect.left() + 48.0 * scale;
        let title_size = (22.0 * scale).min(rect.height() * 0.4);
        let glyph_color = if active { theme.highlight } else { theme.accent };
        painter.text(
            pos2(text_left, rect.top() + rect.height() * 0.3),
            Align2::LEFT_CENTER,
            format!("{}  {}", thumb.glyph, thumb.title),
            FontId::proportional(title_size),
            glyph_color,
        );
        if !thumb.description.is_empty() {
            painter.text(
                pos2(text_left, rect.top() + rect.height() * 0.68),
                Align2::LEFT_CENTER,
                &thumb.description,
                FontId::proportional(title_size * 0.75),
                Theme::with_opacity(theme.foreground, 0.7),
            );
        }
    }
}

fn draw_badge(painter: &egui::Painter, cell: Rect, text: &str, theme: &Theme, scale: f32) {
    let badge_bg = Theme::with_opacity(theme.panel_background, 0.9);
    let badge_text_color = Theme::with_opacity(theme.foreground, 0.9);
    let galley = painter.layout_no_wrap(
        format!(" {text} "),
        FontId::monospace(14.0 * scale),
        badge_text_color,
    );
    let badge_rect = Rect::from_min_size(
        cell.min + vec2(8.0 * scale, 8.0 * scale),
        galley.rect.size() + vec2(4.0 * scale, 2.0 * scale),
    );
    painter.rect_filled(badge_rect, 3.0 * scale, badge_bg);
    painter.galley(
        badge_rect.min + vec2(2.0 * scale, 1.0 * scale),
        galley,
        badge_text_color,
    );
}

/// The start screen, faded by `opacity`.
pub fn draw_overlay(
    painter: &egui::Painter,
    layout: &ChromeLayout,
    theme: &Theme,
    title: &str,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    let scale = layout.scale;
    let rect = layout.rect;
    painter.rect_filled(rect, 0.0, Theme::with_opacity(theme.background, 0.92 * opacity));
    painter.text(
        rect.center() - vec2(0.0, 40.0 * scale),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(theme.title_size * scale),
        Theme::with_opacity(theme.heading_color, opacity),
    );
    painter.text(
        rect.center() + vec2(0.0, 60.0 * scale),
        Align2::CENTER_CENTER,
        "Press Space or click to start",
        FontId::proportional(32.0 * scale),
        Theme::with_opacity(theme.accent, opacity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize) -> ChromeLayout {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1080.0));
        ChromeLayout::new(rect, 1.0, count)
    }

    #[test]
    fn test_buttons_sit_bottom_centre_in_order() {
        let l = layout(8);
        assert!(l.previous.right() < l.navigator.left());
        assert!(l.navigator.right() < l.next.left());
        assert_eq!(l.navigator.center().x, 960.0);
        assert!(l.next.bottom() <= 1080.0);
    }

    #[test]
    fn test_hit_test_buttons() {
        let l = layout(8);
        assert_eq!(
            l.hit_test(l.previous.center(), false, false),
            Some(PointerTarget::PreviousButton)
        );
        assert_eq!(
            l.hit_test(l.next.center(), false, false),
            Some(PointerTarget::NextButton)
        );
        assert_eq!(
            l.hit_test(l.navigator.center(), false, false),
            Some(PointerTarget::NavigatorButton)
        );
        assert_eq!(l.hit_test(pos2(300.0, 300.0), false, false), None);
    }

    #[test]
    fn test_overlay_covers_everything() {
        let l = layout(8);
        assert_eq!(
            l.hit_test(l.next.center(), false, true),
            Some(PointerTarget::Overlay)
        );
    }

    #[test]
    fn test_thumbnails_only_hit_when_panel_open() {
        let l = layout(8);
        let third = l.thumbnails[2].center();
        assert_eq!(l.hit_test(third, true, false), Some(PointerTarget::Thumbnail(2)));
        assert_eq!(l.hit_test(third, false, false), None);
    }

    #[test]
    fn test_thumbnails_shrink_to_fit_panel() {
        let l = layout(40);
        let last = l.thumbnails[39];
        assert!(last.bottom() <= l.panel.bottom() + 0.01);
        assert!(last.height() < THUMB_HEIGHT);
        assert!(l.thumbnails.windows(2).all(|w| w[0].bottom() <= w[1].top()));
    }
}
