//! SVG rendering of a composed board.

use crate::layout::{BoardLayout, CellDescriptor, CellKind, Column};
use crate::measure::TextMetrics;
use crate::model::OverlayKind;
use std::fmt::Write;

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, layout: &BoardLayout) -> String {
        let mut svg = String::new();

        let widths: Vec<f64> = layout
            .columns
            .iter()
            .map(|c| self.metrics.column_width(c))
            .collect();
        let width = self.metrics.gutter_width + widths.iter().sum::<f64>();
        let height = self.metrics.header_height + layout.height_px as f64;

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .header {{ fill: #fff; stroke: #e5e7eb; }}
  .avatar {{ fill: #dbeafe; }}
  .avatar-text {{ font-family: sans-serif; font-size: 14px; font-weight: bold; fill: #2563eb; }}
  .doctor-name {{ font-family: sans-serif; font-size: 14px; font-weight: 500; }}
  .doctor-count {{ font-family: sans-serif; font-size: 11px; fill: #9ca3af; }}
  .gutter-label {{ font-family: sans-serif; font-size: 11px; fill: #6b7280; }}
  .slot {{ fill: #fff; stroke: #e5e7eb; }}
  .slot-minor {{ stroke-dasharray: 4 2; }}
  .event {{ stroke: none; rx: 6; }}
  .event-pink {{ fill: #fce7f3; }}
  .event-green {{ fill: #dcfce7; }}
  .event-blue {{ fill: #dbeafe; }}
  .event-yellow {{ fill: #fef9c3; }}
  .event-default {{ fill: #f3f4f6; }}
  .event-title {{ font-family: sans-serif; font-size: 12px; font-weight: bold; }}
  .event-text {{ font-family: sans-serif; font-size: 11px; fill: #4b5563; }}
  .overlay-not_available {{ fill: #f3f4f6; }}
  .overlay-break {{ fill: #e0e7ff; }}
  .overlay-waiting_payment {{ fill: #fef9c3; }}
  .overlay-action_button {{ fill: #facc15; }}
  .overlay-text {{ font-family: sans-serif; font-size: 11px; fill: #6b7280; }}
  .now-line {{ stroke: #ef4444; stroke-width: 2; }}
  .now-label {{ font-family: sans-serif; font-size: 11px; fill: #fff; }}
  .now-bg {{ fill: #1f2937; }}
</style>"#
        )
        .unwrap();

        self.render_gutter(&mut svg, layout);

        let mut x = self.metrics.gutter_width;
        for (column, &w) in layout.columns.iter().zip(&widths) {
            self.render_column(&mut svg, column, x, w);
            x += w;
        }

        // Current time goes over everything else
        if let Some(marker) = &layout.now_marker {
            let y = self.metrics.header_height + marker.offset_px;
            writeln!(
                &mut svg,
                r#"<line class="now-line" x1="0" y1="{}" x2="{}" y2="{}" />"#,
                y, width, y
            )
            .unwrap();
            writeln!(
                &mut svg,
                r#"<rect class="now-bg" x="{}" y="{}" width="40" height="16" rx="2" />"#,
                width / 2.0 - 20.0,
                y - 8.0
            )
            .unwrap();
            writeln!(
                &mut svg,
                r#"<text class="now-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                width / 2.0,
                y + 4.0,
                escape_xml(&marker.label)
            )
            .unwrap();
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_gutter(&self, svg: &mut String, layout: &BoardLayout) {
        for label in &layout.gutter {
            let y = self.metrics.header_height + label.top_px as f64;
            writeln!(
                svg,
                r#"<text class="gutter-label" x="{}" y="{}" text-anchor="end">{}</text>"#,
                self.metrics.gutter_width - self.metrics.padding_x,
                y + self.metrics.line_height,
                escape_xml(&label.label)
            )
            .unwrap();
        }
    }

    fn render_column(&self, svg: &mut String, column: &Column, x: f64, w: f64) {
        let m = &self.metrics;
        let resource = &column.resource;

        // 1. Header with avatar initial, name and counter
        writeln!(
            svg,
            r#"<rect class="header" x="{}" y="0" width="{}" height="{}" />"#,
            x, w, m.header_height
        )
        .unwrap();
        let cx = x + m.padding_x * 2.0 + m.avatar_size / 2.0;
        let cy = m.header_height / 2.0;
        writeln!(
            svg,
            r#"<circle class="avatar" cx="{}" cy="{}" r="{}" />"#,
            cx,
            cy,
            m.avatar_size / 2.0
        )
        .unwrap();
        if let Some(initial) = resource.initial() {
            writeln!(
                svg,
                r#"<text class="avatar-text" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                cx,
                cy + 5.0,
                escape_xml(&initial.to_string())
            )
            .unwrap();
        }
        let text_x = x + m.padding_x * 3.0 + m.avatar_size;
        writeln!(
            svg,
            r#"<text class="doctor-name" x="{}" y="{}">{}</text>"#,
            text_x,
            cy - 2.0,
            escape_xml(&resource.name)
        )
        .unwrap();
        writeln!(
            svg,
            r#"<text class="doctor-count" x="{}" y="{}">{} appointment(s)</text>"#,
            text_x,
            cy + m.line_height,
            column.event_count
        )
        .unwrap();

        // 2. Cells
        for cell in &column.cells {
            self.render_cell(svg, cell, x, w);
        }
    }

    fn render_cell(&self, svg: &mut String, cell: &CellDescriptor, x: f64, w: f64) {
        let m = &self.metrics;
        let y = m.header_height + cell.top_px as f64;
        let h = cell.span_px as f64;

        // Background grid lines, one per slot
        for i in 0..cell.span_slots {
            let slot = cell.slot_index + i;
            let row_h = h / cell.span_slots as f64;
            let class = if slot % 2 == 1 { "slot slot-minor" } else { "slot" };
            writeln!(
                svg,
                r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" />"#,
                class,
                x,
                y + row_h * i as f64,
                w,
                row_h
            )
            .unwrap();
        }

        match &cell.kind {
            CellKind::Event { display, .. } => {
                let color = match display.color.as_str() {
                    "pink" | "green" | "blue" | "yellow" => display.color.as_str(),
                    _ => "default",
                };
                writeln!(
                    svg,
                    r#"<rect class="event event-{}" x="{}" y="{}" width="{}" height="{}" />"#,
                    color,
                    x + 4.0,
                    y + 2.0,
                    w - 8.0,
                    h - 4.0
                )
                .unwrap();

                let text_w = w - m.padding_x * 2.0 - 8.0;
                let time = if display.start_label.is_empty() {
                    String::new()
                } else {
                    format!("{} - {}", display.start_label, display.end_label)
                };
                let lines = [
                    ("event-title", &display.title),
                    ("event-text", &time),
                    ("event-text", &display.category),
                ];
                let mut line_y = y + 2.0 + m.line_height;
                for (class, text) in lines {
                    if text.is_empty() || line_y > y + h - 4.0 {
                        continue;
                    }
                    writeln!(
                        svg,
                        r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                        class,
                        x + 4.0 + m.padding_x,
                        line_y,
                        escape_xml(&m.truncate(text, text_w))
                    )
                    .unwrap();
                    line_y += m.line_height;
                }
            }
            CellKind::Overlay { overlay } => {
                writeln!(
                    svg,
                    r#"<rect class="overlay-{}" x="{}" y="{}" width="{}" height="{}" />"#,
                    overlay.name(),
                    x,
                    y,
                    w,
                    h
                )
                .unwrap();
                writeln!(
                    svg,
                    r#"<text class="overlay-text" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                    x + w / 2.0,
                    y + h / 2.0 + 4.0,
                    overlay_caption(*overlay)
                )
                .unwrap();
            }
            CellKind::Empty => {}
        }
    }
}

fn overlay_caption(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::NotAvailable => "NOT AVAILABLE",
        OverlayKind::Break => "BREAK",
        OverlayKind::WaitingPayment => "WAITING FOR PAYMENT",
        OverlayKind::ActionButton => "▶",
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
