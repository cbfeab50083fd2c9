//! Report layouts
//!
//! Both layouts draw onto a [`Canvas`] and break onto a new page before any
//! line would cross the bottom margin.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::canvas::{fit, text_width, wrap, Canvas, Font, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use super::ReportError;
use crate::domain::Vehicle;

const MARGIN: f32 = 36.0;

const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const TABLE_FONT_SIZE: f32 = 10.0;
const HEADER_HEIGHT: f32 = 24.0;
const ROW_HEIGHT: f32 = 18.0;
const CELL_PADDING: f32 = 3.0;
const HEADERS: [&str; 6] = [
    "Plate Number",
    "Vehicle Status",
    "Type",
    "Model",
    "Engine Number",
    "Color",
];
const COLUMN_WIDTH: f32 = TABLE_WIDTH / HEADERS.len() as f32;

const NARRATIVE_FONT_SIZE: f32 = 12.0;
const NARRATIVE_TOP: f32 = 750.0;
const LINE_GAP: f32 = 20.0;

/// How the vehicle report is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// One boxed table row per vehicle.
    #[default]
    Table,
    /// Free text keyed to the requesting user, with each vehicle's parts.
    Narrative,
}

impl ReportLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Narrative => "narrative",
        }
    }

    /// Attachment filename for the rendered document.
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Table => "vehicle_details.pdf",
            Self::Narrative => "vehicle_report.pdf",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Table => "Vehicle Details",
            Self::Narrative => "Vehicle Report",
        }
    }
}

/// A vehicle with the related rows the narrative layout prints.
#[derive(Debug, Clone)]
pub struct VehicleEntry {
    pub vehicle: Vehicle,
    pub owner_name: String,
    /// One-line part summaries.
    pub parts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    /// Display name of the user requesting the report.
    pub requested_by: String,
    pub vehicles: Vec<VehicleEntry>,
}

#[derive(Debug)]
pub struct RenderedReport {
    pub layout: ReportLayout,
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// Table rows drawn, header included. Zero for the narrative layout.
    pub table_rows: usize,
}

/// Render the report in the requested layout.
pub fn render(layout: ReportLayout, data: &ReportData) -> Result<RenderedReport, ReportError> {
    let mut canvas = Canvas::new();
    let table_rows = match layout {
        ReportLayout::Table => draw_table(&mut canvas, data),
        ReportLayout::Narrative => {
            draw_narrative(&mut canvas, data);
            0
        }
    };

    let pages = canvas.page_count();
    let bytes = canvas.finish(layout.title())?;

    Ok(RenderedReport {
        layout,
        bytes,
        pages,
        table_rows,
    })
}

#[derive(Clone, Copy)]
enum RowStyle {
    Header,
    Body,
}

/// Draws one row whose top edge is at `top` and returns its bottom edge.
fn draw_row(canvas: &mut Canvas, top: f32, cells: [&str; 6], style: RowStyle) -> f32 {
    let (height, fill, color, font, baseline_offset) = match style {
        RowStyle::Header => (HEADER_HEIGHT, Rgb::GREY, Rgb::WHITESMOKE, Font::Bold, 10.0),
        RowStyle::Body => (ROW_HEIGHT, Rgb::BEIGE, Rgb::BLACK, Font::Regular, 5.0),
    };
    let bottom = top - height;

    canvas.fill_rect(MARGIN, bottom, TABLE_WIDTH, height, fill);
    for (column, cell) in cells.iter().enumerate() {
        let text = fit(cell, COLUMN_WIDTH - 2.0 * CELL_PADDING, TABLE_FONT_SIZE);
        let left = MARGIN + column as f32 * COLUMN_WIDTH;
        let x = left + (COLUMN_WIDTH - text_width(&text, TABLE_FONT_SIZE)) / 2.0;
        canvas.text(font, TABLE_FONT_SIZE, color, x, bottom + baseline_offset, &text);
    }

    bottom
}

/// Returns the number of rows drawn, header included.
fn draw_table(canvas: &mut Canvas, data: &ReportData) -> usize {
    let top = PAGE_HEIGHT - MARGIN;
    let mut segment_top = top;

    let mut y = draw_row(canvas, top, HEADERS, RowStyle::Header);
    let mut rows = 1;

    for entry in &data.vehicles {
        if y - ROW_HEIGHT < MARGIN {
            canvas.stroke_rect(MARGIN, y, TABLE_WIDTH, segment_top - y, 1.0);
            canvas.new_page();
            y = top;
            segment_top = top;
        }

        let v = &entry.vehicle;
        y = draw_row(
            canvas,
            y,
            [
                &v.vehicle_plate_number,
                &v.vehicle_general_condition,
                &v.vehicle_type,
                &v.vehicle_model,
                &v.vehicle_engine_number,
                &v.vehicle_color,
            ],
            RowStyle::Body,
        );
        rows += 1;
    }

    canvas.stroke_rect(MARGIN, y, TABLE_WIDTH, segment_top - y, 1.0);
    rows
}

fn draw_narrative(canvas: &mut Canvas, data: &ReportData) {
    let size = NARRATIVE_FONT_SIZE;
    let line = |canvas: &mut Canvas, x: f32, y: f32, text: &str| {
        let text = fit(text, PAGE_WIDTH - x - MARGIN, size);
        canvas.text(Font::Regular, size, Rgb::BLACK, x, y, &text);
    };

    line(canvas, 100.0, NARRATIVE_TOP, "Vehicle Report");
    line(
        canvas,
        100.0,
        730.0,
        &format!(
            "Report generated on: {}",
            data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    );
    line(canvas, 100.0, 700.0, "Mechanic Details:");
    line(canvas, 120.0, 680.0, &format!("Name: {}", data.requested_by));

    let mut y = 650.0;
    for entry in &data.vehicles {
        let parts = if entry.parts.is_empty() {
            "Vehicle Parts: none".to_string()
        } else {
            format!("Vehicle Parts: {}", entry.parts.join(", "))
        };
        let part_lines = wrap(&parts, PAGE_WIDTH - 140.0 - MARGIN, size);
        // Distance from the owner line to the last parts line.
        let block = 2.0 * LINE_GAP + LINE_GAP * (part_lines.len() - 1) as f32;

        // A block that fits on one page is never split. Longer ones keep the
        // owner, plate and first parts line together and break between parts lines.
        let keep_together = if NARRATIVE_TOP - block >= MARGIN {
            block
        } else {
            2.0 * LINE_GAP
        };
        if y - keep_together < MARGIN {
            canvas.new_page();
            y = NARRATIVE_TOP;
        }

        let v = &entry.vehicle;
        line(canvas, 100.0, y, &format!("Vehicle Owner: {}", entry.owner_name));
        line(
            canvas,
            120.0,
            y - LINE_GAP,
            &format!(
                "Plate Number: {}, Model: {}, Type: {}",
                v.vehicle_plate_number, v.vehicle_model, v.vehicle_type
            ),
        );
        y -= 2.0 * LINE_GAP;

        for text in &part_lines {
            if y < MARGIN {
                canvas.new_page();
                y = NARRATIVE_TOP;
            }
            line(canvas, 140.0, y, text);
            y -= LINE_GAP;
        }

        y -= LINE_GAP;
    }
}
