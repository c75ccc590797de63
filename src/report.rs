use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::Context;

use crate::Result;

pub const REPORT_HEADER: [&str; 2] = ["Metric", "Value"];
pub const DEFAULT_REPORT_FILE: &str = "savings_report.csv";

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: String,
    pub value: String,
}

impl MetricRow {
    pub fn currency(metric: &str, amount: f64) -> Self {
        Self {
            metric: metric.to_string(),
            value: format_currency(amount),
        }
    }

    pub fn number(metric: &str, value: f64) -> Self {
        Self {
            metric: metric.to_string(),
            value: format!("{value:.2}"),
        }
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

pub trait TabularWriter {
    fn write_table(&mut self, destination: &Path, rows: &[MetricRow]) -> Result<()>;
}

pub fn write_metric_rows<W: Write>(wtr: W, rows: &[MetricRow]) -> Result<()> {
    write_rows(&mut csv::Writer::from_writer(wtr), rows)
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[MetricRow]) -> Result<()> {
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.write_record([row.metric.as_str(), row.value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvFileWriter;

impl TabularWriter for CsvFileWriter {
    fn write_table(&mut self, destination: &Path, rows: &[MetricRow]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(destination).with_context(|| {
            format!("failed to create report file {}", destination.display())
        })?;
        write_rows(&mut wtr, rows)
            .with_context(|| format!("failed to write report to {}", destination.display()))?;
        println!(
            "The savings report was written as CSV to file {}",
            destination.to_string_lossy()
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

pub trait ChartRenderer {
    fn render(&mut self, chart: &BarChart) -> Result<()>;
}

/// Draws bar charts as lines of `#`, scaled to the largest magnitude.
///
/// Negative values are drawn with `-` so the sign stays visible.
pub struct TextBarChart<W: Write> {
    out: W,
}

impl<W: Write> TextBarChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextBarChart<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ChartRenderer for TextBarChart<W> {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        let label_width = chart
            .bars
            .iter()
            .map(|b| b.label.len())
            .max()
            .unwrap_or_default();
        let scale = chart
            .bars
            .iter()
            .map(|b| b.value.abs())
            .filter(|v| v.is_finite())
            .fold(0., f64::max);

        writeln!(self.out, "\n=== {} ===\n", chart.title)?;
        for bar in &chart.bars {
            let len = if scale > 0. && bar.value.is_finite() {
                ((bar.value.abs() / scale) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let glyph = if bar.value < 0. { "-" } else { "#" };
            writeln!(
                self.out,
                "{:<lw$} | {:<bw$} {:.2}",
                bar.label,
                glyph.repeat(len),
                bar.value,
                lw = label_width,
                bw = BAR_WIDTH,
            )?;
        }
        writeln!(self.out, "({})", chart.y_label)?;
        Ok(())
    }
}
