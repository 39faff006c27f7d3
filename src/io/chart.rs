//! Gantt-style station chart rendered as SVG.
//!
//! One row per station; each process is a bar laid end to end from t=0,
//! coloured by machine type.

use std::collections::HashMap;
use std::fmt;

use crate::models::{Allocation, ProcessTable};

/// Machine type shown for ids missing from the table.
pub const UNKNOWN_MACHINE: &str = "Unknown";

const UNKNOWN_COLOR: &str = "#808080";

/// Matplotlib "tab20" colours, assigned to machine types in order.
const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

// Layout (px)
const LEFT: f64 = 120.0;
const TOP: f64 = 50.0;
const PLOT_WIDTH: f64 = 900.0;
const ROW_HEIGHT: f64 = 40.0;
const BAR_HEIGHT: f64 = 28.0;
const LEGEND_WIDTH: f64 = 200.0;
const AXIS_TICKS: usize = 5;

/// A process bar.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    /// Row (station position in the allocation).
    pub row: usize,
    /// Process identifier.
    pub process_id: String,
    /// Process name.
    pub name: String,
    /// Offset from station start (minutes).
    pub start: f64,
    /// Process duration (minutes).
    pub duration: f64,
    /// Machine type, or [`UNKNOWN_MACHINE`].
    pub machine_type: String,
    /// Fill colour.
    pub color: &'static str,
}

impl GanttBar {
    /// End offset (minutes).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Chart model built from an allocation and its process table.
#[derive(Debug, Clone)]
pub struct GanttChart {
    /// Row labels (`Station S1`, ...).
    pub rows: Vec<String>,
    /// Bars in allocation order.
    pub bars: Vec<GanttBar>,
    /// Machine type → colour, in first-appearance order of the table.
    pub legend: Vec<(String, &'static str)>,
}

impl GanttChart {
    /// Lays out the chart. Durations and machine types come from `table`.
    pub fn new(allocation: &Allocation, table: &ProcessTable) -> Self {
        let legend: Vec<(String, &'static str)> = table
            .machine_types()
            .into_iter()
            .enumerate()
            .map(|(i, m)| (m.to_string(), PALETTE[i % PALETTE.len()]))
            .collect();
        let colors: HashMap<&str, &'static str> =
            legend.iter().map(|(m, c)| (m.as_str(), *c)).collect();

        let mut bars = Vec::new();
        for (row, station) in allocation.stations.iter().enumerate() {
            let mut start = 0.0;
            for pref in &station.processes {
                let (duration, machine_type, color) = match table.get(&pref.id) {
                    Some(p) => (
                        p.expected_time_min,
                        p.machine_type.clone(),
                        colors
                            .get(p.machine_type.as_str())
                            .copied()
                            .unwrap_or(UNKNOWN_COLOR),
                    ),
                    None => (0.0, UNKNOWN_MACHINE.to_string(), UNKNOWN_COLOR),
                };
                bars.push(GanttBar {
                    row,
                    process_id: pref.id.clone(),
                    name: pref.name.clone(),
                    start,
                    duration,
                    machine_type,
                    color,
                });
                start += duration;
            }
        }

        Self {
            rows: allocation
                .stations
                .iter()
                .map(|s| format!("Station {}", s.station_id))
                .collect(),
            bars,
            legend,
        }
    }

    /// Latest bar end across all rows (minutes).
    pub fn span(&self) -> f64 {
        self.bars.iter().map(GanttBar::end).fold(0.0, f64::max)
    }

    /// Renders the chart as a standalone SVG document.
    pub fn render_svg(&self) -> String {
        self.to_string()
    }

    fn x(&self, minutes: f64) -> f64 {
        let span = self.span();
        if span > 0.0 {
            LEFT + minutes / span * PLOT_WIDTH
        } else {
            LEFT
        }
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plot_height = ROW_HEIGHT * self.rows.len().max(1) as f64;
        let width = LEFT + PLOT_WIDTH + LEGEND_WIDTH;
        let height = TOP + plot_height + 60.0;
        let axis_y = TOP + plot_height;
        let span = self.span();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" font-family="sans-serif">"#
        )?;
        writeln!(
            f,
            r#"<text x="{}" y="25" font-size="16" font-weight="bold" text-anchor="middle">Station Allocation and Process Timing (Grouped by Machine Type)</text>"#,
            LEFT + PLOT_WIDTH / 2.0
        )?;

        // Grid and x axis
        for i in 0..=AXIS_TICKS {
            let minutes = span * i as f64 / AXIS_TICKS as f64;
            let x = self.x(minutes);
            writeln!(
                f,
                r##"<line x1="{x:.1}" y1="{TOP}" x2="{x:.1}" y2="{axis_y}" stroke="#cccccc" stroke-dasharray="4 4"/>"##
            )?;
            writeln!(
                f,
                r#"<text x="{x:.1}" y="{}" font-size="11" text-anchor="middle">{minutes:.2}</text>"#,
                axis_y + 16.0
            )?;
        }
        writeln!(
            f,
            r#"<text x="{}" y="{}" font-size="12" text-anchor="middle">Time (minutes)</text>"#,
            LEFT + PLOT_WIDTH / 2.0,
            axis_y + 36.0
        )?;

        for (row, label) in self.rows.iter().enumerate() {
            let y = TOP + ROW_HEIGHT * row as f64 + ROW_HEIGHT / 2.0;
            writeln!(
                f,
                r#"<text x="{}" y="{y:.1}" font-size="12" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                LEFT - 8.0,
                escape_xml(label)
            )?;
        }

        for bar in &self.bars {
            let x = self.x(bar.start);
            let w = self.x(bar.end()) - x;
            let y = TOP + ROW_HEIGHT * bar.row as f64 + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
            writeln!(
                f,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{BAR_HEIGHT}" fill="{}" stroke="black"><title>{}</title></rect>"#,
                bar.color,
                escape_xml(&bar.process_id)
            )?;
            writeln!(
                f,
                r#"<text x="{:.1}" y="{:.1}" font-size="9" font-weight="bold" fill="white" text-anchor="middle">{} ({:.2} min)</text>"#,
                x + w / 2.0,
                y + BAR_HEIGHT / 2.0 + 3.0,
                escape_xml(&bar.name),
                bar.duration
            )?;
        }

        let legend_x = LEFT + PLOT_WIDTH + 20.0;
        writeln!(
            f,
            r#"<text x="{legend_x}" y="{TOP}" font-size="12" font-weight="bold">Machine Type</text>"#
        )?;
        for (i, (machine, color)) in self.legend.iter().enumerate() {
            let y = TOP + 10.0 + 20.0 * i as f64;
            writeln!(
                f,
                r#"<rect x="{legend_x}" y="{y}" width="14" height="14" fill="{color}"/>"#
            )?;
            writeln!(
                f,
                r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
                legend_x + 20.0,
                y + 11.0,
                escape_xml(machine)
            )?;
        }

        writeln!(f, "</svg>")
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, ProcessRef, Station};

    fn table() -> ProcessTable {
        ProcessTable::new(vec![
            Process::new("A", 0.4, "M1").with_name("Cut"),
            Process::new("B", 0.3, "M1").with_name("Trim"),
            Process::new("C", 0.5, "M2").with_name("Sew & Hem"),
        ])
        .unwrap()
    }

    fn station(id: &str, members: &[(&str, &str)]) -> Station {
        Station {
            station_id: id.into(),
            processes: members
                .iter()
                .map(|(id, name)| ProcessRef {
                    id: (*id).into(),
                    name: (*name).into(),
                })
                .collect(),
            total_expected_time: 0.0,
            waste_time: 0.0,
            machines_required: 1,
        }
    }

    fn allocation() -> Allocation {
        let mut alloc = Allocation::new();
        alloc.add_station(station("S1", &[("A", "Cut"), ("B", "Trim")]));
        alloc.add_station(station("S2", &[("C", "Sew & Hem")]));
        alloc
    }

    #[test]
    fn test_bars_laid_end_to_end() {
        let chart = GanttChart::new(&allocation(), &table());
        assert_eq!(chart.rows, vec!["Station S1", "Station S2"]);
        assert_eq!(chart.bars.len(), 3);

        let b = &chart.bars[1];
        assert_eq!(b.process_id, "B");
        assert_eq!(b.row, 0);
        assert!((b.start - 0.4).abs() < 1e-10);
        assert!((b.end() - 0.7).abs() < 1e-10);
        assert_eq!(chart.bars[2].row, 1);
        assert!((chart.bars[2].start - 0.0).abs() < 1e-10);
        assert!((chart.span() - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_colors_by_machine_type() {
        let chart = GanttChart::new(&allocation(), &table());
        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.legend[0], ("M1".to_string(), PALETTE[0]));
        assert_eq!(chart.bars[0].color, chart.bars[1].color);
        assert_ne!(chart.bars[0].color, chart.bars[2].color);
    }

    #[test]
    fn test_unknown_process() {
        let mut alloc = Allocation::new();
        alloc.add_station(station("S1", &[("ghost", "Ghost")]));
        let chart = GanttChart::new(&alloc, &table());
        let bar = &chart.bars[0];
        assert_eq!(bar.machine_type, UNKNOWN_MACHINE);
        assert_eq!(bar.color, UNKNOWN_COLOR);
        assert!((bar.duration - 0.0).abs() < 1e-10);
        // Zero span still renders
        assert!(chart.render_svg().contains("Ghost (0.00 min)"));
    }

    #[test]
    fn test_svg_output() {
        let svg = GanttChart::new(&allocation(), &table()).render_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Station S2"));
        assert!(svg.contains("Cut (0.40 min)"));
        assert!(svg.contains("Sew &amp; Hem (0.50 min)"));
        assert!(svg.contains("Time (minutes)"));
        assert!(svg.contains(">M2</text>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
