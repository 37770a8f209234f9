//! Renders an [`AgeReport`] as a shareable SVG card (the image export of the
//! web page). Rows are laid out as `key: ....... value` in a monospace font.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExportConfig;
use crate::error::Result;
use crate::report::AgeReport;
use crate::units::group_thousands;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 50;
const BAR_CELLS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub done: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
                done: "#3fb950",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
                done: "#1a7f37",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

/// Splits a row into `("key: ", dots, value)` so that it fills `align_width`.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

/// Text progress bar, e.g. `[#####...............]`.
fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

enum Line {
    Header(String),
    Blank,
    Stat { key: String, value: String, done: bool },
}

fn report_lines(report: &AgeReport) -> Vec<Line> {
    let stat = |key: &str, value: String| Line::Stat {
        key: key.to_string(),
        value,
        done: false,
    };

    let a = &report.age;
    let c = &report.countdown;
    let mut lines = vec![
        Line::Header(format!("born@{}", report.birth_date)),
        stat("Years", a.years.to_string()),
        stat("Months", a.months.to_string()),
        stat("Days", a.days.to_string()),
        stat(
            "Time",
            format!("{:02}:{:02}:{:02}", a.hours, a.minutes, a.seconds),
        ),
        stat("Calendar", report.calendar_age.to_string()),
        Line::Blank,
        Line::Header("- Next Birthday".to_string()),
        stat(
            "Countdown",
            format!(
                "{}d {:02}h {:02}m {:02}s",
                c.days, c.hours, c.minutes, c.seconds
            ),
        ),
    ];

    if !report.hijri_birth.is_sentinel() {
        let h = &report.hijri_age;
        lines.push(Line::Blank);
        lines.push(Line::Header("- Hijri".to_string()));
        lines.push(stat("Born", report.hijri_birth.to_string()));
        lines.push(stat("Today", report.hijri_today.to_string()));
        lines.push(stat(
            "Age",
            format!("{}y {}m {}d", h.years, h.months, h.days),
        ));
    }

    lines.push(Line::Blank);
    lines.push(Line::Header("- Milestones".to_string()));
    for m in &report.milestones {
        lines.push(Line::Stat {
            key: m.name.to_string(),
            value: format!(
                "{} {} {:>5.1}%",
                m.progress_label(),
                progress_bar(m.percent_complete),
                m.percent_complete
            ),
            done: m.is_reached(),
        });
    }

    lines.push(Line::Blank);
    lines.push(Line::Header("- In Other Units".to_string()));
    for unit in &report.alternative_units {
        lines.push(stat(&unit.name, group_thousands(unit.value)));
    }

    lines
}

/// Main SVG generation function
pub fn generate_svg(report: &AgeReport, theme: Theme) -> String {
    let colors = theme.colors();
    let lines = report_lines(report);

    let align_width = lines
        .iter()
        .map(|line| match line {
            Line::Stat { key, value, .. } => key.chars().count() + 2 + value.chars().count(),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let x = LEFT_PADDING;
    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(label) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(label, align_width))
                ));
            }
            Line::Stat { key, value, done } => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                let value_class = if *done { "done" } else { "value" };
                tspans.push_str(&format!(
                    r#"<tspan x="{x}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="{value_class}">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let w = x + (align_width as f32 + 4.0) * CHAR_WIDTH + RIGHT_PADDING;
    let h = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32 + 10.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key   {{ fill: {key}; }}
.value {{ fill: {value}; }}
.cc    {{ fill: {cc}; }}
.done  {{ fill: {done}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}" xml:space="preserve">
{body}
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        done = colors.done,
        body = tspans
    )
}

/// Writes dark and light cards into `dir`, returning the written paths.
pub fn export_cards(report: &AgeReport, dir: &Path, export: &ExportConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(2);
    for (theme, name) in [
        (Theme::Dark, &export.dark_filename),
        (Theme::Light, &export.light_filename),
    ] {
        let path = dir.join(name);
        std::fs::write(&path, generate_svg(report, theme))?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
