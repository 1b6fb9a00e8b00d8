// BootDiff - core/html.rs
//
// Self-contained HTML side-by-side diff report. Inline CSS only: the file
// must open correctly when mailed around or attached to a bug report.
// Core layer: builds a String, the caller writes it.

use crate::core::model::LogFile;
use crate::util::constants;
use chrono::{DateTime, Local};
use similar::{capture_diff_slices, group_diff_ops, Algorithm, DiffOp, DiffTag};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLE: &str = "body{margin:0;background:#f7fafc;color:#111827;font-family:Segoe UI,system-ui,-apple-system,Arial,sans-serif} \
.container{margin:0 auto;padding:24px} .title{font-size:20px;font-weight:600} .sub{color:#6b7280;font-size:13px;margin-top:4px} \
.stats{margin:12px 0} .pill{display:inline-block;background:#eef2f7;padding:4px 10px;border-radius:999px;border:1px solid #e5e7eb;font-size:12px;margin-right:6px} \
table.diff{width:100%;border-collapse:collapse;font-family:Consolas,Monaco,monospace;font-size:12px;background:#fff;border:1px solid #e5e7eb} \
table.diff th{background:#f3f4f6;text-align:left;padding:8px;border-bottom:1px solid #e5e7eb;font-family:Segoe UI,system-ui,Arial,sans-serif} \
table.diff td{padding:1px 6px;vertical-align:top} td.ln{color:#9ca3af;text-align:right;width:1%;white-space:nowrap;border-right:1px solid #e5e7eb} \
td.txt{white-space:pre-wrap;word-break:break-all;width:49%} tr.removed td.old{background:#fee2e2} tr.added td.new{background:#dcfce7} \
tr.changed td.old{background:#fef3c7} tr.changed td.new{background:#fef3c7} tr.sep td{background:#e5e7eb;height:6px;padding:0} \
td.empty{text-align:center;color:#6b7280;padding:12px} .ts{color:#6b7280;font-weight:400;font-size:12px} \
.legend{margin-top:14px;font-size:12px;color:#374151} .legend span{display:inline-block;padding:2px 8px;margin-right:6px;border:1px solid #e5e7eb} \
.footer{margin-top:18px;color:#6b7280;font-size:12px}";

/// Options for the side-by-side report.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Show only changed regions with `context_lines` around them.
    pub context: bool,
    pub context_lines: usize,
    /// Stamp written in the report footer.
    pub generated_at: DateTime<Local>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            context: true,
            context_lines: constants::DEFAULT_HTML_CONTEXT_LINES,
            generated_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Same,
    Removed,
    Added,
    Changed,
}

impl RowKind {
    fn class(&self) -> &'static str {
        match self {
            RowKind::Same => "same",
            RowKind::Removed => "removed",
            RowKind::Added => "added",
            RowKind::Changed => "changed",
        }
    }
}

#[derive(Debug)]
enum Row<'a> {
    Line {
        kind: RowKind,
        old: Option<(usize, &'a str)>,
        new: Option<(usize, &'a str)>,
    },
    Separator,
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_mtime(modified: Option<DateTime<Local>>) -> String {
    modified
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Expand a group of diff ops into table rows.
fn push_rows<'a>(rows: &mut Vec<Row<'a>>, group: &[DiffOp], old: &'a [String], new: &'a [String]) {
    for op in group {
        let (tag, o, n) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for (i, j) in o.zip(n) {
                    rows.push(Row::Line {
                        kind: RowKind::Same,
                        old: Some((i + 1, old[i].as_str())),
                        new: Some((j + 1, new[j].as_str())),
                    });
                }
            }
            DiffTag::Delete => {
                for i in o {
                    rows.push(Row::Line {
                        kind: RowKind::Removed,
                        old: Some((i + 1, old[i].as_str())),
                        new: None,
                    });
                }
            }
            DiffTag::Insert => {
                for j in n {
                    rows.push(Row::Line {
                        kind: RowKind::Added,
                        old: None,
                        new: Some((j + 1, new[j].as_str())),
                    });
                }
            }
            DiffTag::Replace => {
                let width = o.len().max(n.len());
                for k in 0..width {
                    let left =
                        (k < o.len()).then(|| (o.start + k + 1, old[o.start + k].as_str()));
                    let right =
                        (k < n.len()).then(|| (n.start + k + 1, new[n.start + k].as_str()));
                    let kind = match (left.is_some(), right.is_some()) {
                        (true, true) => RowKind::Changed,
                        (true, false) => RowKind::Removed,
                        _ => RowKind::Added,
                    };
                    rows.push(Row::Line {
                        kind,
                        old: left,
                        new: right,
                    });
                }
            }
        }
    }
}

fn build_rows<'a>(old: &'a [String], new: &'a [String], options: &HtmlOptions) -> Vec<Row<'a>> {
    let ops = capture_diff_slices(Algorithm::Myers, old, new);
    let mut rows = Vec::new();

    if !options.context {
        push_rows(&mut rows, &ops, old, new);
        return rows;
    }

    // similar doubles the radius when grouping hunks
    let context = options.context_lines.min(constants::MAX_CONTEXT_LINES);
    let groups: Vec<Vec<DiffOp>> = group_diff_ops(ops, context)
        .into_iter()
        .filter(|g| g.iter().any(|op| op.tag() != DiffTag::Equal))
        .collect();

    for (idx, group) in groups.iter().enumerate() {
        if idx > 0 {
            rows.push(Row::Separator);
        }
        push_rows(&mut rows, group, old, new);
    }
    rows
}

fn cell_pair(side: Option<(usize, &str)>, class: &str) -> String {
    match side {
        Some((no, text)) => format!(
            "<td class=\"ln\">{no}</td><td class=\"txt {class}\">{}</td>",
            html_escape(text)
        ),
        None => format!("<td class=\"ln\"></td><td class=\"txt {class}\"></td>"),
    }
}

/// Render the two logs as a side-by-side HTML document.
pub fn render_side_by_side(old: &LogFile, new: &LogFile, options: &HtmlOptions) -> String {
    let rows = build_rows(&old.lines, &new.lines, options);

    let (mut removed, mut added, mut changed) = (0usize, 0usize, 0usize);
    for row in &rows {
        if let Row::Line { kind, .. } = row {
            match kind {
                RowKind::Removed => removed += 1,
                RowKind::Added => added += 1,
                RowKind::Changed => changed += 1,
                RowKind::Same => {}
            }
        }
    }
    let identical = removed + added + changed == 0;

    let old_name = html_escape(&old.name);
    let new_name = html_escape(&new.name);

    let mut s = String::new();
    s.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    s.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    s.push_str(&format!(
        "<title>{} - {old_name} vs {new_name}</title><style>{STYLE}</style></head><body><div class=\"container\">\n",
        constants::APP_NAME
    ));
    s.push_str(&format!(
        "<div class=\"title\">{old_name} &harr; {new_name}</div>\n<div class=\"sub\">{} side-by-side diff, {}</div>\n",
        constants::APP_NAME,
        if options.context {
            format!("{} lines of context", options.context_lines)
        } else {
            "full file view".to_string()
        }
    ));
    s.push_str(&format!(
        "<div class=\"stats\"><span class=\"pill\">Removed &middot; {removed}</span><span class=\"pill\">Added &middot; {added}</span><span class=\"pill\">Changed &middot; {changed}</span></div>\n"
    ));

    s.push_str("<table class=\"diff\"><thead><tr>");
    s.push_str(&format!(
        "<th colspan=\"2\">{old_name}<br><span class=\"ts\">{}</span></th>",
        format_mtime(old.modified)
    ));
    s.push_str(&format!(
        "<th colspan=\"2\">{new_name}<br><span class=\"ts\">{}</span></th>",
        format_mtime(new.modified)
    ));
    s.push_str("</tr></thead><tbody>\n");

    if identical && options.context {
        s.push_str("<tr><td class=\"empty\" colspan=\"4\">No differences found</td></tr>\n");
    } else {
        for row in &rows {
            match row {
                Row::Separator => {
                    s.push_str("<tr class=\"sep\"><td colspan=\"4\"></td></tr>\n");
                }
                Row::Line { kind, old, new } => {
                    s.push_str(&format!("<tr class=\"{}\">", kind.class()));
                    s.push_str(&cell_pair(*old, "old"));
                    s.push_str(&cell_pair(*new, "new"));
                    s.push_str("</tr>\n");
                }
            }
        }
    }
    s.push_str("</tbody></table>\n");

    s.push_str("<div class=\"legend\"><span style=\"background:#fee2e2\">Removed</span><span style=\"background:#dcfce7\">Added</span><span style=\"background:#fef3c7\">Changed</span><span style=\"background:#e5e7eb\">Skipped unchanged lines</span></div>\n");
    s.push_str(&format!(
        "<div class=\"footer\">Generated by {} v{} at {}</div>\n",
        constants::APP_NAME,
        constants::APP_VERSION,
        options.generated_at.format(TIMESTAMP_FORMAT)
    ));
    s.push_str("</div></body></html>\n");

    tracing::debug!(
        rows = rows.len(),
        removed,
        added,
        changed,
        "HTML side-by-side rendered"
    );

    s
}
