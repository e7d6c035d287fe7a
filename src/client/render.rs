//! Table rendering for the record list.

use crate::domain::model::ResourceModel;
use crate::transport::http::types::RecordDocument;
use serde_json::Value as JsonValue;

/// One table row: display cells plus the id its edit/delete actions target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: String,
    pub cells: Vec<String>,
}

fn cell_text(value: Option<&JsonValue>, suffix: Option<&str>) -> String {
    let text = match value {
        None | Some(JsonValue::Null) => return String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    match suffix {
        Some(suffix) => format!("{}{}", text, suffix),
        None => text,
    }
}

pub fn render_rows(model: &dyn ResourceModel, records: &[RecordDocument]) -> Vec<RenderedRow> {
    records
        .iter()
        .map(|record| RenderedRow {
            id: record.id.clone(),
            cells: model
                .fields()
                .iter()
                .map(|f| cell_text(record.fields.get(f.name), f.suffix))
                .collect(),
        })
        .collect()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<tr>` markup for the table body, one line per row.
pub fn to_html(rows: &[RenderedRow]) -> String {
    let mut html = String::new();
    for row in rows {
        html.push_str("<tr>");
        for cell in &row.cells {
            html.push_str("<td>");
            html.push_str(&escape_html(cell));
            html.push_str("</td>");
        }
        let id = escape_html(&row.id);
        html.push_str(&format!(
            "<td class=\"action-btn\"><button data-action=\"edit\" data-id=\"{id}\" title=\"Edit\">Edit</button></td>\
             <td class=\"action-btn\"><button data-action=\"delete\" data-id=\"{id}\" title=\"Delete\">Delete</button></td>"
        ));
        html.push_str("</tr>\n");
    }
    html
}

/// Tab-separated table with a header line, for terminals.
pub fn to_text(model: &dyn ResourceModel, rows: &[RenderedRow]) -> String {
    let mut header = vec!["id"];
    header.extend(model.fields().iter().map(|f| f.label));
    let mut out = header.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.id);
        for cell in &row.cells {
            out.push('\t');
            out.push_str(cell);
        }
        out.push('\n');
    }
    out
}
