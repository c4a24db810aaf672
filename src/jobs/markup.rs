//! Turns sanitized job markup into styled terminal lines.
//!
//! Only [`SafeHtml`] is accepted, so this is the single place where job
//! descriptions reach the screen. The input is the sanitizer's serialization:
//! well-formed, allow-listed tags with double-quoted attribute values.

use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};

use super::sanitize::SafeHtml;

const BULLET: &str = "• ";

enum Token<'a> {
    Text(&'a str),
    Open { name: String, class: Option<String> },
    Close(String),
}

/// Render sanitized markup as lines, one per block / list item / `<br>`.
pub fn to_lines(html: &SafeHtml) -> Vec<Line<'static>> {
    let mut out = LineBuilder::default();
    for token in tokenize(html.as_str()) {
        match token {
            Token::Text(raw) => out.text(&decode_entities(raw)),
            Token::Open { name, class } => out.open(&name, class.as_deref()),
            Token::Close(name) => out.close(&name),
        }
    }
    out.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    /// Open inline elements and the style each one adds.
    styles: Vec<(String, Style)>,
    list_depth: usize,
    /// Text has been emitted on the current line; bullets do not count.
    line_has_text: bool,
    pending_space: bool,
}

impl LineBuilder {
    fn style(&self) -> Style {
        self.styles
            .iter()
            .fold(Style::default(), |acc, (_, s)| acc.patch(*s))
    }

    fn has_content(&self) -> bool {
        self.spans.iter().any(|s| !s.content.trim().is_empty())
    }

    fn text(&mut self, text: &str) {
        let mut buf = String::new();
        for c in text.chars() {
            if c.is_whitespace() && c != '\u{a0}' {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && (self.line_has_text || !buf.is_empty()) {
                buf.push(' ');
            }
            self.pending_space = false;
            buf.push(c);
        }
        if !buf.is_empty() {
            let style = self.style();
            self.spans.push(Span::styled(buf, style));
            self.line_has_text = true;
        }
    }

    /// End the current line if it holds anything.
    fn flush(&mut self) {
        if self.has_content() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        } else {
            self.spans.clear();
        }
        self.line_has_text = false;
        self.pending_space = false;
    }

    fn open(&mut self, name: &str, class: Option<&str>) {
        match name {
            "br" => {
                self.lines.push(Line::from(std::mem::take(&mut self.spans)));
                self.line_has_text = false;
                self.pending_space = false;
            }
            "div" => self.flush(),
            "ul" => {
                self.flush();
                self.list_depth += 1;
            }
            "li" => {
                self.flush();
                let indent = "  ".repeat(self.list_depth.max(1));
                self.spans.push(Span::raw(format!("{indent}{BULLET}")));
            }
            _ => {
                let style = inline_style(name, class);
                self.styles.push((name.to_string(), style));
            }
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "div" | "li" => self.flush(),
            "ul" => {
                self.flush();
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            _ => {
                if let Some(pos) = self.styles.iter().rposition(|(n, _)| n == name) {
                    self.styles.truncate(pos);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self
            .lines
            .last()
            .map(|l| l.spans.iter().all(|s| s.content.trim().is_empty()))
            .unwrap_or(false)
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn inline_style(name: &str, class: Option<&str>) -> Style {
    match name {
        "b" | "strong" => Style::default().add_modifier(Modifier::BOLD),
        "i" | "em" => Style::default().add_modifier(Modifier::ITALIC),
        "a" => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
        "span" => class.map(class_style).unwrap_or_default(),
        _ => Style::default(),
    }
}

/// Map the utility color classes used in job descriptions to terminal colors.
fn class_style(class: &str) -> Style {
    for c in class.split_whitespace() {
        if c.starts_with("text-gray-") {
            return Style::default().fg(Color::Gray);
        }
        if c.starts_with("text-teal-") {
            return Style::default().fg(Color::Cyan);
        }
    }
    Style::default()
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(&rest[..lt]));
        }
        let tag_start = &rest[lt + 1..];
        let Some(end) = tag_end(tag_start) else {
            // Unterminated tag; treat the remainder as text.
            tokens.push(Token::Text(&rest[lt..]));
            break;
        };
        tokens.extend(parse_tag(&tag_start[..end]));
        rest = &tag_start[end + 1..];
    }
    tokens
}

/// Byte offset of the `>` closing a tag, skipping quoted attribute values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_tag<'a>(body: &str) -> Option<Token<'a>> {
    let body = body.trim().trim_end_matches('/').trim_end();
    if let Some(name) = body.strip_prefix('/') {
        return Some(Token::Close(name.trim().to_ascii_lowercase()));
    }
    let name_len = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    if name.is_empty() || name.starts_with('!') {
        return None;
    }
    let class = attribute(&body[name_len..], "class").map(|v| decode_entities(&v));
    Some(Token::Open { name, class })
}

/// Value of a double-quoted attribute in a tag's attribute list.
fn attribute(attrs: &str, wanted: &str) -> Option<String> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        let after = rest[eq + 1..].trim_start();
        let (value, next) = match after.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let inner = &after[1..];
                let close = inner.find(q)?;
                (&inner[..close], &inner[close + 1..])
            }
            _ => {
                let stop = after.find(char::is_whitespace).unwrap_or(after.len());
                (&after[..stop], &after[stop..])
            }
        };
        if key.eq_ignore_ascii_case(wanted) {
            return Some(value.to_string());
        }
        rest = next;
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after.find(';').and_then(|semi| {
            let entity = &after[..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
