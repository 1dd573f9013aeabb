//! Terminal rendering for the markdown produced by [`crate::convert`].
//!
//! Block structure is handled line by line. Inline markers are resolved into
//! ANSI styles through `colored`, which also decides whether escape codes are
//! emitted at all (see `colored::control`). Without colors, headings keep a
//! `#` prefix so they still stand out from body text.

use colored::{Color, ColoredString, Colorize};

const RULE_WIDTH: usize = 40;

pub fn render(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().map(str::trim_end).collect();
    let mut out: Vec<String> = Vec::new();
    let mut in_code = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();
        i += 1;

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_code = !in_code;
            continue;
        }

        if in_code {
            out.push(line.yellow().to_string());
            continue;
        }

        if trimmed.is_empty() {
            push_blank(&mut out);
            continue;
        }

        if trimmed.starts_with('|') {
            let start = i - 1;
            while lines.get(i).is_some_and(|l| l.trim_start().starts_with('|')) {
                i += 1;
            }
            out.extend(table(&lines[start..i]));
            continue;
        }

        if is_paragraph(trimmed) {
            if let Some(level) = lines.get(i).and_then(|next| setext_level(next)) {
                out.push(heading(level, trimmed));
                i += 1;
                continue;
            }
        }

        out.push(block(line, trimmed));
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.join("\n")
}

fn block(line: &str, trimmed: &str) -> String {
    if is_rule(trimmed) {
        return "─".repeat(RULE_WIDTH).as_str().dimmed().to_string();
    }

    if let Some((level, text)) = atx_heading(trimmed) {
        return heading(level, text);
    }

    if let Some(quoted) = trimmed.strip_prefix('>') {
        let quoted = quoted.strip_prefix(' ').unwrap_or(quoted);
        return format!("{} {}", "│".dimmed(), inline(quoted).as_str().italic());
    }

    let indent = &line[..line.len() - trimmed.len()];

    if let Some(item) = bullet_item(trimmed) {
        return format!("{}{} {}", indent, "•".cyan(), inline(item));
    }

    if let Some((number, item)) = ordered_item(trimmed) {
        return format!("{}{} {}", indent, number.cyan(), inline(item));
    }

    inline(line)
}

fn push_blank(out: &mut Vec<String>) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
}

fn heading_color(level: usize) -> Color {
    match level {
        1 => Color::BrightCyan,
        2 => Color::Cyan,
        3 => Color::BrightBlue,
        _ => Color::Blue,
    }
}

fn heading(level: usize, text: &str) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return format!("{} {}", "#".repeat(level), inline(text));
    }

    let styled: ColoredString = inline(text).as_str().bold().color(heading_color(level));
    if level == 1 {
        styled.underline().to_string()
    } else {
        styled.to_string()
    }
}

fn atx_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }

    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }

    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

fn setext_level(line: &str) -> Option<usize> {
    let line = line.trim();
    if line.len() < 3 {
        return None;
    }
    if line.chars().all(|c| c == '=') {
        Some(1)
    } else if line.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

/// `***`, `---`, `___` and spaced variants such as `* * *`.
fn is_rule(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn is_paragraph(line: &str) -> bool {
    !(is_rule(line)
        || atx_heading(line).is_some()
        || line.starts_with('>')
        || line.starts_with('|')
        || bullet_item(line).is_some()
        || ordered_item(line).is_some())
}

fn bullet_item(line: &str) -> Option<&str> {
    ["* ", "- ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

fn ordered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let rest = &line[digits..];
    if rest.starts_with(". ") || rest.starts_with(") ") {
        Some((&line[..digits + 1], &rest[2..]))
    } else {
        None
    }
}

fn table(rows: &[&str]) -> Vec<String> {
    let has_header = rows.get(1).is_some_and(|row| is_table_separator(row));
    let cells: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| !is_table_separator(row))
        .map(|row| table_cells(row).map(inline).collect())
        .collect();

    let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(visible_width(cell));
        }
    }

    let mut out = Vec::with_capacity(rows.len());
    for (n, row) in cells.iter().enumerate() {
        let header = has_header && n == 0;
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = " ".repeat(width - visible_width(cell));
                if header {
                    format!("{}{}", cell.bold(), pad)
                } else {
                    format!("{}{}", cell, pad)
                }
            })
            .collect::<Vec<_>>()
            .join(" │ ");
        out.push(line.trim_end().to_string());

        if header {
            let rule = widths
                .iter()
                .map(|&width| "─".repeat(width))
                .collect::<Vec<_>>()
                .join("─┼─");
            out.push(rule.as_str().dimmed().to_string());
        }
    }
    out
}

fn table_cells(row: &str) -> impl Iterator<Item = &str> {
    row.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(str::trim)
}

/// `|---|:--:|` style delimiter rows.
fn is_table_separator(row: &str) -> bool {
    let mut cells = table_cells(row).peekable();
    cells.peek().is_some()
        && cells.all(|cell| {
            cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
        })
}

/// Printed width of `s`, ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some((styled, used)) = span(rest) {
            out.push_str(&styled);
            rest = &rest[used..];
            continue;
        }

        if c == '\\' {
            if let Some(escaped) = rest[1..].chars().next().filter(char::is_ascii_punctuation) {
                out.push(escaped);
                rest = &rest[1 + escaped.len_utf8()..];
                continue;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Styles the span starting at the head of `rest`, returning it with the
/// number of bytes consumed.
fn span(rest: &str) -> Option<(String, usize)> {
    if let Some(inner) = rest.strip_prefix('`') {
        let end = inner.find('`')?;
        return Some((inner[..end].yellow().to_string(), end + 2));
    }

    for delim in ["**", "__"] {
        if let Some(inner) = rest.strip_prefix(delim) {
            let end = inner.find(delim).filter(|&end| end > 0)?;
            return Some((inline(&inner[..end]).as_str().bold().to_string(), end + 4));
        }
    }

    if let Some(inner) = rest.strip_prefix('*') {
        if inner.starts_with(char::is_whitespace) {
            return None;
        }
        let end = inner.find('*').filter(|&end| end > 0)?;
        return Some((inline(&inner[..end]).as_str().italic().to_string(), end + 2));
    }

    if let Some(inner) = rest.strip_prefix('!') {
        let (alt, _src, used) = link(inner)?;
        let label = if alt.is_empty() {
            "[image]".to_string()
        } else {
            format!("[image: {}]", alt)
        };
        return Some((label.as_str().dimmed().to_string(), used + 1));
    }

    let (text, href, used) = link(rest)?;
    let styled = if text.is_empty() || text == href {
        href.underline().blue().to_string()
    } else {
        format!(
            "{} {}",
            inline(text).as_str().underline().blue(),
            format!("({})", href).as_str().dimmed()
        )
    };
    Some((styled, used))
}

/// Parses `[text](href)` at the head of `rest`.
fn link(rest: &str) -> Option<(&str, &str, usize)> {
    let inner = rest.strip_prefix('[')?;
    let close = inner.find("](")?;
    let after = &inner[close + 2..];
    let end = after.find(')')?;
    Some((&inner[..close], &after[..end], 1 + close + 2 + end + 1))
}
