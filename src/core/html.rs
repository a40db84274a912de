// src/core/html.rs
// Low-level HTML string scanning.
// Deliberately naive: no DOM, no nesting awareness beyond "first matching close tag".
// Tag names are matched case-insensitively; offsets into the lowercased copy are
// valid in the original because only ASCII is lowered.

/// Paragraph-level structure of a page, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBlock {
    /// `<p>`: `lead` is the text of the first `<strong>`/`<b>` inside, if any.
    Paragraph { lead: Option<String>, text: String },
    /// `<ul>` / `<ol>`: one entry per `<li>`.
    List { items: Vec<String> },
}

impl ContentBlock {
    pub fn paragraph(lead: Option<&str>, text: &str) -> Self {
        ContentBlock::Paragraph { lead: lead.map(String::from), text: s!(text) }
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentBlock::List { items: items.into_iter().map(Into::into).collect() }
    }
}

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find `<name` at or after `from` in an already-lowercased string, requiring a
/// tag-name boundary so `<b` does not match `<br>` or `<body>`.
pub fn find_tag(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = join!("<", name);
    let mut at = from;
    while let Some(rel) = lc.get(at..)?.find(&pat) {
        let start = at + rel;
        match lc[start + pat.len()..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            None => return None,
            _ => at = start + pat.len(),
        }
    }
    None
}

fn block_end(lc: &str, start: usize, close: &str) -> Option<usize> {
    let open_end = lc[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close)?;
    Some(open_end + end_rel + close.len())
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Replace every tag with a space so adjacent elements do not fuse
/// (`<b>Park</b><br>12 Main` → ` Park  12 Main `).
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => { in_tag = false; out.push(' '); }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Visible text of an HTML fragment: tags out, entities decoded, whitespace collapsed.
pub fn visible_text(fragment: &str) -> String {
    use super::sanitize::{normalize_entities, normalize_ws};
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

/// Scan a document into paragraph and list blocks, in order.
/// Anything else (headings, divs, tables) is skipped.
pub fn content_blocks(doc: &str) -> Vec<ContentBlock> {
    let lc = to_lower(doc);
    let mut out = Vec::new();
    let mut pos = 0usize;

    loop {
        let next = ["p", "ul", "ol"]
            .iter()
            .filter_map(|name| find_tag(&lc, name, pos).map(|at| (at, *name)))
            .min_by_key(|(at, _)| *at);
        let Some((start, name)) = next else { break };

        let close = join!("</", name, ">");
        let Some(end) = block_end(&lc, start, &close) else {
            // Unclosed tag: step over it and keep scanning.
            pos = lc[start..].find('>').map_or(lc.len(), |i| start + i + 1);
            continue;
        };

        let block = &doc[start..end];
        out.push(match name {
            "p" => read_paragraph(block),
            _ => read_list(block),
        });
        pos = end;
    }

    out
}

fn read_paragraph(block: &str) -> ContentBlock {
    let inner = inner_after_open_tag(block);
    let lc = to_lower(&inner);

    let lead = [("strong", "</strong>"), ("b", "</b>")]
        .iter()
        .filter_map(|(name, close)| find_tag(&lc, name, 0).map(|at| (at, *close)))
        .min_by_key(|(at, _)| *at)
        .and_then(|(at, close)| block_end(&lc, at, close).map(|end| &inner[at..end]))
        .map(|b| visible_text(&inner_after_open_tag(b)))
        .filter(|t| !t.is_empty());

    ContentBlock::Paragraph { lead, text: visible_text(&inner) }
}

fn read_list(block: &str) -> ContentBlock {
    let inner = inner_after_open_tag(block);
    let lc = to_lower(&inner);
    let mut items = Vec::new();
    let mut pos = 0usize;

    while let Some(start) = find_tag(&lc, "li", pos) {
        let end = block_end(&lc, start, "</li>")
            .or_else(|| find_tag(&lc, "li", start + 3))
            .unwrap_or(inner.len());
        let item = visible_text(&inner[start..end]);
        if !item.is_empty() {
            items.push(item);
        }
        pos = end.max(start + 3);
    }

    ContentBlock::List { items }
}
