use serde::{Deserialize, Serialize};

/// A heading element in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Extract every `<h1>`..`<h6>` element from raw HTML, in document order
///
/// Single left-to-right pass, case-insensitive, not nesting-aware: a match
/// runs from `<hN ...>` to the first `</hN>` and scanning resumes after it, so
/// headings nested inside another heading are folded into its text. Opening
/// tags without a matching close are skipped.
pub fn extract_headings(html: &str) -> Vec<Heading> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut headings = Vec::new();
    let mut pos = 0;

    // First '>' found by the last attribute scan; still the answer for any
    // later tag that starts before it
    let mut next_gt: Option<usize> = None;
    // Per level: no `</hN>` exists at or after this offset
    let mut unclosed_from: [Option<usize>; 6] = [None; 6];

    while let Some(found) = lower[pos..].find("<h") {
        let start = pos + found;
        let level_byte = bytes.get(start + 2).copied();

        let level = match level_byte {
            Some(b @ b'1'..=b'6') => b - b'0',
            _ => {
                pos = start + 2;
                continue;
            }
        };

        // `[^>]*>`: attributes run to the first '>'
        let gt = match next_gt {
            Some(gt) if gt >= start + 3 => gt,
            _ => match lower[start + 3..].find('>') {
                Some(i) => start + 3 + i,
                None => break,
            },
        };
        next_gt = Some(gt);
        let open_end = gt + 1;

        let slot = usize::from(level - 1);
        let closing = format!("</h{}>", level);
        let close = match unclosed_from[slot] {
            Some(miss) if open_end >= miss => None,
            _ => lower[open_end..].find(&closing).map(|i| open_end + i),
        };

        match close {
            Some(close_start) => {
                headings.push(Heading {
                    level,
                    text: inner_text(&html[open_end..close_start]),
                });
                pos = close_start + closing.len();
            }
            None => {
                unclosed_from[slot].get_or_insert(open_end);
                pos = start + 2;
            }
        }
    }

    headings
}

/// Visible text of an HTML fragment: `<...>` tags removed, entities decoded, whitespace collapsed
///
/// A `<` with no later `>` is not a tag and stays in the text.
pub fn inner_text(fragment: &str) -> String {
    let mut stripped = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(lt) = rest.find('<') {
        stripped.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => break,
        }
    }
    stripped.push_str(rest);

    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        // last so "&amp;lt;" decodes to "&lt;" rather than "<"
        .replace("&amp;", "&")
}
