//! Plain-text extraction from editor markup.
//!
//! The post editor produces simple HTML (paragraphs, emphasis, lists).
//! Before a draft is validated or submitted, the markup is reduced to plain
//! text: tags and comments are removed, then the common entity references
//! are decoded.

/// Longest entity reference accepted between `&` and `;`.  Anything longer
/// is treated as a literal ampersand.
const ENTITY_MAX_BYTES: usize = 12;

/// Reduce markup to plain text.
///
/// Tolerates the malformed fragments a rich-text editor can emit: `>` inside
/// quoted attribute values does not close the tag, an unclosed tag or
/// comment at end of input is dropped, and HTML comments are removed
/// entirely.  Named references for the characters editors escape (`&amp;`,
/// `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`) and numeric references are
/// decoded; unknown references pass through unchanged.
pub fn strip_markup(input: &str) -> String {
    decode_entities(&strip_tags(input))
}

fn strip_tags(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let open = match rest.find('<') {
            Some(i) => i,
            None => {
                text.push_str(rest);
                break;
            }
        };
        text.push_str(&rest[..open]);
        let tail = &rest[open..];

        if let Some(body) = tail.strip_prefix("<!--") {
            match body.find("-->") {
                Some(end) => rest = &body[end + 3..],
                // An unclosed comment swallows the rest of the input.
                None => break,
            }
        } else {
            match tag_len(&tail[1..]) {
                Some(len) => rest = &tail[1 + len..],
                // An unclosed tag at end of input is dropped.
                None => break,
            }
        }
    }

    text
}

/// Scan a tag interior for its terminating `>`, honouring single- and
/// double-quoted attribute values.  Returns the bytes consumed including
/// the closing `>`, or `None` if the tag never closes.
fn tag_len(tag: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in tag.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(idx + 1),
                _ => {}
            },
        }
    }
    None
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let semi = tail[1..].find(';').filter(|&n| n <= ENTITY_MAX_BYTES);
        match semi.and_then(|n| decode_entity(&tail[1..1 + n]).map(|c| (n, c))) {
            Some((n, c)) => {
                out.push(c);
                rest = &tail[n + 2..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
