// crates/engine/src/normalize/v1.rs

//! Normalization algorithm 1.0.0.
//!
//! Canonical form:
//! - a leading DOCTYPE declaration is stripped
//! - comments are removed, conditional comments included
//! - tag and attribute names are lower-cased, attribute values re-quoted
//!   with double quotes, intra-tag whitespace collapsed to single spaces
//! - whitespace adjacent to tags is dropped; runs of whitespace inside text
//!   collapse to a single space
//! - the contents of script, style, pre and textarea are preserved
//!   byte-for-byte

/// Elements whose content is copied verbatim.
const RAW_ELEMENTS: [&str; 4] = ["script", "style", "pre", "textarea"];

pub(crate) fn normalize(raw: &str) -> String {
    let input = strip_leading_doctype(raw);
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());

    let mut i = 0;
    let mut pending_space = false;
    let mut last_was_text = false;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if input[i..].starts_with("<!--") {
                i = match input[i..].find("-->") {
                    Some(rel) => i + rel + 3,
                    None => bytes.len(),
                };
                continue;
            }
            if input[i..].starts_with("<!") {
                // Markup declaration (stray doctype, CDATA): copy through '>'.
                let end = find_tag_end(bytes, i);
                out.push_str(&input[i..end]);
                i = end;
                pending_space = false;
                last_was_text = false;
                continue;
            }

            let end = find_tag_end(bytes, i);
            let tag_src = &input[i..end];
            let (normalized, name, is_open) = normalize_tag(tag_src);
            out.push_str(&normalized);
            i = end;
            pending_space = false;
            last_was_text = false;

            if is_open && RAW_ELEMENTS.contains(&name.as_str()) {
                i = copy_raw_content(input, i, &name, &mut out);
            }
            continue;
        }

        let c = input[i..].chars().next().unwrap_or('\u{FFFD}');
        if c.is_ascii_whitespace() {
            pending_space = true;
            i += 1;
            continue;
        }

        if pending_space && last_was_text {
            out.push(' ');
        }
        pending_space = false;
        last_was_text = true;
        out.push(c);
        i += c.len_utf8();
    }

    out
}

fn strip_leading_doctype(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    if trimmed.len() >= 9 && trimmed[..9].eq_ignore_ascii_case("<!doctype") {
        match trimmed.find('>') {
            Some(idx) => &trimmed[idx + 1..],
            None => "",
        }
    } else {
        raw
    }
}

/// Index one past the closing '>' of the tag starting at `start`.
/// Quoted attribute values may contain '>'.
fn find_tag_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(bytes[i]),
            (None, b'>') => return i + 1,
            (None, _) => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Re-emit a tag in canonical form. Returns (normalized text, lower-cased
/// element name, whether this is an opening tag).
fn normalize_tag(src: &str) -> (String, String, bool) {
    // src is "<...>" or "<..." at EOF; work on the interior.
    let interior = src
        .strip_prefix('<')
        .unwrap_or(src)
        .strip_suffix('>')
        .unwrap_or_else(|| src.strip_prefix('<').unwrap_or(src));

    let is_close = interior.starts_with('/');
    let interior = interior.strip_prefix('/').unwrap_or(interior);

    let name_end = interior
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(interior.len());
    let name = interior[..name_end].to_ascii_lowercase();

    if is_close {
        return (format!("</{name}>"), name, false);
    }

    let mut out = String::with_capacity(src.len());
    out.push('<');
    out.push_str(&name);

    let mut rest = interior[name_end..].trim_start();
    while !rest.is_empty() {
        if rest == "/" {
            break; // trailing self-closing slash is dropped
        }
        let attr_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let attr_name = rest[..attr_end].trim_end_matches('/').to_ascii_lowercase();
        rest = rest[attr_end..].trim_start();

        if !attr_name.is_empty() {
            out.push(' ');
            out.push_str(&attr_name);
        }

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remainder) = read_attr_value(after_eq);
            out.push_str("=\"");
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
            rest = remainder.trim_start();
        }
    }

    out.push('>');
    (out, name, true)
}

/// Read one attribute value (quoted or bare) and return it with the
/// remainder of the tag interior.
fn read_attr_value(s: &str) -> (&str, &str) {
    let mut chars = s.chars();
    match chars.next() {
        Some(q @ ('"' | '\'')) => {
            let body = &s[1..];
            match body.find(q) {
                Some(idx) => (&body[..idx], &body[idx + 1..]),
                None => (body, ""),
            }
        }
        _ => {
            let end = s
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(s.len());
            (&s[..end], &s[end..])
        }
    }
}

/// Copy a raw element's content verbatim up to (not including) its closing
/// tag, emit the canonical closing tag, and return the resume index.
fn copy_raw_content(input: &str, from: usize, name: &str, out: &mut String) -> usize {
    let closer = format!("</{name}");
    let lower = input[from..].to_ascii_lowercase();
    let mut search = 0;
    let found = loop {
        match lower[search..].find(&closer) {
            Some(rel) => {
                let idx = search + rel;
                // Token boundary: "</scripty" does not close "script".
                match lower.as_bytes().get(idx + closer.len()) {
                    None | Some(&b'>') | Some(&b'/') => break Some(idx),
                    Some(b) if b.is_ascii_whitespace() => break Some(idx),
                    _ => search = idx + closer.len(),
                }
            }
            None => break None,
        }
    };
    match found {
        Some(rel) => {
            let close_start = from + rel;
            out.push_str(&input[from..close_start]);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
            match input[close_start..].find('>') {
                Some(gt) => close_start + gt + 1,
                None => input.len(),
            }
        }
        None => {
            out.push_str(&input[from..]);
            input.len()
        }
    }
}
