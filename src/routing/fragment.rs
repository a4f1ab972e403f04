//! Extraction of the page-content region from fetched HTML fragments.

/// Inline fragment rendered when even the not-found page cannot be loaded.
pub const FALLBACK_ERROR_FRAGMENT: &str = "<section class=\"page-error\">\
<h1>Page Not Found</h1>\
<p>The page you were looking for could not be loaded.</p>\
<a href=\"/\" data-page=\"home\">Back to home</a>\
</section>";

/// Return the inner markup of the element whose `id` is `region_id`.
///
/// Nested elements with the same tag name are balanced, so the returned
/// slice is exactly the region's children. Quoted attribute values,
/// comments and the bodies of `script`/`style` elements are skipped.
/// Returns `None` when no such element exists or it is never closed.
#[must_use]
pub fn extract_region<'a>(markup: &'a str, region_id: &str) -> Option<&'a str> {
    let mut tags = TagScanner::new(markup);
    let open = tags
        .by_ref()
        .find(|tag| !tag.closing && tag.id == Some(region_id))?;
    if open.self_closing {
        return Some("");
    }

    let mut depth = 1usize;
    for tag in tags {
        if !tag.name.eq_ignore_ascii_case(open.name) {
            continue;
        }
        if tag.closing {
            depth -= 1;
            if depth == 0 {
                return markup.get(open.end..tag.start);
            }
        } else if !tag.self_closing {
            depth += 1;
        }
    }
    None
}

/// Elements whose body is raw text, never markup.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// One start or end tag.
#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    closing: bool,
    self_closing: bool,
    id: Option<&'a str>,
    /// Offset of the tag's `<`.
    start: usize,
    /// Offset just past the tag's `>`.
    end: usize,
}

/// Yields the tags of a markup string in document order.
struct TagScanner<'a> {
    markup: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    fn new(markup: &'a str) -> Self {
        Self { markup, pos: 0 }
    }

    /// Offset just past `terminator` searched from `from`, or the end.
    fn skip_past(&self, from: usize, terminator: &str) -> usize {
        self.markup
            .get(from..)
            .and_then(|rest| rest.find(terminator))
            .map_or(self.markup.len(), |i| from + i + terminator.len())
    }

    /// Parse attributes from `i` up to the closing `>` of `tag`.
    fn scan_attributes(&self, mut i: usize, tag: &mut Tag<'a>) {
        let bytes = self.markup.as_bytes();
        let skip_space = |mut i: usize| {
            while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                i += 1;
            }
            i
        };
        while let Some(&b) = bytes.get(i) {
            match b {
                b'>' => {
                    tag.end = i + 1;
                    return;
                }
                b'/' => {
                    tag.self_closing = bytes.get(i + 1) == Some(&b'>');
                    i += 1;
                }
                b if b.is_ascii_whitespace() => i += 1,
                _ => {
                    let name_start = i;
                    while bytes.get(i).is_some_and(|&c| {
                        !c.is_ascii_whitespace()
                            && !matches!(c, b'=' | b'>' | b'/')
                    }) {
                        i += 1;
                    }
                    let attr = &self.markup[name_start..i];
                    i = skip_space(i);
                    if bytes.get(i) != Some(&b'=') {
                        continue;
                    }
                    i = skip_space(i + 1);
                    let value = match bytes.get(i) {
                        Some(&quote @ (b'"' | b'\'')) => {
                            let value_start = i + 1;
                            let value_end = self.markup[value_start..]
                                .find(char::from(quote))
                                .map_or(bytes.len(), |o| value_start + o);
                            i = (value_end + 1).min(bytes.len());
                            &self.markup[value_start..value_end]
                        }
                        _ => {
                            let value_start = i;
                            while bytes.get(i).is_some_and(|&c| {
                                !c.is_ascii_whitespace() && c != b'>'
                            }) {
                                i += 1;
                            }
                            &self.markup[value_start..i]
                        }
                    };
                    if attr.eq_ignore_ascii_case("id") {
                        tag.id = Some(value);
                    }
                }
            }
        }
        tag.end = bytes.len();
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let start = self.pos + self.markup.get(self.pos..)?.find('<')?;
            let rest = &self.markup[start..];
            if rest.starts_with("<!--") {
                self.pos = self.skip_past(start + 4, "-->");
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos = self.skip_past(start, ">");
                continue;
            }

            let closing = rest.as_bytes().get(1) == Some(&b'/');
            let name_start = start + 1 + usize::from(closing);
            let after = &self.markup[name_start..];
            if !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                // A stray `<` in text.
                self.pos = start + 1;
                continue;
            }
            let name_len = after
                .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                .unwrap_or(after.len());
            let mut tag = Tag {
                name: &after[..name_len],
                closing,
                self_closing: false,
                id: None,
                start,
                end: self.markup.len(),
            };
            self.scan_attributes(name_start + name_len, &mut tag);
            self.pos = tag.end;

            let raw_text = RAW_TEXT_ELEMENTS
                .iter()
                .any(|raw| tag.name.eq_ignore_ascii_case(raw));
            if raw_text && !closing && !tag.self_closing {
                let end_tag = format!("</{}", tag.name.to_ascii_lowercase());
                self.pos = self.markup[tag.end..]
                    .to_ascii_lowercase()
                    .find(&end_tag)
                    .map_or(self.markup.len(), |i| tag.end + i);
            }
            return Some(tag);
        }
    }
}
