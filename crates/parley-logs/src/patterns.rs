//! Matchers shared by the thought and handoff extractors

use regex::Regex;
use std::sync::LazyLock;

/// A single extraction attempt. Returns the capture, if any.
pub(crate) type Matcher = fn(&str) -> Option<String>;

/// Run matchers in order and return the first capture.
pub(crate) fn first_match(matchers: &[Matcher], input: &str) -> Option<String> {
    matchers.iter().find_map(|matcher| matcher(input))
}

/// `((), {` at the start of a record.
static EMPTY_TUPLE_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\(\s*\(\s*\)\s*,\s*\{")
        .expect("EMPTY_TUPLE_RECORD is a compile-time constant")
});

static MESSAGES_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]messages['"]\s*:\s*"#).expect("MESSAGES_FIELD is a compile-time constant")
});

// Quote then `,` or `)`; the content itself may hold stray quotes.
static TAGGED_DELIMITED_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)HumanMessage\(content='(.*?)'\s*[,)]")
        .expect("TAGGED_DELIMITED_SINGLE is a compile-time constant")
});
static TAGGED_DELIMITED_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)HumanMessage\(content="(.*?)"\s*[,)]"#)
        .expect("TAGGED_DELIMITED_DOUBLE is a compile-time constant")
});

// Up to the first unescaped closing quote.
static TAGGED_CLOSED_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"HumanMessage\(content='((?:[^'\\]|\\.)*)'")
        .expect("TAGGED_CLOSED_SINGLE is a compile-time constant")
});
static TAGGED_CLOSED_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"HumanMessage\(content="((?:[^"\\]|\\.)*)""#)
        .expect("TAGGED_CLOSED_DOUBLE is a compile-time constant")
});

// No closing quote required: truncated records end mid-string.
static TAGGED_OPEN_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"HumanMessage\(content='((?:[^'\\]|\\.)*)")
        .expect("TAGGED_OPEN_SINGLE is a compile-time constant")
});
static TAGGED_OPEN_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"HumanMessage\(content="((?:[^"\\]|\\.)*)"#)
        .expect("TAGGED_OPEN_DOUBLE is a compile-time constant")
});

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#)
        .expect("QUOTED is a compile-time constant")
});

/// Tagged-message attempts, strictest first.
pub(crate) const TAGGED_MESSAGE_ATTEMPTS: [Matcher; 3] =
    [tagged_delimited, tagged_closed, tagged_open];

/// Whether the record starts with an empty first tuple element.
pub(crate) fn is_empty_tuple_record(record: &str) -> bool {
    EMPTY_TUPLE_RECORD.is_match(record)
}

/// Value bound to the first `messages:` key, if the record has one.
///
/// A list yields its body without the brackets; any other value runs to the
/// next top-level `,`. Truncated values run to the end of the record.
pub(crate) fn messages_value(record: &str) -> Option<&str> {
    let value = &record[MESSAGES_FIELD.find(record)?.end()..];
    Some(match value.strip_prefix('[') {
        Some(body) => list_body(body),
        None => &value[..value_end(value, true)],
    })
}

/// Body of a list whose opening `[` is already consumed.
pub(crate) fn list_body(input: &str) -> &str {
    &input[..value_end(input, false)]
}

// Byte offset of the first closing bracket (or top-level comma) outside
// quotes and nested groups.
fn value_end(input: &str, stop_at_comma: bool) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' if depth == 0 => return i,
            ']' | ')' | '}' => depth -= 1,
            ',' if depth == 0 && stop_at_comma => return i,
            _ => {}
        }
    }
    input.len()
}

fn capture_non_empty(patterns: [&Regex; 2], input: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|content| !content.is_empty())
            .map(unescape)
    })
}

fn tagged_delimited(input: &str) -> Option<String> {
    capture_non_empty([&TAGGED_DELIMITED_SINGLE, &TAGGED_DELIMITED_DOUBLE], input)
}

fn tagged_closed(input: &str) -> Option<String> {
    capture_non_empty([&TAGGED_CLOSED_SINGLE, &TAGGED_CLOSED_DOUBLE], input)
}

fn tagged_open(input: &str) -> Option<String> {
    capture_non_empty([&TAGGED_OPEN_SINGLE, &TAGGED_OPEN_DOUBLE], input)
}

/// First non-empty single- or double-quoted substring.
pub(crate) fn first_quoted(input: &str) -> Option<String> {
    QUOTED.captures_iter(input).find_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .filter(|content| !content.is_empty())
            .map(unescape)
    })
}

/// Undo the repr escaping of `\n`, `\t`, quotes and backslashes.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
