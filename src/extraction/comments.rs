//! Leading comment collection and JSDoc tag parsing.

use tree_sitter::Node as TsNode;

use super::Context;
use crate::types::{CommentInfo, CommentKind, JsDocTag};

const COMMENT_KINDS: &[&str] = &["comment", "line_comment", "block_comment", "html_comment"];

/// Wrappers that sit between a declaration and its comments.
const WRAPPER_KINDS: &[&str] = &["export_statement", "decorated_definition"];

/// Tags whose first word after the type is a binding name.
const NAMED_TAGS: &[&str] = &["param", "arg", "argument", "property", "prop"];

/// Collects the run of comments immediately preceding `node`, in document order.
///
/// Comments attach to the outermost export or decorator wrapper. A blank line
/// between a comment and what follows ends the run.
pub(crate) fn leading_comments(ctx: &Context<'_>, node: TsNode<'_>) -> Vec<CommentInfo> {
    if !ctx.options.extract_comments {
        return Vec::new();
    }

    let mut anchor = node;
    while let Some(parent) = anchor.parent() {
        if !WRAPPER_KINDS.contains(&parent.kind()) {
            break;
        }
        anchor = parent;
    }

    let mut found = Vec::new();
    let mut next_row = anchor.start_position().row;
    let mut current = anchor.prev_sibling();
    while let Some(sibling) = current {
        if !COMMENT_KINDS.contains(&sibling.kind()) {
            break;
        }
        if sibling.end_position().row + 1 < next_row {
            break;
        }
        found.push(parse_comment(ctx.slice(sibling)));
        next_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }
    found.reverse();
    found
}

/// Strips comment markers and splits JSDoc blocks into text and tags.
pub fn parse_comment(raw: &str) -> CommentInfo {
    let raw = raw.trim();

    if raw.starts_with("/**") && raw != "/**/" {
        let body = strip_block(raw, "/**");
        let (text, tags) = parse_jsdoc(&body);
        return CommentInfo {
            text,
            kind: CommentKind::JsDoc,
            tags,
        };
    }
    if raw.starts_with("/*") {
        return CommentInfo {
            text: strip_block(raw, "/*").join("\n"),
            kind: CommentKind::Block,
            tags: Vec::new(),
        };
    }
    if raw.starts_with("<!--") {
        let inner = raw.trim_start_matches("<!--").trim_end_matches("-->");
        return CommentInfo {
            text: inner.trim().to_string(),
            kind: CommentKind::Block,
            tags: Vec::new(),
        };
    }

    let text = raw
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line
                .strip_prefix("///")
                .or_else(|| line.strip_prefix("//!"))
                .or_else(|| line.strip_prefix("//"))
                .or_else(|| line.strip_prefix('#'))
                .unwrap_or(line);
            line.trim().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n");
    CommentInfo {
        text,
        kind: CommentKind::Line,
        tags: Vec::new(),
    }
}

/// Body lines of a block comment with the opener, closer and `*` gutters removed.
fn strip_block(raw: &str, opener: &str) -> Vec<String> {
    let inner = raw.strip_prefix(opener).unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    let lines: Vec<String> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect();

    // Drop blank lines left over from the opener and closer lines.
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |e| e + 1);
    lines[start..end].to_vec()
}

fn parse_jsdoc(lines: &[String]) -> (String, Vec<JsDocTag>) {
    let mut description = Vec::new();
    let mut tags: Vec<JsDocTag> = Vec::new();

    for line in lines {
        if let Some(rest) = line.strip_prefix('@') {
            tags.push(parse_tag(rest));
        } else if let Some(last) = tags.last_mut() {
            if !line.is_empty() {
                if !last.description.is_empty() {
                    last.description.push(' ');
                }
                last.description.push_str(line);
            }
        } else {
            description.push(line.as_str());
        }
    }

    (description.join("\n").trim().to_string(), tags)
}

/// Parses `tag {type} name description` (the leading `@` already removed).
fn parse_tag(rest: &str) -> JsDocTag {
    let (tag, mut rest) = split_word(rest);
    let tag = tag.to_string();

    let mut type_name = None;
    if rest.starts_with('{') {
        let spec = rest;
        let mut depth = 0usize;
        for (i, ch) in spec.char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        type_name = Some(spec[1..i].trim().to_string());
                        rest = spec[i + 1..].trim_start();
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    let mut name = None;
    if NAMED_TAGS.contains(&tag.as_str()) {
        let (word, remainder) = split_word(rest);
        if !word.is_empty() {
            // `[name=default]` marks an optional parameter.
            let word = word.trim_start_matches('[').trim_end_matches(']');
            let word = word.split('=').next().unwrap_or(word);
            name = Some(word.to_string());
            rest = remainder;
        }
    }

    let description = rest.trim_start_matches('-').trim().to_string();
    JsDocTag {
        tag,
        name,
        type_name,
        description,
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim_start()),
        None => (text, ""),
    }
}
