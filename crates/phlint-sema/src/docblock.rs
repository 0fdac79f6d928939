//! Lenient docblock parsing.
//!
//! Docblocks are scanned line by line. A content line starting with
//! `@` becomes a tag; everything else is prose. Malformed tag lines
//! are dropped rather than reported: the checks downstream only act
//! on what parsed cleanly.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// A type expression as written in a docblock tag, e.g. `?Foo|Bar[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// The expression text.
    pub text: SmolStr,
    /// The expression's range in the source file.
    pub range: TextRange,
}

/// A single recognized docblock tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocblockTag {
    /// `@param Type $name`.
    Param {
        /// The documented parameter, without the `$` sigil.
        name: SmolStr,
        /// The documented type.
        ty: TypeExpr,
        /// The tag line's range in the source file.
        range: TextRange,
    },
    /// `@return Type`.
    Return {
        /// The documented type.
        ty: TypeExpr,
        /// The tag line's range in the source file.
        range: TextRange,
    },
    /// `@var Type`.
    Var {
        /// The documented type.
        ty: TypeExpr,
        /// The tag line's range in the source file.
        range: TextRange,
    },
    /// `@inheritDoc`, either as a tag line or inline as
    /// `{@inheritDoc}`.
    InheritDoc {
        /// The marker's range in the source file.
        range: TextRange,
    },
    /// Any other `@tag` line.
    Other {
        /// The tag name, without the `@`.
        tag: SmolStr,
        /// The tag line's range in the source file.
        range: TextRange,
    },
}

/// A parsed documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docblock {
    /// The recognized tags, in order of appearance.
    pub tags: Vec<DocblockTag>,
    /// The comment's range in the source file.
    pub range: TextRange,
}

impl Docblock {
    /// Returns `true` when the docblock's only tags mark it as
    /// inheriting documentation from a parent; its structure is then
    /// defined elsewhere and not checked here.
    #[must_use]
    pub fn inherits_only(&self) -> bool {
        !self.tags.is_empty()
            && self
                .tags
                .iter()
                .all(|tag| matches!(tag, DocblockTag::InheritDoc { .. }))
    }

    /// Iterates the `@param` tags in order of appearance.
    pub fn param_tags(&self) -> impl Iterator<Item = (&str, &TypeExpr)> {
        self.tags.iter().filter_map(|tag| match tag {
            DocblockTag::Param { name, ty, .. } => Some((name.as_str(), ty)),
            _ => None,
        })
    }

    /// Iterates every type expression the docblock mentions.
    pub fn type_exprs(&self) -> impl Iterator<Item = &TypeExpr> {
        self.tags.iter().filter_map(|tag| match tag {
            DocblockTag::Param { ty, .. }
            | DocblockTag::Return { ty, .. }
            | DocblockTag::Var { ty, .. } => Some(ty),
            _ => None,
        })
    }
}

/// Parses the text of a `/** ... */` comment. `range` is the
/// comment's range in the source file; tag and type ranges come out
/// in file coordinates.
#[must_use]
pub fn parse(text: &str, range: TextRange) -> Docblock {
    let mut tags = Vec::new();
    let mut line_offset = 0usize;
    for line in text.split_inclusive('\n') {
        let (content_start, content) = line_content(line);
        if !content.is_empty() {
            let base = range.start() + TextSize::from((line_offset + content_start) as u32);
            scan_content(content, base, &mut tags);
        }
        line_offset += line.len();
    }
    Docblock { tags, range }
}

/// Strips one line's comment furniture: indentation, the `/**` or
/// `*` margin, and the closing fence. Returns the content and its
/// byte offset within the line.
fn line_content(line: &str) -> (usize, &str) {
    let mut start = 0usize;
    let mut rest = line;

    let trimmed = rest.trim_start();
    start += rest.len() - trimmed.len();
    rest = trimmed;

    if let Some(after) = rest.strip_prefix("/**") {
        start += 3;
        rest = after;
    } else if let Some(after) = rest.strip_prefix('*') {
        if !after.starts_with('/') {
            start += 1;
            rest = after;
        }
    }

    let trimmed = rest.trim_start();
    start += rest.len() - trimmed.len();
    rest = trimmed;

    let rest = rest.trim_end();
    let rest = match rest.strip_suffix("*/") {
        Some(before) => before.trim_end(),
        None => rest,
    };
    (start, rest)
}

fn scan_content(content: &str, base: TextSize, tags: &mut Vec<DocblockTag>) {
    if content.starts_with('@') {
        scan_tag(content, base, tags);
    }
    // The inline form can sit anywhere in prose.
    let lowered = content.to_ascii_lowercase();
    if let Some(at) = lowered.find("{@inheritdoc}") {
        let start = base + TextSize::from(at as u32);
        tags.push(DocblockTag::InheritDoc {
            range: TextRange::at(start, TextSize::from("{@inheritdoc}".len() as u32)),
        });
    }
}

fn scan_tag(content: &str, base: TextSize, tags: &mut Vec<DocblockTag>) {
    let words = tokens(content);
    let Some(&(_, tag_word)) = words.first() else {
        return;
    };
    if tag_word.len() < 2 {
        return;
    }
    let range = TextRange::at(base, TextSize::of(content));
    match tag_word.to_ascii_lowercase().as_str() {
        "@param" => scan_param(content, &words, base, range, tags),
        "@return" => {
            if let Some(ty) = single_type(&words, base) {
                tags.push(DocblockTag::Return { ty, range });
            }
        }
        "@var" => {
            if let Some(ty) = single_type(&words, base) {
                tags.push(DocblockTag::Var { ty, range });
            }
        }
        "@inheritdoc" => tags.push(DocblockTag::InheritDoc { range }),
        _ => tags.push(DocblockTag::Other {
            tag: SmolStr::new(tag_word.trim_start_matches('@')),
            range,
        }),
    }
}

fn scan_param(
    content: &str,
    words: &[(usize, &str)],
    base: TextSize,
    range: TextRange,
    tags: &mut Vec<DocblockTag>,
) {
    // The `$name` token anchors the end of the type, so array shapes
    // may contain spaces.
    let Some(name_index) = words
        .iter()
        .skip(1)
        .position(|(_, word)| names_parameter(word))
        .map(|found| found + 1)
    else {
        return;
    };
    if name_index == 1 {
        // `@param $x` documents no type.
        return;
    }
    let name = parameter_name(words[name_index].1);
    if name.is_empty() {
        return;
    }
    let (type_start, _) = words[1];
    let (last_start, last_word) = words[name_index - 1];
    let type_text = content[type_start..last_start + last_word.len()].trim_end();
    tags.push(DocblockTag::Param {
        name,
        ty: TypeExpr {
            text: SmolStr::new(type_text),
            range: TextRange::at(base + TextSize::from(type_start as u32), TextSize::of(type_text)),
        },
        range,
    });
}

fn single_type(words: &[(usize, &str)], base: TextSize) -> Option<TypeExpr> {
    let &(offset, word) = words.get(1)?;
    if word.starts_with('$') {
        return None;
    }
    Some(TypeExpr {
        text: SmolStr::new(word),
        range: TextRange::at(base + TextSize::from(offset as u32), TextSize::of(word)),
    })
}

fn names_parameter(word: &str) -> bool {
    word.trim_start_matches('&')
        .trim_start_matches("...")
        .starts_with('$')
}

/// Normalizes a documented parameter token: `&...$name,` becomes
/// `name`.
fn parameter_name(word: &str) -> SmolStr {
    let word = word.trim_start_matches('&').trim_start_matches("...");
    let word = word.trim_start_matches('$');
    SmolStr::new(word.trim_end_matches(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_'))
}

/// Splits a line into whitespace-separated tokens with byte offsets.
fn tokens(line: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (at, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(from) = start.take() {
                words.push((from, &line[from..at]));
            }
        } else if start.is_none() {
            start = Some(at);
        }
    }
    if let Some(from) = start {
        words.push((from, &line[from..]));
    }
    words
}
