//! Context-stack engine
//!
//! Builds the document tree from classified lines. The parser keeps a stack of frames, one per
//! open container. Each frame records the indentation of the line that opened it, so a later
//! content line indented at or left of a frame closes it:
//!
//!     a:            <- opens a mapping frame at column 0
//!       b: 1        <- lands in `a`
//!     c: 2          <- closes `a`, lands in the root
//!
//! The root mapping sits at column -1 and is never closed.
//!
//! Containers under construction live in an arena and frames refer to them by index. A key or
//! item whose value is a container stores the index; the tree is assembled once the last line
//! has been read. Containers orphaned by a duplicate key are never reached and are dropped.

use std::borrow::Cow;

use indexmap::IndexMap;

use super::block_scalar::{read_block_scalar, BlockHeader, BLOCK_INDENT_STEP};
use super::scalar::coerce_scalar;
use crate::yamlet::document::{Mapping, Node};
use crate::yamlet::error::{ErrorKind, ParseError, ParseResult};
use crate::yamlet::lexing::line_classification::find_key_separator;
use crate::yamlet::lexing::{classify_line, LineToken, LineType};

const ROOT: usize = 0;

const ROOT_FRAME: Frame = Frame {
    indent: -1,
    kind: FrameKind::Mapping,
    container: ROOT,
};

/// Parse a whole document. The root is always a mapping.
pub fn parse(text: &str) -> ParseResult<Node> {
    let text = normalize_newlines(text);
    let lines: Vec<&str> = text.split('\n').collect();
    Parser::new(&lines).run()
}

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Mapping,
    Sequence,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    indent: isize,
    kind: FrameKind,
    container: usize,
}

/// A value slot: either a finished node or a container still in the arena.
enum Slot {
    Value(Node),
    Container(usize),
}

enum Container {
    Mapping(IndexMap<String, Slot>),
    Sequence(Vec<Slot>),
}

/// Where a value goes: under a key of a mapping, or at the end of a sequence.
#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Key(usize, &'a str),
    Item(usize),
}

#[derive(Default)]
struct Arena {
    containers: Vec<Option<Container>>,
}

impl Arena {
    fn alloc(&mut self, kind: FrameKind) -> usize {
        let container = match kind {
            FrameKind::Mapping => Container::Mapping(IndexMap::new()),
            FrameKind::Sequence => Container::Sequence(Vec::new()),
        };
        self.containers.push(Some(container));
        self.containers.len() - 1
    }

    /// A duplicate key keeps its position and takes the new value.
    fn store(&mut self, target: Target<'_>, slot: Slot) {
        match target {
            Target::Key(id, key) => {
                if let Some(Some(Container::Mapping(entries))) = self.containers.get_mut(id) {
                    entries.insert(key.to_string(), slot);
                }
            }
            Target::Item(id) => {
                if let Some(Some(Container::Sequence(items))) = self.containers.get_mut(id) {
                    items.push(slot);
                }
            }
        }
    }

    fn build(mut self, id: usize) -> Node {
        self.take(id)
    }

    fn take(&mut self, id: usize) -> Node {
        match self.containers.get_mut(id).and_then(Option::take) {
            Some(Container::Mapping(entries)) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(key, slot)| (key, self.resolve(slot)))
                    .collect::<Mapping>(),
            ),
            Some(Container::Sequence(items)) => {
                Node::Sequence(items.into_iter().map(|slot| self.resolve(slot)).collect())
            }
            // Every container is stored in exactly one slot
            None => Node::null(),
        }
    }

    fn resolve(&mut self, slot: Slot) -> Node {
        match slot {
            Slot::Value(node) => node,
            Slot::Container(id) => self.take(id),
        }
    }
}

struct Parser<'a> {
    lines: &'a [&'a str],
    cursor: usize,
    arena: Arena,
    stack: Vec<Frame>,
}

impl<'a> Parser<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        let mut arena = Arena::default();
        let root = arena.alloc(FrameKind::Mapping);
        debug_assert_eq!(root, ROOT);
        Self {
            lines,
            cursor: 0,
            arena,
            stack: vec![ROOT_FRAME],
        }
    }

    fn run(mut self) -> ParseResult<Node> {
        let lines = self.lines;
        while let Some(&raw) = lines.get(self.cursor) {
            let number = self.cursor + 1;
            let Some(line) = classify_line(number, raw)? else {
                self.cursor += 1;
                continue;
            };

            tracing::trace!(
                line = number,
                indent = line.indent,
                kind = %line.line_type,
                content = line.content,
                "classified"
            );
            self.close_frames(line.indent);
            let frame = self.current();

            self.cursor = match (line.line_type, frame.kind) {
                (LineType::SequenceItem { value, value_column }, FrameKind::Sequence) => {
                    self.sequence_item(&line, frame.container, value, value_column)?
                }
                (LineType::SequenceItem { .. }, FrameKind::Mapping) => {
                    return Err(ParseError::new(number, ErrorKind::ListItemOutsideSequence));
                }
                (LineType::MappingEntry { key, value }, FrameKind::Mapping) => self.place_value(
                    Target::Key(frame.container, key),
                    value,
                    line.indent,
                    number,
                )?,
                (LineType::Text, FrameKind::Mapping) => {
                    return Err(ParseError::new(number, ErrorKind::MissingColon));
                }
                (_, FrameKind::Sequence) => {
                    return Err(ParseError::new(number, ErrorKind::EntryOutsideMapping));
                }
            };
        }

        tracing::trace!(
            containers = self.arena.containers.len(),
            open_frames = self.stack.len(),
            "document complete"
        );
        Ok(self.arena.build(ROOT))
    }

    fn current(&self) -> Frame {
        self.stack.last().copied().unwrap_or(ROOT_FRAME)
    }

    /// Pop every frame opened at or right of `indent`. The root frame stays.
    fn close_frames(&mut self, indent: usize) {
        while self.stack.len() > 1 && self.current().indent >= indent as isize {
            if let Some(frame) = self.stack.pop() {
                tracing::trace!(indent = frame.indent, kind = ?frame.kind, "close frame");
            }
        }
    }

    fn open_frame(&mut self, indent: usize, kind: FrameKind, container: usize) {
        tracing::trace!(indent, ?kind, line = self.cursor + 1, "open frame");
        self.stack.push(Frame {
            indent: indent as isize,
            kind,
            container,
        });
    }

    /// A `- ...` line in a sequence frame. Returns the index of the next line to read.
    fn sequence_item(
        &mut self,
        line: &LineToken<'a>,
        sequence: usize,
        value: &'a str,
        value_column: usize,
    ) -> ParseResult<usize> {
        let shorthand = if value.is_empty() || BlockHeader::parse(value).is_some() {
            None
        } else {
            find_key_separator(value)
        };

        match shorthand {
            // `- key: value` opens a mapping that later lines at the key's column extend
            Some(pos) => {
                let mapping = self.arena.alloc(FrameKind::Mapping);
                self.arena
                    .store(Target::Item(sequence), Slot::Container(mapping));
                self.open_frame(line.indent, FrameKind::Mapping, mapping);

                let key = value[..pos].trim();
                let rest = value[pos + 1..].trim();
                self.place_value(Target::Key(mapping, key), rest, value_column, line.number)
            }
            None => self.place_value(Target::Item(sequence), value, line.indent, line.number),
        }
    }

    /// Store the value written after a key or dash. `owner_indent` is the column of that key or
    /// dash: nested content must be indented past it, and block content starts two columns
    /// after it.
    fn place_value(
        &mut self,
        target: Target<'_>,
        value: &str,
        owner_indent: usize,
        number: usize,
    ) -> ParseResult<usize> {
        let next = self.cursor + 1;

        if let Some(header) = BlockHeader::parse(value) {
            let block = read_block_scalar(
                self.lines,
                next,
                owner_indent + BLOCK_INDENT_STEP,
                header,
            );
            self.arena
                .store(target, Slot::Value(Node::string(block.value)));
            return Ok(block.next_line);
        }

        if value.is_empty() {
            match self.peek_content_line(next)? {
                Some(child) if child.indent > owner_indent => {
                    let kind = if child.is_sequence_item() {
                        FrameKind::Sequence
                    } else {
                        FrameKind::Mapping
                    };
                    let id = self.arena.alloc(kind);
                    self.arena.store(target, Slot::Container(id));
                    self.open_frame(owner_indent, kind, id);
                }
                _ => self.arena.store(target, Slot::Value(Node::null())),
            }
            return Ok(next);
        }

        let node = coerce_scalar(value).map_err(|kind| ParseError::new(number, kind))?;
        self.arena.store(target, Slot::Value(node));
        Ok(next)
    }

    /// The first content line at or after `from`, without consuming anything.
    fn peek_content_line(&self, from: usize) -> ParseResult<Option<LineToken<'a>>> {
        for (index, raw) in self.lines.iter().copied().enumerate().skip(from) {
            if let Some(line) = classify_line(index + 1, raw)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
