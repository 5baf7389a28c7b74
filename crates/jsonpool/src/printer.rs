//! Rendering a document back to JSON text.
//!
//! Output goes one code unit at a time into a [`Sink`]. Every unit above
//! 0x7F is emitted as a `\uXXXX` escape (a pair for code points beyond the
//! BMP), which makes the rendered text pure ASCII, so the sink's unit
//! width is independent of the document's, and the output is valid in any
//! encoding.
//!
//! Number values are emitted in their canonical rendering (see
//! [`crate::convert`]); parsed number text whose value does not fit a
//! double's finite range is copied through verbatim so the output is always
//! legal JSON.

use alloc::string::String;

use crate::codec::CodeUnit;
use crate::convert::number_to_text;
use crate::document::Document;
use crate::node::{Kind, NodeId};
use crate::options::PrintOptions;
use crate::tables::HEX_CHARS;
use crate::unicode::decode_point;

/// Receives printed output one code unit at a time.
pub trait Sink<V: CodeUnit> {
    fn write_one(&mut self, unit: V);
}

impl<V: CodeUnit> Sink<V> for alloc::vec::Vec<V> {
    #[inline]
    fn write_one(&mut self, unit: V) {
        self.push(unit);
    }
}

/// Printed output is ASCII, so collecting 8-bit units into a `String` is
/// lossless.
impl Sink<u8> for String {
    #[inline]
    fn write_one(&mut self, unit: u8) {
        self.push(char::from(unit));
    }
}

/// Prints the whole document.
pub fn print<W, V, S>(sink: &mut S, doc: &Document<'_, W>, options: PrintOptions)
where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    print_node(sink, doc, doc.root(), options, 0, true);
}

/// Prints one value (and its subtree). The value's own member name, if
/// any, is not emitted.
pub fn print_value<W, V, S>(sink: &mut S, doc: &Document<'_, W>, id: NodeId, options: PrintOptions)
where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    print_node(sink, doc, id, options, 0, true);
}

/// Convenience: prints the whole document into a fresh `String`.
#[must_use]
pub fn print_to_string<W: CodeUnit>(doc: &Document<'_, W>, options: PrintOptions) -> String {
    let mut out = String::new();
    print(&mut out, doc, options);
    out
}

fn print_node<W, V, S>(
    sink: &mut S,
    doc: &Document<'_, W>,
    id: NodeId,
    opts: PrintOptions,
    depth: usize,
    skip_name: bool,
) where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    emit_indent(sink, opts, depth);

    let name = doc.name(id);
    if !skip_name && !name.is_empty() {
        emit_string(sink, name);
        put(sink, b':');
        if opts.whitespace {
            put(sink, b' ');
        }
    }

    match doc.kind(id) {
        // Literal text is already in its final form.
        Kind::Null | Kind::Bool => copy_ascii_units(sink, doc.as_string(id)),
        Kind::Number => emit_number(sink, doc, id),
        Kind::String => emit_string(sink, doc.as_string(id)),
        Kind::Array | Kind::Object => {
            let array = doc.kind(id) == Kind::Array;
            put(sink, if array { b'[' } else { b'{' });
            let mut first = true;
            let mut cur = doc.first_child(id);
            while let Some(child) = cur {
                if !first {
                    put(sink, b',');
                    if array && opts.whitespace {
                        put(sink, b' ');
                    }
                }
                if !array && opts.whitespace {
                    put(sink, b'\n');
                }
                // Arrays flow on one line; object members indent one level.
                print_node(
                    sink,
                    doc,
                    child,
                    opts,
                    if array { 0 } else { depth + 1 },
                    false,
                );
                first = false;
                cur = doc.next_sibling(child);
            }
            if !first && !array && opts.whitespace {
                put(sink, b'\n');
                emit_indent(sink, opts, depth);
            }
            put(sink, if array { b']' } else { b'}' });
        }
    }
}

#[inline]
fn put<V: CodeUnit, S: Sink<V>>(sink: &mut S, byte: u8) {
    sink.write_one(V::from_u32(u32::from(byte)));
}

fn emit_indent<V: CodeUnit, S: Sink<V>>(sink: &mut S, opts: PrintOptions, depth: usize) {
    if !opts.whitespace {
        return;
    }
    let (unit, count) = if opts.use_spaces {
        (b' ', depth * opts.indent.width())
    } else {
        (b'\t', depth)
    };
    for _ in 0..count {
        put(sink, unit);
    }
}

/// `\uXXXX` for one 16-bit unit.
fn emit_uescape<V: CodeUnit, S: Sink<V>>(sink: &mut S, value: u32) {
    put(sink, b'\\');
    put(sink, b'u');
    put(sink, HEX_CHARS[((value >> 12) & 0xf) as usize]);
    put(sink, HEX_CHARS[((value >> 8) & 0xf) as usize]);
    put(sink, HEX_CHARS[((value >> 4) & 0xf) as usize]);
    put(sink, HEX_CHARS[(value & 0xf) as usize]);
}

/// Quoted and escaped string content. `\` and `"` get backslash escapes,
/// the short-escape controls their two-character forms, every other C0
/// control and everything above 0x7F a `\uXXXX` form.
fn emit_string<W, V, S>(sink: &mut S, units: &[W])
where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    put(sink, b'"');
    let mut i = 0;
    while i < units.len() {
        let c = units[i].as_u32();
        match c {
            0x22 | 0x5c => {
                put(sink, b'\\');
                put(sink, c as u8);
                i += 1;
            }
            0x08 => {
                put(sink, b'\\');
                put(sink, b'b');
                i += 1;
            }
            0x0c => {
                put(sink, b'\\');
                put(sink, b'f');
                i += 1;
            }
            0x0d => {
                put(sink, b'\\');
                put(sink, b'r');
                i += 1;
            }
            0x0a => {
                put(sink, b'\\');
                put(sink, b'n');
                i += 1;
            }
            0x09 => {
                put(sink, b'\\');
                put(sink, b't');
                i += 1;
            }
            0x00..=0x1f => {
                emit_uescape(sink, c);
                i += 1;
            }
            0x20..=0x7f => {
                put(sink, c as u8);
                i += 1;
            }
            _ => match decode_point(units, i) {
                Ok((cp, n)) => {
                    if cp < 0x0001_0000 {
                        emit_uescape(sink, cp);
                    } else {
                        let v = cp - 0x0001_0000;
                        emit_uescape(sink, 0xd800 | (v >> 10));
                        emit_uescape(sink, 0xdc00 | (v & 0x3ff));
                    }
                    i += n;
                }
                Err(_) => {
                    // Unpaired or malformed storage; substitute rather
                    // than emit broken JSON.
                    emit_uescape(sink, 0xfffd);
                    i += 1;
                }
            },
        }
    }
    put(sink, b'"');
}

/// Numbers re-render canonically from their value; text evaluating outside
/// the finite range is passed through as scanned.
fn emit_number<W, V, S>(sink: &mut S, doc: &Document<'_, W>, id: NodeId)
where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    let (text, is_number) = number_to_text(doc.as_number(id));
    if is_number {
        for b in text.bytes() {
            put(sink, b);
        }
    } else {
        copy_ascii_units(sink, doc.as_string(id));
    }
}

/// Copies units that are known to be ASCII (literals and number text)
/// across widths.
fn copy_ascii_units<W, V, S>(sink: &mut S, units: &[W])
where
    W: CodeUnit,
    V: CodeUnit,
    S: Sink<V>,
{
    for &u in units {
        sink.write_one(V::from_u32(u.as_u32()));
    }
}
