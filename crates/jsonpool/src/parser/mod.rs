//! The recursive-descent parse core.
//!
//! The core is monomorphized per input shape: document width × source kind
//! × byte order, with the [`Source`] trait supplying native-order units and
//! the in-place write capability. Grammar errors surface as
//! [`ParseError`]s positioned at the byte offset of the offending unit.
//!
//! String and number text is stored by a per-value decision (see
//! [`crate::options::StringStorage`]): point into the buffer untouched,
//! rewrite it in place, or measure–allocate–copy into the pool. The measure
//! pass doubles as the check for whether any translation is needed at all.

mod source;

pub(crate) use source::{as_units, as_units_mut, ByteSource, ReadSource, Source, UnitSource};

use alloc::vec::Vec;

use crate::codec::CodeUnit;
use crate::error::{ErrorKind, ParseError};
use crate::node::{add_child, Kind, Lit, Node, NodeId, Text};
use crate::options::{ParseOptions, StringStorage};
use crate::pool::{Pool, Slot};
use crate::tables::{is_digit, is_whitespace};
use crate::unicode::{decode_point, encode_point, encoded_len, seq_len, Units};

/// Where translated output is accumulating.
enum Writer {
    Pool { slot: Slot, at: usize },
    Inline { start: usize, at: usize },
}

pub(crate) struct Parser<'a, W: CodeUnit, S: Source> {
    src: S,
    pos: usize,
    nodes: &'a mut Vec<Node>,
    pool: &'a mut Pool<W>,
    opts: ParseOptions,
}

/// Parses `src` into `root`, which must be an empty container node.
pub(crate) fn parse_into<W: CodeUnit, S: Source>(
    nodes: &mut Vec<Node>,
    pool: &mut Pool<W>,
    root: NodeId,
    src: S,
    opts: ParseOptions,
) -> Result<(), ParseError> {
    Parser {
        src,
        pos: 0,
        nodes,
        pool,
        opts,
    }
    .parse_document(root)
}

impl<W: CodeUnit, S: Source> Parser<'_, W, S> {
    #[inline]
    fn len(&self) -> usize {
        self.src.len()
    }

    /// The unit at `index`, widened for comparisons.
    #[inline]
    fn u(&self, index: usize) -> u32 {
        self.src.at(index).as_u32()
    }

    fn err(&self, kind: ErrorKind) -> ParseError {
        self.err_at(kind, self.pos)
    }

    fn err_at(&self, kind: ErrorKind, unit_index: usize) -> ParseError {
        ParseError::new(kind, unit_index * S::Unit::WIDTH)
    }

    fn parse_document(&mut self, root: NodeId) -> Result<(), ParseError> {
        self.skip_blank();
        if self.pos >= self.len() {
            return Err(self.err(ErrorKind::UnexpectedStart));
        }
        match self.u(self.pos) {
            0x7b => {
                self.pos += 1;
                self.parse_object(root)?;
            }
            0x5b => {
                self.pos += 1;
                self.parse_array(root)?;
            }
            _ => return Err(self.err(ErrorKind::UnexpectedStart)),
        }
        self.skip_blank();
        // Only blank space and a terminating code-unit zero may follow.
        if self.pos < self.len() && self.u(self.pos) != 0 {
            return Err(self.err(ErrorKind::UnexpectedTrailing));
        }
        Ok(())
    }

    /// Skips whitespace and, when enabled, `#`, `//` and `/* */` comments,
    /// looping until neither is present.
    fn skip_blank(&mut self) {
        loop {
            while self.pos < self.len() && is_whitespace(self.u(self.pos)) {
                self.pos += 1;
            }
            if !self.opts.allow_comments || self.pos >= self.len() {
                return;
            }
            match self.u(self.pos) {
                0x23 => {
                    // '#' to end of line
                    self.pos += 1;
                    while self.pos < self.len() && self.u(self.pos) != 0x0a {
                        self.pos += 1;
                    }
                }
                0x2f if self.pos + 1 < self.len() && self.u(self.pos + 1) == 0x2f => {
                    self.pos += 2;
                    while self.pos < self.len() && self.u(self.pos) != 0x0a {
                        self.pos += 1;
                    }
                }
                0x2f if self.pos + 1 < self.len() && self.u(self.pos + 1) == 0x2a => {
                    self.pos += 2;
                    loop {
                        if self.pos >= self.len() {
                            // Unterminated block comment swallows the rest.
                            return;
                        }
                        if self.u(self.pos) == 0x2a
                            && self.pos + 1 < self.len()
                            && self.u(self.pos + 1) == 0x2f
                        {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn parse_value(&mut self) -> Result<NodeId, ParseError> {
        if self.pos >= self.len() {
            return Err(self.err(ErrorKind::UnexpectedToken));
        }
        match self.u(self.pos) {
            // '-', digits, and a '.' that cannot start a number but gets
            // routed into the number scanner for the sharper diagnostic.
            0x2d | 0x2e | 0x30..=0x39 => {
                let text = self.parse_number()?;
                Ok(self.push_node(Node::scalar(Kind::Number, text)))
            }
            0x74 => {
                self.expect_literal(b"true")?;
                Ok(self.push_node(Node::scalar(Kind::Bool, Text::Literal(Lit::True))))
            }
            0x66 => {
                self.expect_literal(b"false")?;
                Ok(self.push_node(Node::scalar(Kind::Bool, Text::Literal(Lit::False))))
            }
            0x6e => {
                self.expect_literal(b"null")?;
                Ok(self.push_node(Node::scalar(Kind::Null, Text::Literal(Lit::Null))))
            }
            0x7b => {
                self.pos += 1;
                let id = self.push_node(Node::container(Kind::Object));
                self.parse_object(id)?;
                Ok(id)
            }
            0x5b => {
                self.pos += 1;
                let id = self.push_node(Node::container(Kind::Array));
                self.parse_array(id)?;
                Ok(id)
            }
            0x22 => {
                self.pos += 1;
                let text = self.parse_string()?;
                Ok(self.push_node(Node::scalar(Kind::String, text)))
            }
            _ => Err(self.err(ErrorKind::UnexpectedToken)),
        }
    }

    fn expect_literal(&mut self, lit: &[u8]) -> Result<(), ParseError> {
        if self.pos + lit.len() > self.len()
            || lit
                .iter()
                .enumerate()
                .any(|(k, &b)| self.u(self.pos + k) != u32::from(b))
        {
            return Err(self.err(ErrorKind::UnexpectedToken));
        }
        self.pos += lit.len();
        Ok(())
    }

    fn parse_object(&mut self, id: NodeId) -> Result<(), ParseError> {
        self.nodes[id.index()].kind = Kind::Object;
        self.skip_blank();
        if self.pos < self.len() && self.u(self.pos) == 0x7d {
            self.pos += 1;
            return Ok(());
        }
        loop {
            if self.pos >= self.len() || self.u(self.pos) != 0x22 {
                return Err(self.err(ErrorKind::ExpectedName));
            }
            self.pos += 1;
            let name = self.parse_string()?;
            self.skip_blank();
            if self.pos >= self.len() || self.u(self.pos) != 0x3a {
                return Err(self.err(ErrorKind::ExpectedColon));
            }
            self.pos += 1;
            self.skip_blank();
            let child = self.parse_value()?;
            self.nodes[child.index()].name = name;
            add_child(self.nodes, id, child);
            self.skip_blank();
            if self.pos < self.len() && self.u(self.pos) == 0x2c {
                self.pos += 1;
                self.skip_blank();
                self.close_off(child);
                if self.opts.allow_trailing_commas
                    && self.pos < self.len()
                    && self.u(self.pos) == 0x7d
                {
                    self.pos += 1;
                    break;
                }
            } else if self.pos < self.len() && self.u(self.pos) == 0x7d {
                self.pos += 1;
                self.close_off(child);
                break;
            } else {
                return Err(self.err(ErrorKind::ExpectedSeparator));
            }
        }
        Ok(())
    }

    fn parse_array(&mut self, id: NodeId) -> Result<(), ParseError> {
        self.nodes[id.index()].kind = Kind::Array;
        self.skip_blank();
        if self.pos < self.len() && self.u(self.pos) == 0x5d {
            self.pos += 1;
            return Ok(());
        }
        loop {
            let child = self.parse_value()?;
            add_child(self.nodes, id, child);
            self.skip_blank();
            if self.pos < self.len() && self.u(self.pos) == 0x2c {
                self.pos += 1;
                self.skip_blank();
                self.close_off(child);
                if self.opts.allow_trailing_commas
                    && self.pos < self.len()
                    && self.u(self.pos) == 0x5d
                {
                    self.pos += 1;
                    break;
                }
            } else if self.pos < self.len() && self.u(self.pos) == 0x5d {
                self.pos += 1;
                self.close_off(child);
                break;
            } else {
                return Err(self.err(ErrorKind::ExpectedSeparator));
            }
        }
        Ok(())
    }

    /// Terminates the previous value's in-buffer text with a code-unit
    /// zero. Only meaningful for the default destructive mode; the unit
    /// overwritten is the already-consumed separator or quote.
    fn close_off(&mut self, child: NodeId) {
        if !S::WRITABLE || self.opts.strings != StringStorage::InPlace {
            return;
        }
        if let Text::Input { end, .. } = self.nodes[child.index()].text {
            if end < self.len() && self.u(end) != 0 {
                self.src.put(end, S::Unit::from_u32(0));
            }
        }
    }

    // ------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------

    /// Validates the number grammar starting at `pos` and leaves `pos` one
    /// past its final digit. The text is not evaluated here.
    fn scan_number(&mut self) -> Result<(), ParseError> {
        if self.pos < self.len() && self.u(self.pos) == 0x2d {
            self.pos += 1;
        }
        // A single zero, or a nonzero digit run. `0123` parses as `0`
        // followed by a stray `1`, which the container then rejects.
        if self.pos < self.len() && self.u(self.pos) == 0x30 {
            self.pos += 1;
        } else {
            let digits = self.skip_digits();
            if digits == 0 {
                return Err(self.err(ErrorKind::ExpectedDigit));
            }
        }
        if self.pos < self.len() && self.u(self.pos) == 0x2e {
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(self.err(ErrorKind::ExpectedDigit));
            }
        }
        if self.pos < self.len() && matches!(self.u(self.pos), 0x65 | 0x45) {
            self.pos += 1;
            if self.pos < self.len() && matches!(self.u(self.pos), 0x2b | 0x2d) {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(self.err(ErrorKind::ExpectedDigit));
            }
        }
        Ok(())
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.pos < self.len() && is_digit(self.u(self.pos)) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse_number(&mut self) -> Result<Text, ParseError> {
        let translate = S::SWAPPED || S::Unit::WIDTH != W::WIDTH;

        // Zero-copy view, buffer untouched.
        if self.opts.strings == StringStorage::Borrow && !translate && S::BORROWABLE {
            let start = self.pos;
            self.scan_number()?;
            return Ok(Text::Input {
                start,
                end: self.pos,
            });
        }

        // The text stays in the buffer, byte-swapped into place if needed.
        // Termination happens at the next separator (`close_off`).
        if S::WRITABLE
            && self.opts.strings != StringStorage::Copy
            && (!translate || !self.opts.copy_translated)
        {
            let start = self.pos;
            self.scan_number()?;
            if translate {
                for i in start..self.pos {
                    let unit = self.src.at(i);
                    self.src.put(i, unit);
                }
            }
            return Ok(Text::Input {
                start,
                end: self.pos,
            });
        }

        // Copy into the pool, terminated. Number text is ASCII, so units
        // transfer across widths directly.
        let start = self.pos;
        self.scan_number()?;
        let count = self.pos - start;
        let slot = self.alloc(count + 1)?;
        for k in 0..count {
            let unit = self.src.at(start + k);
            self.pool.write(slot, k, W::from_u32(unit.as_u32()));
        }
        self.pool.write(slot, count, W::from_u32(0));
        Ok(Text::Pool(slot.truncated(count)))
    }

    // ------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------

    /// Parses a string body; `pos` is one past the opening quote on entry
    /// and one past the closing quote on return.
    fn parse_string(&mut self) -> Result<Text, ParseError> {
        let mut require_copy = W::WIDTH > S::Unit::WIDTH
            || self.opts.strings == StringStorage::Copy
            || !S::WRITABLE;
        let need_measure = require_copy
            || self.opts.strings == StringStorage::Borrow
            || self.opts.copy_translated
            || S::SWAPPED;

        let mut out_len = 0;
        if need_measure {
            let (translated, measured, end) = self.measure_string()?;
            if self.opts.strings == StringStorage::Borrow && !translated && S::BORROWABLE {
                // Nothing to rewrite and no terminator wanted: the fastest
                // case, a plain view of the buffer.
                let start = self.pos;
                self.pos = end + 1;
                return Ok(Text::Input { start, end });
            }
            if self.opts.copy_translated {
                require_copy = true;
            }
            out_len = measured;
        }

        let mut writer = if require_copy {
            let slot = self.alloc(out_len + 1)?;
            Writer::Pool { slot, at: 0 }
        } else {
            Writer::Inline {
                start: self.pos,
                at: self.pos,
            }
        };

        loop {
            if self.pos >= self.len() {
                return Err(self.err(ErrorKind::UnterminatedString));
            }
            match self.u(self.pos) {
                0x22 => {
                    let text = self.finish_writer(writer);
                    self.pos += 1;
                    return Ok(text);
                }
                0x5c => {
                    self.pos += 1;
                    self.translate_escape(&mut writer)?;
                }
                0 => return Err(self.err(ErrorKind::UnterminatedString)),
                _ => self.translate_run(&mut writer)?,
            }
        }
    }

    /// Scans a string body without writing: reports whether any translation
    /// is required, the exact output length in document units, and the
    /// index of the closing quote.
    fn measure_string(&self) -> Result<(bool, usize, usize), ParseError> {
        let mut translated = S::SWAPPED || S::Unit::WIDTH != W::WIDTH;
        let mut i = self.pos;
        let mut out = 0usize;
        loop {
            if i >= self.len() {
                return Err(self.err_at(ErrorKind::UnterminatedString, i));
            }
            match self.u(i) {
                0x22 => return Ok((translated, out, i)),
                0 => return Err(self.err_at(ErrorKind::UnterminatedString, i)),
                0x5c => {
                    translated = true;
                    i += 1;
                    if i >= self.len() {
                        return Err(self.err_at(ErrorKind::InvalidEscape, i));
                    }
                    match self.u(i) {
                        0x22 | 0x5c | 0x2f | 0x62 | 0x66 | 0x6e | 0x72 | 0x74 => {
                            i += 1;
                            out += 1;
                        }
                        0x75 => {
                            let (cp, next) = self.unicode_escape(i, i - 1)?;
                            i = next;
                            out += encoded_len::<W>(cp);
                        }
                        _ => return Err(self.err_at(ErrorKind::InvalidEscape, i)),
                    }
                }
                _ => {
                    if S::Unit::WIDTH == W::WIDTH {
                        let n = seq_len(&self.src, i).map_err(|k| self.err_at(k, i))?;
                        out += n;
                        i += n;
                    } else {
                        let (cp, n) =
                            decode_point(&self.src, i).map_err(|k| self.err_at(k, i))?;
                        out += encoded_len::<W>(cp);
                        i += n;
                    }
                }
            }
        }
    }

    /// Resolves one escape sequence; `pos` is at the character after the
    /// backslash.
    fn translate_escape(&mut self, writer: &mut Writer) -> Result<(), ParseError> {
        if self.pos >= self.len() {
            return Err(self.err(ErrorKind::InvalidEscape));
        }
        let c = self.u(self.pos);
        match c {
            0x22 | 0x5c | 0x2f => {
                self.push_unit(writer, W::from_u32(c));
                self.pos += 1;
            }
            0x62 => {
                self.push_unit(writer, W::from_u32(0x08));
                self.pos += 1;
            }
            0x66 => {
                self.push_unit(writer, W::from_u32(0x0c));
                self.pos += 1;
            }
            0x6e => {
                self.push_unit(writer, W::from_u32(0x0a));
                self.pos += 1;
            }
            0x72 => {
                self.push_unit(writer, W::from_u32(0x0d));
                self.pos += 1;
            }
            0x74 => {
                self.push_unit(writer, W::from_u32(0x09));
                self.pos += 1;
            }
            0x75 => {
                let (cp, next) = self.unicode_escape(self.pos, self.pos - 1)?;
                self.pos = next;
                for &unit in encode_point::<W>(cp).as_slice() {
                    self.push_unit(writer, unit);
                }
            }
            _ => return Err(self.err(ErrorKind::InvalidEscape)),
        }
        Ok(())
    }

    /// Reads `uXXXX`, or a full surrogate pair `uXXXX\uYYYY`, starting at
    /// the `u`. Returns the code point and the index one past the escape.
    /// Surrogate errors are reported at the escape's backslash.
    fn unicode_escape(
        &self,
        at: usize,
        escape_start: usize,
    ) -> Result<(u32, usize), ParseError> {
        let mut i = at + 1;
        let hi = self.read_quad(&mut i)?;
        if (0xdc00..=0xdfff).contains(&hi) {
            return Err(self.err_at(ErrorKind::InvalidSurrogate, escape_start));
        }
        if (0xd800..=0xdbff).contains(&hi) {
            if i + 1 >= self.len() || self.u(i) != 0x5c || self.u(i + 1) != 0x75 {
                return Err(self.err_at(ErrorKind::InvalidSurrogate, escape_start));
            }
            i += 2;
            let lo = self.read_quad(&mut i)?;
            if !(0xdc00..=0xdfff).contains(&lo) {
                return Err(self.err_at(ErrorKind::InvalidSurrogate, escape_start));
            }
            let cp = 0x0001_0000 + (((hi - 0xd800) << 10) | (lo - 0xdc00));
            return Ok((cp, i));
        }
        Ok((hi, i))
    }

    /// Reads four hex digits at `*i`, advancing it.
    fn read_quad(&self, i: &mut usize) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..4 {
            if *i >= self.len() {
                return Err(self.err_at(ErrorKind::InvalidEscape, *i));
            }
            let digit = match self.u(*i) {
                c @ 0x30..=0x39 => c - 0x30,
                c @ 0x61..=0x66 => c - 0x61 + 10,
                c @ 0x41..=0x46 => c - 0x41 + 10,
                _ => return Err(self.err_at(ErrorKind::InvalidHex, *i)),
            };
            value = (value << 4) | digit;
            *i += 1;
        }
        Ok(value)
    }

    /// Copies one unescaped code point through to the writer.
    fn translate_run(&mut self, writer: &mut Writer) -> Result<(), ParseError> {
        if S::Unit::WIDTH == W::WIDTH {
            let n = seq_len(&self.src, self.pos).map_err(|k| self.err(k))?;
            for k in 0..n {
                let unit = self.src.at(self.pos + k);
                self.push_unit(writer, W::from_u32(unit.as_u32()));
            }
            self.pos += n;
        } else {
            let (cp, n) = decode_point(&self.src, self.pos).map_err(|k| self.err(k))?;
            self.pos += n;
            for &unit in encode_point::<W>(cp).as_slice() {
                self.push_unit(writer, unit);
            }
        }
        Ok(())
    }

    fn push_unit(&mut self, writer: &mut Writer, unit: W) {
        match writer {
            Writer::Pool { slot, at } => {
                self.pool.write(*slot, *at, unit);
                *at += 1;
            }
            Writer::Inline { at, .. } => {
                // In-place output never outruns consumption: escapes only
                // ever contract the text.
                self.src.put(*at, S::Unit::from_u32(unit.as_u32()));
                *at += 1;
            }
        }
    }

    /// Terminates the written text and builds its view.
    fn finish_writer(&mut self, writer: Writer) -> Text {
        match writer {
            Writer::Pool { slot, at } => {
                self.pool.write(slot, at, W::from_u32(0));
                Text::Pool(slot.truncated(at))
            }
            Writer::Inline { start, at } => {
                // Lands on the closing quote or earlier, both consumed.
                self.src.put(at, S::Unit::from_u32(0));
                Text::Input { start, end: at }
            }
        }
    }

    fn alloc(&mut self, len: usize) -> Result<Slot, ParseError> {
        self.pool
            .alloc(len)
            .map_err(|_| self.err(ErrorKind::OutOfMemory))
    }
}
