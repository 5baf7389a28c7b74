//! The document: a parsed or hand-built JSON tree plus the storage behind
//! it.
//!
//! A [`Document`] owns an index arena of nodes and a text pool, and after a
//! parse it additionally borrows the caller's buffer so zero-copy text views
//! stay resolvable. Values are addressed by [`NodeId`]; reads can go through
//! the borrowed [`ValueRef`] wrapper for chaining, while mutation goes
//! through `&mut self` methods taking ids.
//!
//! Mutators never panic on invalid arguments; they return `false`, `None`
//! or the null sentinel, and leave the tree untouched.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::CodeUnit;
use crate::convert::{number_to_text, text_to_boolean, text_to_number};
use crate::encoding::Encoding;
use crate::error::{ErrorKind, ParseError};
use crate::node::{add_child, unlink_child, Kind, Lit, Node, NodeId, Text};
use crate::options::{ParseOptions, StringStorage};
use crate::parser::{as_units, as_units_mut, parse_into, ByteSource, ReadSource, UnitSource};
use crate::pool::{Pool, Slot, DYNAMIC_POOL_BYTES, STATIC_POOL_BYTES};
use crate::printer;

/// The parse buffer a document's zero-copy text views point into.
#[derive(Debug, Default)]
enum ParseBuffer<'buf> {
    #[default]
    None,
    Shared(&'buf [u8]),
    Exclusive(&'buf mut [u8]),
}

/// A JSON document over code units of type `W`.
///
/// `'buf` is the lifetime of the most recently parsed input buffer; a
/// document that is only ever built through the factory functions can use
/// any lifetime. The root is always a container, initially an empty object.
///
/// # Examples
///
/// ```
/// use jsonpool::{Document, ParseOptions};
///
/// let mut data = br#"{"answer": 42}"#.to_vec();
/// let mut doc: Document = Document::new();
/// doc.parse(&mut data, None, ParseOptions::default()).unwrap();
/// let answer = doc.root_value().member(b"answer");
/// assert_eq!(answer.as_number(), 42.0);
/// ```
#[derive(Debug)]
pub struct Document<'buf, W: CodeUnit = u8> {
    nodes: Vec<Node>,
    pool: Pool<W>,
    input: ParseBuffer<'buf>,
    root: NodeId,
}

/// A UTF-8 document.
pub type Utf8Document<'buf> = Document<'buf, u8>;
/// A UTF-16 document.
pub type Utf16Document<'buf> = Document<'buf, u16>;
/// A UTF-32 document.
pub type Utf32Document<'buf> = Document<'buf, u32>;

impl<W: CodeUnit> Default for Document<'_, W> {
    fn default() -> Self {
        Document::new()
    }
}

impl<'buf, W: CodeUnit> Document<'buf, W> {
    /// An empty document (root is an empty object) with default pool sizes.
    #[must_use]
    pub fn new() -> Self {
        Document::with_pool_sizes(STATIC_POOL_BYTES, DYNAMIC_POOL_BYTES)
    }

    /// An empty document with explicit pool tier sizes in bytes. Either may
    /// be zero; see [`crate::pool`] for what the tiers do.
    #[must_use]
    pub fn with_pool_sizes(static_bytes: usize, dynamic_bytes: usize) -> Self {
        let mut nodes = Vec::with_capacity(2);
        nodes.push(Node::sentinel());
        nodes.push(Node::container(Kind::Object));
        Document {
            nodes,
            pool: Pool::with_sizes(static_bytes, dynamic_bytes),
            input: ParseBuffer::None,
            root: NodeId(1),
        }
    }

    /// Resets the document to an empty root, releasing all dynamic pool
    /// blocks. Every previously obtained [`NodeId`] becomes invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::sentinel());
        self.nodes.push(Node::container(Kind::Object));
        self.root = NodeId(1);
        self.pool.clear();
        self.input = ParseBuffer::None;
    }

    /// Number of dynamic pool blocks currently allocated.
    #[must_use]
    pub fn dynamic_pool_blocks(&self) -> usize {
        self.pool.dynamic_blocks()
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parses `data`, replacing the document's contents.
    ///
    /// The encoding is detected from the buffer when `encoding` is `None`.
    /// Under the default options the buffer is consumed: string escapes are
    /// resolved in place and values are terminated with code-unit zeros.
    /// Pass [`ParseOptions::non_destructive`] (or use
    /// [`Document::parse_readonly`]) to keep the buffer intact.
    ///
    /// # Errors
    ///
    /// On any grammar, encoding or allocation failure the error names the
    /// offending byte offset and the document is left reset and empty.
    pub fn parse(
        &mut self,
        data: &'buf mut [u8],
        encoding: Option<Encoding>,
        options: ParseOptions,
    ) -> Result<(), ParseError> {
        self.clear();
        let enc = Self::resolve_encoding(data, encoding)?;
        let root = self.root;
        let result = {
            let nodes = &mut self.nodes;
            let pool = &mut self.pool;
            let swap = enc.is_swapped();
            let attempt = if enc.code_unit_size() == W::WIDTH {
                Self::parse_aligned(nodes, pool, root, &mut *data, swap, options)
            } else {
                None
            };
            match attempt {
                Some(r) => r,
                None => match enc.code_unit_size() {
                    1 => parse_into(nodes, pool, root, ByteSource::<u8, false>::new(data), options),
                    2 if swap => {
                        parse_into(nodes, pool, root, ByteSource::<u16, true>::new(data), options)
                    }
                    2 => parse_into(nodes, pool, root, ByteSource::<u16, false>::new(data), options),
                    _ if swap => {
                        parse_into(nodes, pool, root, ByteSource::<u32, true>::new(data), options)
                    }
                    _ => parse_into(nodes, pool, root, ByteSource::<u32, false>::new(data), options),
                },
            }
        };
        match result {
            Ok(()) => {
                self.input = ParseBuffer::Exclusive(data);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Parses without write access to the buffer. The options are forced to
    /// the non-destructive mode; unescaped text stays a zero-copy view into
    /// `data`, everything else is copied into the pool.
    ///
    /// # Errors
    ///
    /// As for [`Document::parse`].
    pub fn parse_readonly(
        &mut self,
        data: &'buf [u8],
        encoding: Option<Encoding>,
        options: ParseOptions,
    ) -> Result<(), ParseError> {
        let options = ParseOptions {
            strings: StringStorage::Borrow,
            copy_translated: true,
            ..options
        };
        self.clear();
        let enc = Self::resolve_encoding(data, encoding)?;
        let root = self.root;
        let result = {
            let nodes = &mut self.nodes;
            let pool = &mut self.pool;
            let swap = enc.is_swapped();
            let aligned = if enc.code_unit_size() == W::WIDTH {
                as_units::<W>(data)
            } else {
                None
            };
            match aligned {
                Some(units) if swap => parse_into(
                    nodes,
                    pool,
                    root,
                    ReadSource::<W, true>::new(units),
                    options,
                ),
                Some(units) => parse_into(
                    nodes,
                    pool,
                    root,
                    ReadSource::<W, false>::new(units),
                    options,
                ),
                None => match enc.code_unit_size() {
                    1 => parse_into(nodes, pool, root, ByteSource::<u8, false>::new(data), options),
                    2 if swap => {
                        parse_into(nodes, pool, root, ByteSource::<u16, true>::new(data), options)
                    }
                    2 => parse_into(nodes, pool, root, ByteSource::<u16, false>::new(data), options),
                    _ if swap => {
                        parse_into(nodes, pool, root, ByteSource::<u32, true>::new(data), options)
                    }
                    _ => parse_into(nodes, pool, root, ByteSource::<u32, false>::new(data), options),
                },
            }
        };
        match result {
            Ok(()) => {
                self.input = ParseBuffer::Shared(data);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    fn resolve_encoding(data: &[u8], encoding: Option<Encoding>) -> Result<Encoding, ParseError> {
        if data.is_empty() {
            return Err(ParseError::new(ErrorKind::UnexpectedStart, 0));
        }
        match encoding {
            Some(e) => Ok(e),
            None => Encoding::detect(data).map_err(|k| ParseError::new(k, 0)),
        }
    }

    /// Same-width fast path: view the bytes as document units and parse
    /// with in-place storage available. `None` when the buffer does not
    /// line up, in which case the caller falls back to the copying path.
    fn parse_aligned(
        nodes: &mut Vec<Node>,
        pool: &mut Pool<W>,
        root: NodeId,
        data: &mut [u8],
        swap: bool,
        options: ParseOptions,
    ) -> Option<Result<(), ParseError>> {
        let units = as_units_mut::<W>(data)?;
        Some(if swap {
            parse_into(nodes, pool, root, UnitSource::<W, true>::new(units), options)
        } else {
            parse_into(nodes, pool, root, UnitSource::<W, false>::new(units), options)
        })
    }

    // ------------------------------------------------------------------
    // Text resolution
    // ------------------------------------------------------------------

    fn input_units(&self) -> &[W] {
        let bytes: &[u8] = match &self.input {
            ParseBuffer::None => &[],
            ParseBuffer::Shared(b) => b,
            ParseBuffer::Exclusive(b) => b,
        };
        as_units::<W>(bytes).unwrap_or(&[])
    }

    pub(crate) fn resolve(&self, text: Text) -> &[W] {
        match text {
            Text::Literal(Lit::Empty) => W::EMPTY,
            Text::Literal(Lit::Null) => W::NULL,
            Text::Literal(Lit::True) => W::TRUE,
            Text::Literal(Lit::False) => W::FALSE,
            Text::Input { start, end } => &self.input_units()[start..end],
            Text::Pool(slot) => self.pool.slice(slot),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The root container. Always an object or an array.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root as a [`ValueRef`] for chained reads.
    #[must_use]
    pub fn root_value(&self) -> ValueRef<'_, 'buf, W> {
        self.value(self.root)
    }

    /// Wraps an id for chained reads.
    #[must_use]
    pub fn value(&self, id: NodeId) -> ValueRef<'_, 'buf, W> {
        ValueRef { doc: self, id }
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Kind {
        self.nodes[id.index()].kind
    }

    /// Whether the value is JSON `null`, which is true in particular for the
    /// sentinel that missing lookups return.
    #[must_use]
    pub fn is_null(&self, id: NodeId) -> bool {
        self.kind(id) == Kind::Null
    }

    /// The member name this value is stored under; empty for array
    /// elements and the root.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &[W] {
        self.resolve(self.nodes[id.index()].name)
    }

    /// The rendered text of a scalar: literal text for `null`/`bool`,
    /// canonical or source text for numbers, decoded content for strings.
    /// Containers yield the empty string.
    #[must_use]
    pub fn as_string(&self, id: NodeId) -> &[W] {
        self.resolve(self.nodes[id.index()].text)
    }

    /// Numeric coercion of the rendered text; see [`crate::convert`] rules.
    /// `null` and `false` are `0.0`, `true` is `1.0`.
    #[must_use]
    pub fn as_number(&self, id: NodeId) -> f64 {
        text_to_number(self.as_string(id))
    }

    /// Boolean coercion of the rendered text.
    #[must_use]
    pub fn as_boolean(&self, id: NodeId) -> bool {
        text_to_boolean(self.as_string(id))
    }

    #[must_use]
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].owner
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].first
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].last
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].next
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].prev
    }

    /// Number of children; zero for scalars.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.index()].count
    }

    #[must_use]
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.child_count(id) == 0
    }

    /// First child with the given name, or the null sentinel. Comparison
    /// is exact per code unit; no Unicode normalization. O(n).
    #[must_use]
    pub fn member(&self, id: NodeId, name: &[W]) -> NodeId {
        let mut cur = self.nodes[id.index()].first;
        while let Some(c) = cur {
            if self.resolve(self.nodes[c.index()].name) == name {
                return c;
            }
            cur = self.nodes[c.index()].next;
        }
        NodeId::SENTINEL
    }

    /// Child by signed index: non-negative from the front, negative from
    /// the back (`-1` is the last child). Out of range yields the null
    /// sentinel. O(n).
    #[must_use]
    pub fn at(&self, id: NodeId, index: isize) -> NodeId {
        let node = &self.nodes[id.index()];
        let mut cur;
        if index < 0 {
            cur = node.last;
            let mut steps = index.unsigned_abs() - 1;
            while steps > 0 && cur.is_some() {
                cur = cur.and_then(|c| self.nodes[c.index()].prev);
                steps -= 1;
            }
        } else {
            cur = node.first;
            let mut steps = index as usize;
            while steps > 0 && cur.is_some() {
                cur = cur.and_then(|c| self.nodes[c.index()].next);
                steps -= 1;
            }
        }
        cur.unwrap_or(NodeId::SENTINEL)
    }

    fn nth_child(&self, id: NodeId, n: usize) -> Option<NodeId> {
        let mut cur = self.nodes[id.index()].first;
        for _ in 0..n {
            cur = cur.and_then(|c| self.nodes[c.index()].next);
        }
        cur
    }

    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    /// A fresh detached `null` value.
    pub fn new_null(&mut self) -> NodeId {
        self.push_node(Node::scalar(Kind::Null, Text::Literal(Lit::Null)))
    }

    /// A fresh detached boolean.
    pub fn new_bool(&mut self, value: bool) -> NodeId {
        let lit = if value { Lit::True } else { Lit::False };
        self.push_node(Node::scalar(Kind::Bool, Text::Literal(lit)))
    }

    /// A fresh detached number, rendered to canonical text immediately.
    ///
    /// A non-finite `value` cannot be a JSON number: the node is created as
    /// a *string* reading `Inf`, `-Inf` or `NaN`, so the print path always
    /// emits legal JSON.
    pub fn new_number(&mut self, value: f64) -> NodeId {
        let (text, is_number) = number_to_text(value);
        let kind = if is_number { Kind::Number } else { Kind::String };
        let units: Vec<W> = text.bytes().map(|b| W::from_u32(u32::from(b))).collect();
        let slot = self.copy_terminated(&units);
        self.push_node(Node::scalar(kind, Text::Pool(slot)))
    }

    /// A fresh detached string; `value` is copied into the pool.
    pub fn new_string(&mut self, value: &[W]) -> NodeId {
        let slot = self.copy_terminated(value);
        self.push_node(Node::scalar(Kind::String, Text::Pool(slot)))
    }

    /// A fresh detached string transcoded from UTF-8 into the document
    /// width.
    pub fn new_string_utf8(&mut self, value: &str) -> NodeId {
        let mut units: Vec<W> = Vec::with_capacity(value.len());
        for c in value.chars() {
            units.extend_from_slice(crate::unicode::encode_point::<W>(c as u32).as_slice());
        }
        self.new_string(&units)
    }

    /// A fresh detached empty array.
    pub fn new_array(&mut self) -> NodeId {
        self.push_node(Node::container(Kind::Array))
    }

    /// A fresh detached empty object.
    pub fn new_object(&mut self) -> NodeId {
        self.push_node(Node::container(Kind::Object))
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Copies `units` into the pool with a trailing code-unit zero,
    /// returning the slot narrowed to the text itself.
    fn copy_terminated(&mut self, units: &[W]) -> Slot {
        let slot = match self.pool.alloc(units.len() + 1) {
            Ok(slot) => slot,
            Err(_) => pool_overflow(),
        };
        for (k, &u) in units.iter().enumerate() {
            self.pool.write(slot, k, u);
        }
        self.pool.write(slot, units.len(), W::from_u32(0));
        slot.truncated(units.len())
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// A value is attachable if it is not the sentinel and has no owner.
    fn attachable(&self, value: NodeId) -> bool {
        value != NodeId::SENTINEL
            && value.index() < self.nodes.len()
            && self.nodes[value.index()].owner.is_none()
    }

    /// Walks `container`'s ownership chain looking for `value`; attaching
    /// would close a cycle.
    fn would_cycle(&self, container: NodeId, value: NodeId) -> bool {
        let mut cur = Some(container);
        while let Some(c) = cur {
            if c == value {
                return true;
            }
            cur = self.nodes[c.index()].owner;
        }
        false
    }

    /// Appends `value` to an array. Fails (returning `false`) if `self` is
    /// not an array or `value` is the sentinel, already owned, or an
    /// ancestor of the array.
    pub fn array_add(&mut self, array: NodeId, value: NodeId) -> bool {
        if self.kind(array) != Kind::Array
            || !self.attachable(value)
            || self.would_cycle(array, value)
        {
            return false;
        }
        add_child(&mut self.nodes, array, value);
        true
    }

    /// Inserts `value` at a clamped signed position: non-negative `index`
    /// inserts after that many existing elements (`isize::MAX` appends);
    /// negative `index` counts back from the end, so `-1` inserts before
    /// the current last element and `isize::MIN` before the first.
    pub fn array_insert(&mut self, array: NodeId, value: NodeId, index: isize) -> bool {
        if self.kind(array) != Kind::Array
            || !self.attachable(value)
            || self.would_cycle(array, value)
        {
            return false;
        }
        let len = self.child_count(array);
        let posn = if index >= 0 {
            (index as usize).min(len)
        } else {
            len.saturating_sub(index.unsigned_abs())
        };
        if posn == len {
            add_child(&mut self.nodes, array, value);
            return true;
        }
        // nth_child exists because posn < len.
        let Some(before) = self.nth_child(array, posn) else {
            return false;
        };
        let prev = self.nodes[before.index()].prev;
        {
            let v = &mut self.nodes[value.index()];
            v.owner = Some(array);
            v.prev = prev;
            v.next = Some(before);
        }
        match prev {
            Some(p) => self.nodes[p.index()].next = Some(value),
            None => self.nodes[array.index()].first = Some(value),
        }
        self.nodes[before.index()].prev = Some(value);
        self.nodes[array.index()].count += 1;
        true
    }

    /// Detaches and returns the element at a clamped signed index
    /// (`isize::MIN` removes the first element, `isize::MAX` the last).
    /// `None` for a non-array or an empty array. The value's storage stays
    /// in the pool; it may be re-attached anywhere in this document.
    pub fn array_remove(&mut self, array: NodeId, index: isize) -> Option<NodeId> {
        if self.kind(array) != Kind::Array {
            return None;
        }
        let len = self.child_count(array);
        if len == 0 {
            return None;
        }
        let posn = if index >= 0 {
            (index as usize).min(len - 1)
        } else {
            len.saturating_sub(index.unsigned_abs())
        };
        let child = self.nth_child(array, posn)?;
        unlink_child(&mut self.nodes, array, child);
        Some(child)
    }

    /// Replaces the element at exactly `index` with `value`; `index`
    /// equal to the length appends instead. Anything past that fails. The
    /// replaced element is fully detached.
    pub fn array_set(&mut self, array: NodeId, index: usize, value: NodeId) -> bool {
        if self.kind(array) != Kind::Array
            || !self.attachable(value)
            || self.would_cycle(array, value)
        {
            return false;
        }
        let len = self.child_count(array);
        if index == len {
            add_child(&mut self.nodes, array, value);
            return true;
        }
        if index > len {
            return false;
        }
        let Some(old) = self.nth_child(array, index) else {
            return false;
        };
        self.splice_over(array, old, value);
        true
    }

    /// Sets a member by name. If a member with the same name exists, the
    /// new value takes its place in the sibling order and the old value is
    /// detached and returned; otherwise the value is appended and the null
    /// sentinel is returned. `None` means the call was invalid (not an
    /// object, empty name, or `value` not attachable). The name is copied
    /// into the document pool.
    pub fn object_set(&mut self, object: NodeId, name: &[W], value: NodeId) -> Option<NodeId> {
        if self.kind(object) != Kind::Object
            || name.is_empty()
            || !self.attachable(value)
            || self.would_cycle(object, value)
        {
            return None;
        }
        let slot = self.copy_terminated(name);
        self.nodes[value.index()].name = Text::Pool(slot);
        let existing = self.member(object, name);
        if existing == NodeId::SENTINEL {
            add_child(&mut self.nodes, object, value);
            return Some(NodeId::SENTINEL);
        }
        self.splice_over(object, existing, value);
        Some(existing)
    }

    /// Detaches and returns the first member with the given name; `None`
    /// if there is none or the name is empty.
    pub fn object_remove(&mut self, object: NodeId, name: &[W]) -> Option<NodeId> {
        if self.kind(object) != Kind::Object || name.is_empty() {
            return None;
        }
        let found = self.member(object, name);
        if found == NodeId::SENTINEL {
            return None;
        }
        unlink_child(&mut self.nodes, object, found);
        Some(found)
    }

    /// Detaches every child, leaving an empty container. No-op for
    /// scalars.
    pub fn remove_all(&mut self, id: NodeId) {
        let mut cur = self.nodes[id.index()].first;
        while let Some(c) = cur {
            let next = self.nodes[c.index()].next;
            let node = &mut self.nodes[c.index()];
            node.owner = None;
            node.prev = None;
            node.next = None;
            cur = next;
        }
        let node = &mut self.nodes[id.index()];
        node.first = None;
        node.last = None;
        node.count = 0;
    }

    /// Puts `value` into `old`'s exact position in `parent`'s sibling
    /// list and detaches `old`. The child count is unchanged.
    fn splice_over(&mut self, parent: NodeId, old: NodeId, value: NodeId) {
        let prev = self.nodes[old.index()].prev;
        let next = self.nodes[old.index()].next;
        {
            let v = &mut self.nodes[value.index()];
            v.owner = Some(parent);
            v.prev = prev;
            v.next = next;
        }
        match prev {
            Some(p) => self.nodes[p.index()].next = Some(value),
            None => self.nodes[parent.index()].first = Some(value),
        }
        match next {
            Some(n) => self.nodes[n.index()].prev = Some(value),
            None => self.nodes[parent.index()].last = Some(value),
        }
        let o = &mut self.nodes[old.index()];
        o.owner = None;
        o.prev = None;
        o.next = None;
    }
}

#[cold]
fn pool_overflow() -> ! {
    panic!("jsonpool: memory pool allocation failed")
}

/// A borrowed read-only view of one value in a document.
///
/// Lookups on the wrong kind, or for missing names/indices, return the
/// shared null sentinel (a value whose `is_null()` is true), so reads can
/// be chained without intermediate checks.
pub struct ValueRef<'d, 'buf, W: CodeUnit> {
    doc: &'d Document<'buf, W>,
    id: NodeId,
}

impl<W: CodeUnit> Clone for ValueRef<'_, '_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: CodeUnit> Copy for ValueRef<'_, '_, W> {}

impl<'d, 'buf, W: CodeUnit> ValueRef<'d, 'buf, W> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.doc.kind(self.id)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.kind() == Kind::Number
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    #[must_use]
    pub fn name(&self) -> &'d [W] {
        self.doc.name(self.id)
    }

    #[must_use]
    pub fn as_string(&self) -> &'d [W] {
        self.doc.as_string(self.id)
    }

    #[must_use]
    pub fn as_number(&self) -> f64 {
        self.doc.as_number(self.id)
    }

    #[must_use]
    pub fn as_boolean(&self) -> bool {
        self.doc.as_boolean(self.id)
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.doc.child_count(self.id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty(self.id)
    }

    /// First member with this name, or the null sentinel.
    #[must_use]
    pub fn member(&self, name: &[W]) -> ValueRef<'d, 'buf, W> {
        self.doc.value(self.doc.member(self.id, name))
    }

    /// Child by signed index, or the null sentinel.
    #[must_use]
    pub fn at(&self, index: isize) -> ValueRef<'d, 'buf, W> {
        self.doc.value(self.doc.at(self.id, index))
    }

    #[must_use]
    pub fn first_child(&self) -> Option<ValueRef<'d, 'buf, W>> {
        self.doc.first_child(self.id).map(|id| self.doc.value(id))
    }

    #[must_use]
    pub fn next_sibling(&self) -> Option<ValueRef<'d, 'buf, W>> {
        self.doc.next_sibling(self.id).map(|id| self.doc.value(id))
    }

    /// Iterates the children in order.
    pub fn children(&self) -> Children<'d, 'buf, W> {
        Children {
            doc: self.doc,
            cur: self.doc.first_child(self.id),
        }
    }
}

impl<W: CodeUnit> fmt::Display for ValueRef<'_, '_, W> {
    /// The compact JSON rendering of this value's subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        printer::print_value(
            &mut out,
            self.doc,
            self.id,
            crate::options::PrintOptions::compact(),
        );
        f.write_str(&out)
    }
}

/// Iterator over a container's children. See [`ValueRef::children`].
pub struct Children<'d, 'buf, W: CodeUnit> {
    doc: &'d Document<'buf, W>,
    cur: Option<NodeId>,
}

impl<'d, 'buf, W: CodeUnit> Iterator for Children<'d, 'buf, W> {
    type Item = ValueRef<'d, 'buf, W>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        self.cur = self.doc.next_sibling(id);
        Some(self.doc.value(id))
    }
}
