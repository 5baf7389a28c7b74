//! Configuration for parsing and printing.

/// How the parser stores string and number text.
///
/// The default trades the input buffer for speed: text that needs no
/// rewriting stays where it is, rewrites happen in place, and a code-unit
/// zero is written after each value so the text ranges double as terminated
/// strings. The two other modes progressively back off from touching the
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringStorage {
    /// Translate escapes in place and write terminators into the buffer.
    /// Fastest; the buffer is consumed by the parse.
    #[default]
    InPlace,
    /// Point values at the buffer without writing terminators; consumers use
    /// the end of each text range. Escaped text is still rewritten in place
    /// unless [`ParseOptions::copy_translated`] is also set.
    Borrow,
    /// Copy every value into the document pool, terminated. The buffer is
    /// never written to.
    Copy,
}

/// Options accepted by [`crate::Document::parse`].
///
/// # Default
///
/// Destructive in-place parse, strict RFC 7159 grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Where parsed text lands; see [`StringStorage`].
    pub strings: StringStorage,

    /// Copy values into the pool whenever they need any rewriting
    /// (escape resolution, byte-swapping or width change), instead of
    /// rewriting the input buffer.
    ///
    /// # Default
    ///
    /// `false`
    pub copy_translated: bool,

    /// Permit a single comma directly before `]` or `}`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_commas: bool,

    /// Treat `// …`, `/* … */` and `# …` comments as whitespace.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,
}

impl ParseOptions {
    /// Guarantees the input buffer is byte-identical after the parse.
    /// Values without escapes stay zero-copy views into the buffer; nothing
    /// is terminated, so consumers must use the text range ends.
    #[must_use]
    pub fn non_destructive() -> Self {
        ParseOptions {
            strings: StringStorage::Borrow,
            copy_translated: true,
            ..ParseOptions::default()
        }
    }

    /// Guarantees an untouched buffer *and* terminated values by copying
    /// everything into the pool. Slightly slower than
    /// [`ParseOptions::non_destructive`].
    #[must_use]
    pub fn non_destructive_terminated() -> Self {
        ParseOptions {
            strings: StringStorage::Copy,
            ..ParseOptions::default()
        }
    }
}

/// Indentation width used when printing objects with spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    One,
    Two,
    #[default]
    Four,
    Eight,
}

impl Indent {
    pub(crate) fn width(self) -> usize {
        match self {
            Indent::One => 1,
            Indent::Two => 2,
            Indent::Four => 4,
            Indent::Eight => 8,
        }
    }
}

/// Options accepted by the printing functions.
///
/// # Default
///
/// Whitespace on, tab indentation.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    /// Emit formatting whitespace. When `false` the output is the most
    /// compact rendering possible.
    ///
    /// # Default
    ///
    /// `true`
    pub whitespace: bool,

    /// Indent with spaces instead of tabs.
    ///
    /// # Default
    ///
    /// `false`
    pub use_spaces: bool,

    /// Spaces per indent level when [`PrintOptions::use_spaces`] is set.
    ///
    /// # Default
    ///
    /// [`Indent::Four`]
    pub indent: Indent,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            whitespace: true,
            use_spaces: false,
            indent: Indent::default(),
        }
    }
}

impl PrintOptions {
    /// No formatting whitespace at all.
    #[must_use]
    pub fn compact() -> Self {
        PrintOptions {
            whitespace: false,
            ..PrintOptions::default()
        }
    }
}
