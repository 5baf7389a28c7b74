//! An in-place JSON parser and printer with a pooled document model.
//!
//! `jsonpool` consumes a contiguous byte buffer in UTF-8, UTF-16 or UTF-32
//! (either byte order), detects the encoding, and materializes a mutable
//! document tree whose string and number leaves point either into the
//! caller's buffer (destructive, zero-copy) or into a bump-allocated pool
//! owned by the document. Documents can be edited through the mutation API
//! and printed back out, compact or pretty, to any code-unit width.
//!
//! ```
//! use jsonpool::{print_to_string, Document, ParseOptions, PrintOptions};
//!
//! let mut data = br#"{"name": "pool", "sizes": [1, 2, 3]}"#.to_vec();
//! let mut doc: Document = Document::new();
//! doc.parse(&mut data, None, ParseOptions::default()).unwrap();
//!
//! assert_eq!(doc.root_value().member(b"name").as_string(), b"pool");
//! assert_eq!(doc.root_value().member(b"sizes").at(-1).as_number(), 3.0);
//!
//! let extra = doc.new_number(4.0);
//! let sizes = doc.root_value().member(b"sizes").id();
//! doc.array_add(sizes, extra);
//! assert_eq!(
//!     print_to_string(&doc, PrintOptions::compact()),
//!     r#"{"name":"pool","sizes":[1,2,3,4]}"#
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod codec;
mod convert;
mod document;
mod encoding;
mod error;
mod node;
mod options;
mod parser;
mod pool;
mod printer;
mod tables;
mod unicode;

pub use codec::CodeUnit;
pub use document::{Children, Document, Utf16Document, Utf32Document, Utf8Document, ValueRef};
pub use encoding::Encoding;
pub use error::{ErrorKind, ParseError};
pub use node::{Kind, NodeId};
pub use options::{Indent, ParseOptions, PrintOptions, StringStorage};
pub use pool::{DYNAMIC_POOL_BYTES, STATIC_POOL_BYTES};
pub use printer::{print, print_to_string, print_value, Sink};
