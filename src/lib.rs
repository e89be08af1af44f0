//! MessagePack payload tools: a dynamic value codec and a positional
//! request linearizer for array-style remote calls.

/// Dynamic value codec, record tables, and request linearization.
pub mod pack;
