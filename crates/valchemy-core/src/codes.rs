//! The reserved violation-code table.
//!
//! Every code the engine can raise on its own appears here. Custom codes
//! installed with [`crate::Schema::code`] must not collide with these.

/// Reserved codes, sorted so membership checks can binary-search.
pub const RESERVED: &[&str] = &[
    "ano",
    "arr",
    "arr.len.eq",
    "arr.len.max",
    "arr.len.min",
    "big",
    "big.max",
    "big.min",
    "big.xmn",
    "big.xmx",
    "bul",
    "enm",
    "fun",
    "fun.len.eq",
    "fun.len.max",
    "fun.len.min",
    "int",
    "int.max",
    "int.min",
    "int.xmn",
    "int.xmx",
    "lit",
    "nno",
    "none",
    "not",
    "num",
    "num.fin",
    "num.max",
    "num.min",
    "num.xmn",
    "num.xmx",
    "obj",
    "obj.cls",
    "obj.key",
    "obj.len.eq",
    "obj.len.max",
    "obj.len.min",
    "obj.typ",
    "ono.mlt",
    "ono.non",
    "opt",
    "rul",
    "str",
    "str.ascii",
    "str.date8601",
    "str.ipv4",
    "str.ipv6",
    "str.len.eq",
    "str.len.max",
    "str.len.min",
    "str.pat",
    "str.slug",
    "str.url",
    "tup",
    "tup.cls",
    "tup.len.eq",
    "tup.len.max",
    "tup.len.min",
];

/// True when `code` is reserved for the engine's own checks.
pub fn is_reserved(code: &str) -> bool {
    RESERVED.binary_search(&code).is_ok()
}
