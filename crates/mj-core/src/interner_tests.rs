use crate::{Interner, NameId};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("foo");
    let b = interner.intern("foo");
    let c = interner.intern("bar");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn intern_folds_ascii_case() {
    let mut interner = Interner::new();

    let a = interner.intern("Count");
    let b = interner.intern("count");
    let c = interner.intern("COUNT");

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(interner.len(), 1);
    assert_eq!(interner.resolve(a), "count");
}

#[test]
fn intern_exact_keeps_case() {
    let mut interner = Interner::new();

    let folded = interner.intern("Hello");
    let exact = interner.intern_exact("Hello");

    assert_ne!(folded, exact);
    assert_eq!(interner.resolve(folded), "hello");
    assert_eq!(interner.resolve(exact), "Hello");
}

#[test]
fn exact_and_folded_agree_on_lowercase_text() {
    let mut interner = Interner::new();

    let a = interner.intern("x");
    let b = interner.intern_exact("x");

    assert_eq!(a, b);
    assert_eq!(interner.len(), 1);
}

#[test]
fn find_folds_but_does_not_intern() {
    let mut interner = Interner::new();

    assert_eq!(interner.find("Main"), None);
    assert_eq!(interner.len(), 0);

    let id = interner.intern("main");
    assert_eq!(interner.find("MAIN"), Some(id));
    assert_eq!(interner.len(), 1);
}

#[test]
fn resolve_roundtrip() {
    let mut interner = Interner::new();

    let id = interner.intern("hello");
    assert_eq!(interner.resolve(id), "hello");
    assert_eq!(interner.try_resolve(id), Some("hello"));
}

#[test]
fn try_resolve_rejects_foreign_ids() {
    let interner = Interner::new();
    assert_eq!(interner.try_resolve(NameId::from_raw(7)), None);
}

#[test]
fn iter_yields_in_intern_order() {
    let mut interner = Interner::new();
    let a = interner.intern("alpha");
    let b = interner.intern_exact("Beta");

    let items: Vec<_> = interner.iter().collect();
    assert_eq!(items, vec![(a, "alpha"), (b, "Beta")]);
}

#[test]
fn from_raw_roundtrip() {
    let id = NameId::from_raw(42);
    assert_eq!(id.as_u32(), 42);
}
