// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use symtab::traits::*;
use symtab::{compat_symbols, Error, SymbolTable, TextOptions, NO_SYMBOL};

fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

fn letters() -> SymbolTable {
    let mut syms = SymbolTable::new("letters");
    for s in &["a", "b", "c", "d", "e"] {
        syms.add_symbol(s);
    }
    syms
}

fn mixed() -> SymbolTable {
    let mut syms = SymbolTable::new("mixed");
    assert_eq!(0, syms.add_symbol("<eps>"));
    assert_eq!(1, syms.add_symbol("a"));
    assert_eq!(100, syms.add_symbol_with_key("b", 100));
    syms
}

fn text_of(syms: &SymbolTable) -> String {
    let mut out = Vec::new();
    syms.write_text(&mut out, &TextOptions::default()).expect("write to Vec");
    String::from_utf8(out).expect("text tables are UTF-8")
}

/// Every live entry must be reachable from both directions, with no two
/// entries sharing a key or a symbol.
fn assert_bijective(syms: &SymbolTable) {
    let entries: Vec<_> = syms.iter().collect();
    assert_eq!(syms.num_symbols(), entries.len());
    let mut by_key = HashMap::new();
    let mut by_symbol = HashMap::new();
    for (key, symbol) in &entries {
        assert!(by_key.insert(*key, symbol.clone()).is_none(), "duplicate key {}", key);
        assert!(by_symbol.insert(symbol.clone(), *key).is_none(), "duplicate symbol {}", symbol);
        assert_eq!(*key, syms.find_key(symbol));
        assert_eq!(Some(symbol.clone()), syms.find_symbol(*key));
    }
}

#[test]
fn removal_inside_dense_run() {
    let mut syms = letters();
    syms.remove_symbol(2);
    assert_eq!(4, syms.num_symbols());
    assert_eq!(None, syms.find_symbol(2));
    assert_eq!(Some("a".to_owned()), syms.find_symbol(0));
    assert_eq!(Some("b".to_owned()), syms.find_symbol(1));
    assert_eq!(Some("d".to_owned()), syms.find_symbol(3));
    assert_eq!(Some("e".to_owned()), syms.find_symbol(4));
    assert_eq!(vec![0, 1, 3, 4], syms.iter().map(|(k, _)| k).collect::<Vec<_>>());
    assert_bijective(&syms);
}

#[test]
fn mixed_dense_and_sparse() {
    let syms = mixed();
    assert_eq!(Some("b".to_owned()), syms.find_symbol(100));
    assert_eq!(100, syms.find_key("b"));
    assert_eq!(101, syms.available_key());
    assert_eq!("<eps>\t0\na\t1\nb\t100\n", text_of(&syms));
}

#[test]
fn idempotent_and_conflicting_adds() {
    let mut syms = mixed();
    let before = syms.labeled_checksum();
    assert_eq!(100, syms.add_symbol_with_key("b", 100));
    assert_eq!(100, syms.add_symbol_with_key("b", 7));
    assert_eq!(1, syms.add_symbol("a"));
    assert_eq!(3, syms.num_symbols());
    assert_eq!(None, syms.find_symbol(7));
    assert_eq!(before, syms.labeled_checksum());
    assert_eq!(NO_SYMBOL, syms.add_symbol_with_key("c", NO_SYMBOL));
    assert!(!syms.member_symbol("c"));
}

#[test]
fn binary_round_trip() {
    init_logging();
    let mut syms = mixed();
    syms.add_symbol_with_key("z", 40);
    syms.remove_symbol(1);
    let copy = SymbolTable::from_bytes(&syms.to_bytes().expect("serialize")).expect("deserialize");
    assert_eq!(syms.num_symbols(), copy.num_symbols());
    assert_eq!("mixed", copy.name());
    for (key, symbol) in syms.iter() {
        assert_eq!(key, copy.find_key(&symbol));
        assert_eq!(Some(symbol), copy.find_symbol(key));
    }
    assert!(compat_symbols(Some(&syms), Some(&copy), true));
}

#[test]
fn text_round_trip() {
    init_logging();
    let mut syms = letters();
    syms.add_symbol_with_key("far", 1000);
    syms.remove_symbol(3);
    let text = text_of(&syms);
    let copy = SymbolTable::read_text(text.as_bytes(), "inline", &TextOptions::default())
        .expect("parse our own output");
    assert_eq!("inline", copy.name());
    assert_eq!(syms.entries(), copy.entries());
    assert_eq!(syms.labeled_checksum(), copy.labeled_checksum());
}

#[test]
fn file_round_trips() {
    init_logging();
    let dir = tempfile::tempdir().expect("temporary directory");
    let syms = mixed();

    let bin = dir.path().join("mixed.sym");
    syms.write_to_path(&bin).expect("write binary file");
    let copy = SymbolTable::read_from_path(&bin).expect("read binary file");
    assert_eq!(syms.entries(), copy.entries());

    let txt = dir.path().join("mixed.txt");
    syms.write_text_to_path(&txt, &TextOptions::default()).expect("write text file");
    let copy = SymbolTable::read_text_from_path(&txt, &TextOptions::default())
        .expect("read text file");
    assert_eq!(syms.entries(), copy.entries());
    assert_eq!(txt.to_string_lossy(), copy.name());
}

#[test]
fn missing_file_is_reported() {
    init_logging();
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("absent.txt");
    match SymbolTable::read_text_from_path(&path, &TextOptions::default()) {
        Err(Error::OpenFile{path: p, ..}) => assert_eq!(path, p),
        other => panic!("unexpected {:?}", other),
    }
    assert!(SymbolTable::read_from_path(&path).is_err());
}

#[test]
fn malformed_text_reports_line() {
    init_logging();
    let input = "<eps>\t0\na\t1\nb\tone\n";
    match SymbolTable::read_text(input.as_bytes(), "bad.syms", &TextOptions::default()) {
        Err(err @ Error::BadKey{..}) => {
            let message = err.to_string();
            assert!(message.contains("bad.syms"), "{}", message);
            assert!(message.contains("line = 3"), "{}", message);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn largest_key_is_accepted() {
    init_logging();
    let input = "a\t9223372036854775807\n";
    let mut syms = SymbolTable::read_text(input.as_bytes(), "top.syms", &TextOptions::default())
        .expect("largest key parses");
    assert_eq!(i64::MAX, syms.find_key("a"));
    assert_eq!(i64::MAX, syms.available_key());
    assert_eq!(NO_SYMBOL, syms.add_symbol("b"));
    assert_eq!(1, syms.num_symbols());

    let copy = SymbolTable::from_bytes(&syms.to_bytes().expect("serialize")).expect("deserialize");
    assert_eq!(syms.entries(), copy.entries());
    assert_eq!(i64::MAX, copy.available_key());
}

#[test]
fn checksums_are_deterministic() {
    let (a, b) = (letters(), letters());
    assert_eq!(a.checksum(), b.checksum());
    assert_eq!(a.labeled_checksum(), b.labeled_checksum());
    assert!(compat_symbols(Some(&a), Some(&b), true));
    assert!(compat_symbols(Some(&a), Some(&a), true));

    let mut c = letters();
    c.remove_symbol(2);
    c.add_symbol_with_key("c", 70);
    assert!(a.labeled_checksum() != c.labeled_checksum());
    assert!(!compat_symbols(Some(&a), Some(&c), true));
}

#[test]
fn divergent_keys_are_incompatible() {
    let mut a = SymbolTable::new("a");
    a.add_symbol("x");
    a.add_symbol("y");
    let mut b = SymbolTable::new("b");
    b.add_symbol("x");
    b.add_symbol_with_key("y", 2);
    assert_eq!(a.checksum(), b.checksum());
    assert!(!compat_symbols(Some(&a), Some(&b), false));
}

#[test]
fn read_only_view_shares_foreign_table() {
    let mut original = SymbolTable::new("foreign");
    original.add_symbol("<eps>");
    original.add_symbol("q");
    let view = SymbolTable::read_only(Arc::new(original.clone()));
    assert!(view.is_read_only());
    assert_eq!(original.labeled_checksum(), view.labeled_checksum());
    assert!(compat_symbols(Some(&original), Some(&view), true));
    assert_eq!(text_of(&original), text_of(&view));

    let mut merged = SymbolTable::new("merged");
    merged.add_table(&view);
    assert_eq!(original.entries(), merged.entries());
}

#[test]
fn concurrent_checksum_readers_agree() {
    let mut syms = SymbolTable::new("big");
    for i in 0..2000 {
        syms.add_symbol(&format!("w{}", i));
    }
    let syms = Arc::new(syms);
    let handles: Vec<_> = (0..8).map(|_| {
        let syms = syms.clone();
        thread::spawn(move || (syms.checksum(), syms.labeled_checksum()))
    }).collect();
    let results: Vec<_> = handles.into_iter()
        .map(|h| h.join().expect("reader thread panicked"))
        .collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn random_edits_keep_table_bijective() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut syms = SymbolTable::new("random");
    let mut model: HashMap<String, i64> = HashMap::new();
    for step in 0..2000 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let symbol = format!("s{}", rng.gen_range(0..300));
                let expected = model.get(&symbol).cloned().unwrap_or(syms.available_key());
                assert_eq!(expected, syms.add_symbol(&symbol));
                model.insert(symbol, expected);
            }
            2 => {
                let symbol = format!("k{}", rng.gen_range(0..300));
                let key = rng.gen_range(0..600);
                let taken = syms.member_key(key);
                let expected = match model.get(&symbol) {
                    Some(&existing) => existing,
                    None if taken => {
                        assert_eq!(NO_SYMBOL, syms.add_symbol_with_key(&symbol, key));
                        continue;
                    }
                    None => key,
                };
                assert_eq!(expected, syms.add_symbol_with_key(&symbol, key));
                model.insert(symbol, expected);
            }
            _ => {
                let key = rng.gen_range(0..600);
                syms.remove_symbol(key);
                model.retain(|_, &mut k| k != key);
            }
        }
        if step % 50 == 0 {
            assert_bijective(&syms);
        }
    }
    assert_bijective(&syms);
    assert_eq!(model.len(), syms.num_symbols());
    for (symbol, &key) in &model {
        assert_eq!(key, syms.find_key(symbol));
    }

    let copy = SymbolTable::from_bytes(&syms.to_bytes().expect("serialize")).expect("deserialize");
    assert_eq!(syms.labeled_checksum(), copy.labeled_checksum());
}
