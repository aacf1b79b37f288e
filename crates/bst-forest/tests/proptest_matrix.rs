use std::collections::BTreeSet;

use bst_forest::{BstError, Order, Registry, TreeOptions};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16),
    Remove(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..512).prop_map(Op::Insert),
        2 => (0u16..512).prop_map(Op::Remove),
    ]
}

fn by_key(a: &[u8], b: &[u8]) -> i32 {
    u16::from_be_bytes([a[0], a[1]]).cmp(&u16::from_be_bytes([b[0], b[1]])) as i32
}

fn apply(reg: &mut Registry, name: &str, op: &Op) -> Result<(), BstError> {
    let (k, insert) = match *op {
        Op::Insert(k) => (k, true),
        Op::Remove(k) => (k, false),
    };
    let mut node = reg.allocate(name)?;
    node.write(&k.to_be_bytes());
    let out = if insert {
        reg.insert(name, &node)
    } else {
        reg.remove(name, &node)
    };
    reg.release(name, node)?;
    out
}

fn in_order(reg: &mut Registry, name: &str) -> Vec<u16> {
    let mut out = Vec::new();
    let mut collect = |rec: &[u8], _: usize| out.push(u16::from_be_bytes([rec[0], rec[1]]));
    reg.walk(name, Order::In, Some(&mut collect)).unwrap();
    out
}

proptest! {
    #[test]
    fn avl_tracks_ordered_set(ops in prop::collection::vec(op(), 1..300)) {
        let mut reg = Registry::new();
        reg.create("t", TreeOptions::avl(2).comparator(by_key)).unwrap();
        let mut model = BTreeSet::new();

        for op in &ops {
            let out = apply(&mut reg, "t", op);
            let expected = match *op {
                Op::Insert(k) => if model.insert(k) { Ok(()) } else { Err(BstError::DuplicateKey) },
                Op::Remove(k) => if model.remove(&k) { Ok(()) } else { Err(BstError::KeyNotFound) },
            };
            prop_assert_eq!(out, expected);
        }

        let report = reg.audit("t").unwrap();
        prop_assert_eq!(report.nodes, model.len());
        prop_assert_eq!(in_order(&mut reg, "t"), model.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn copies_compare_equal(keys in prop::collection::btree_set(0u16..1024, 0..128)) {
        let mut reg = Registry::new();
        reg.create("a", TreeOptions::avl(2).comparator(by_key)).unwrap();
        for &k in &keys {
            apply(&mut reg, "a", &Op::Insert(k)).unwrap();
        }
        reg.copy("a", "b").unwrap();
        prop_assert_eq!(reg.structural_equal("a", "b"), Ok(true));
        prop_assert_eq!(reg.content_equal("b", "a"), Ok(true));
        prop_assert_eq!(reg.count("b"), Ok(keys.len()));

        // the same set built in reverse has the same content, shape aside
        reg.create("c", TreeOptions::bst(2).comparator(by_key)).unwrap();
        for &k in keys.iter().rev() {
            apply(&mut reg, "c", &Op::Insert(k)).unwrap();
        }
        prop_assert_eq!(reg.content_equal("a", "c"), Ok(true));
        prop_assert_eq!(reg.content_equal("c", "a"), Ok(true));
    }
}
