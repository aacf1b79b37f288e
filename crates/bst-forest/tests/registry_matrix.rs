use bst_forest::{
    message_for_code, BstError, Registry, RegistryConfig, TreeKind, TreeOptions,
    MAX_TREE_NAME_LEN, NO_ERROR,
};

fn by_bytes(a: &[u8], b: &[u8]) -> i32 {
    a.cmp(b) as i32
}

fn put(reg: &mut Registry, name: &str, k: u32) -> Result<(), BstError> {
    let mut node = reg.allocate(name)?;
    node.write(&k.to_be_bytes());
    let out = reg.insert(name, &node);
    reg.release(name, node)?;
    out
}

#[test]
fn lifecycle_matrix() {
    let mut reg = Registry::new();
    assert!(!reg.is_defined("x"));
    reg.create("x", TreeOptions::bst(4).comparator(by_bytes))
        .unwrap();
    assert!(reg.is_defined("x"));
    assert_eq!(reg.last_error_code(), NO_ERROR);
    assert_eq!(reg.is_empty("x"), Ok(true));
    assert_eq!(reg.count("x"), Ok(0));

    assert_eq!(
        reg.create("x", TreeOptions::bst(4).comparator(by_bytes)),
        Err(BstError::AlreadyDefined("x".into()))
    );
    assert_eq!(reg.last_error_code(), 111);

    put(&mut reg, "x", 10).unwrap();
    assert_eq!(reg.is_empty("x"), Ok(false));
    assert_eq!(reg.count("x"), Ok(1));

    reg.destroy("x").unwrap();
    assert!(!reg.is_defined("x"));
    assert_eq!(reg.count("x"), Err(BstError::NotDefined("x".into())));
    assert_eq!(reg.is_empty("x"), Err(BstError::NotDefined("x".into())));
    assert_eq!(reg.free_count("x"), Err(BstError::NotDefined("x".into())));
    assert!(reg.names().is_empty());
}

#[test]
fn name_length_matrix() {
    let mut reg = Registry::new();
    let longest = "a".repeat(MAX_TREE_NAME_LEN);
    reg.create(&longest, TreeOptions::avl(1).comparator(by_bytes))
        .unwrap();
    let too_long = "é".repeat(MAX_TREE_NAME_LEN + 1);
    assert_eq!(
        reg.create(&too_long, TreeOptions::avl(1).comparator(by_bytes)),
        Err(BstError::NameTooLong(MAX_TREE_NAME_LEN + 1))
    );
    assert_eq!(reg.last_error_code(), 126);
    assert_eq!(
        reg.create("", TreeOptions::avl(1).comparator(by_bytes)),
        Err(BstError::NameTooShort)
    );
    assert_eq!(
        reg.copy(&longest, ""),
        Err(BstError::NameTooShort)
    );
}

#[test]
fn kinds_are_kept_apart_matrix() {
    let mut reg = Registry::new();
    reg.create("avl", TreeOptions::avl(4).comparator(by_bytes))
        .unwrap();
    reg.create(
        "bst",
        TreeOptions::bst(4)
            .comparator(by_bytes)
            .verify_after_mutation(true),
    )
    .unwrap();
    for k in 0..16 {
        put(&mut reg, "avl", k).unwrap();
        put(&mut reg, "bst", k).unwrap();
    }
    let avl = reg.find("avl").unwrap();
    let bst = reg.find("bst").unwrap();
    assert_eq!(avl.kind(), TreeKind::Avl);
    assert_eq!(bst.kind(), TreeKind::Bst);
    assert!(!bst.verifies_after_mutation());
    assert_ne!(avl.id(), bst.id());

    assert_eq!(reg.audit("avl").unwrap().height, 5);
    assert_eq!(reg.audit("bst").unwrap().height, 16);
    assert_eq!(reg.names(), vec!["avl".to_string(), "bst".to_string()]);
}

#[test]
fn free_list_matrix() {
    let mut reg = Registry::with_config(RegistryConfig::default().with_free_list_capacity(2));
    reg.create("t", TreeOptions::avl(4).comparator(by_bytes))
        .unwrap();
    assert_eq!(reg.free_count("t"), Ok(0));

    let nodes: Vec<_> = (0..4).map(|_| reg.allocate("t").unwrap()).collect();
    assert!(nodes.iter().all(|n| n.payload() == [0u8; 4]));
    for n in nodes {
        reg.release("t", n).unwrap();
    }
    assert_eq!(reg.free_count("t"), Ok(2));

    let mut dirty = reg.allocate("t").unwrap();
    dirty.write(&[9, 9, 9, 9]);
    reg.release("t", dirty).unwrap();
    let clean = reg.allocate("t").unwrap();
    assert_eq!(clean.payload(), &[0, 0, 0, 0]);
    assert_eq!(clean.len(), 4);
    reg.release("t", clean).unwrap();
}

#[test]
fn stale_nodes_do_not_cross_recreation_matrix() {
    let mut reg = Registry::new();
    reg.create("t", TreeOptions::avl(4).comparator(by_bytes))
        .unwrap();
    let node = reg.allocate("t").unwrap();
    reg.destroy("t").unwrap();
    reg.create("t", TreeOptions::avl(4).comparator(by_bytes))
        .unwrap();
    assert_eq!(reg.insert("t", &node), Err(BstError::TreeNodeMismatch));
    assert_eq!(reg.last_error_code(), 102);
    assert_eq!(reg.count("t"), Ok(0));
    let refused = reg.release("t", node).unwrap_err();
    assert_eq!(refused.error, BstError::TreeNodeMismatch);
    assert_eq!(reg.free_count("t"), Ok(0));
}

#[test]
fn error_message_matrix() {
    let cases = [
        BstError::NotDefined("t".into()),
        BstError::DuplicateKey,
        BstError::KeyNotFound,
        BstError::CopyTargetDefined("t".into()),
        BstError::IncompatibleTreeFamily(1, 2),
    ];
    for err in cases {
        assert_ne!(message_for_code(err.code()), "undefined error number");
    }
    assert_eq!(message_for_code(NO_ERROR), "no error");
    assert_eq!(message_for_code(125), "undefined error number");
    assert_eq!(message_for_code(-3), "undefined error number");
    assert_eq!(
        BstError::NotDefined("inventory".into()).to_string(),
        "tree `inventory` is not defined"
    );
}
