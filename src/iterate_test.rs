use crate::iterate::Enumerable;
use crate::rbtree::{NodeRef, RbTree};

fn int_tree(keys: &[i64]) -> RbTree<i64> {
    let mut tree = RbTree::new("test-iterate");
    keys.iter().for_each(|key| tree.insert(*key));
    tree
}

fn sample_tree() -> RbTree<i64> {
    int_tree(&[6, 18, 3, 15, 7, 2, 4, 13, 9, 17, 20])
}

fn collect<'a, I>(iter: I) -> Vec<i64>
where
    I: Iterator<Item = NodeRef<'a, i64>>,
{
    let mut keys = vec![];
    iter.foreach(|key| {
        keys.push(*key);
        true
    });
    keys
}

#[test]
fn test_foreach() {
    let tree = sample_tree();
    let testcases: Vec<(&str, Vec<i64>, Vec<i64>)> = vec![
        (
            "ascend normal",
            collect(tree.ascend()),
            vec![2, 3, 4, 6, 7, 9, 13, 15, 17, 18, 20],
        ),
        // open ascend
        (
            "open ascend range from < min",
            collect(tree.open_ascend_range(&1, &4)),
            vec![2, 3, 4],
        ),
        (
            "open ascend range min > max",
            collect(tree.open_ascend_range(&4, &1)),
            vec![],
        ),
        (
            "open ascend range min = max and not in tree",
            collect(tree.open_ascend_range(&16, &16)),
            vec![],
        ),
        (
            "open ascend range from > min",
            collect(tree.open_ascend_range(&5, &6)),
            vec![6],
        ),
        (
            "open ascend range from > min deep",
            collect(tree.open_ascend_range(&8, &13)),
            vec![9, 13],
        ),
        (
            "open ascend range to < max",
            collect(tree.open_ascend_range(&9, &16)),
            vec![9, 13, 15],
        ),
        (
            "open ascend range both open inside",
            collect(tree.open_ascend_range(&5, &10)),
            vec![6, 7, 9],
        ),
        (
            "open ascend range both open outside",
            collect(tree.open_ascend_range(&0, &1)),
            vec![],
        ),
        // exact ascend
        (
            "ascend range from < min",
            collect(tree.ascend_range(&1, &4)),
            vec![],
        ),
        (
            "ascend range 6 to 15",
            collect(tree.ascend_range(&6, &15)),
            vec![6, 7, 9, 13, 15],
        ),
        ("ascend range 6 to 6", collect(tree.ascend_range(&6, &6)), vec![6]),
        ("ascend range 2 to 2", collect(tree.ascend_range(&2, &2)), vec![2]),
        ("ascend range 20 to 20", collect(tree.ascend_range(&20, &20)), vec![20]),
        ("ascend range 15 to 6", collect(tree.ascend_range(&15, &6)), vec![]),
        ("ascend range 8 to 15", collect(tree.ascend_range(&8, &15)), vec![]),
        (
            "ascend range to absent",
            collect(tree.ascend_range(&6, &14)),
            vec![6, 7, 9, 13],
        ),
        // descend
        (
            "descend normal",
            collect(tree.descend()),
            vec![20, 18, 17, 15, 13, 9, 7, 6, 4, 3, 2],
        ),
        (
            "open descend range from > max",
            collect(tree.open_descend_range(&30, &17)),
            vec![20, 18, 17],
        ),
        (
            "open descend range max < min",
            collect(tree.open_descend_range(&17, &30)),
            vec![],
        ),
        (
            "open descend range min = max and not in tree",
            collect(tree.open_descend_range(&16, &16)),
            vec![],
        ),
        (
            "open descend range from < max",
            collect(tree.open_descend_range(&19, &17)),
            vec![18, 17],
        ),
        (
            "open descend range from < max deep",
            collect(tree.open_descend_range(&14, &9)),
            vec![13, 9],
        ),
        (
            "open descend range to > min",
            collect(tree.open_descend_range(&9, &5)),
            vec![9, 7, 6],
        ),
        (
            "open descend range both open inside",
            collect(tree.open_descend_range(&10, &5)),
            vec![9, 7, 6],
        ),
        (
            "open descend range both open outside",
            collect(tree.open_descend_range(&40, &21)),
            vec![],
        ),
        (
            "descend range from > max",
            collect(tree.descend_range(&30, &17)),
            vec![],
        ),
        (
            "descend range 15 to 6",
            collect(tree.descend_range(&15, &6)),
            vec![15, 13, 9, 7, 6],
        ),
        ("descend range 6 to 6", collect(tree.descend_range(&6, &6)), vec![6]),
        ("descend range 20 to 20", collect(tree.descend_range(&20, &20)), vec![20]),
        ("descend range 2 to 2", collect(tree.descend_range(&2, &2)), vec![2]),
        ("descend range 6 to 15", collect(tree.descend_range(&6, &15)), vec![]),
        ("descend range 14 to 6", collect(tree.descend_range(&14, &6)), vec![]),
        // walks
        (
            "inorder normal",
            collect(tree.walk_inorder()),
            vec![2, 3, 4, 6, 7, 9, 13, 15, 17, 18, 20],
        ),
        (
            "preorder normal",
            collect(tree.walk_preorder()),
            vec![6, 3, 2, 4, 15, 9, 7, 13, 18, 17, 20],
        ),
        (
            "postorder normal",
            collect(tree.walk_postorder()),
            vec![2, 4, 3, 7, 13, 9, 17, 20, 18, 15, 6],
        ),
    ];

    for (name, keys, expected) in testcases.into_iter() {
        assert_eq!(keys, expected, "{}", name);
    }
}

#[test]
fn test_foreach_empty() {
    let tree = int_tree(&[]);
    assert!(collect(tree.ascend()).is_empty());
    assert!(collect(tree.descend()).is_empty());
    assert!(collect(tree.walk_inorder()).is_empty());
    assert!(collect(tree.walk_preorder()).is_empty());
    assert!(collect(tree.walk_postorder()).is_empty());
    assert!(collect(tree.ascend_range(&1, &10)).is_empty());
    assert!(collect(tree.open_ascend_range(&1, &10)).is_empty());
    assert!(collect(tree.descend_range(&10, &1)).is_empty());
    assert!(collect(tree.open_descend_range(&10, &1)).is_empty());
}

#[test]
fn test_foreach_special_cases() {
    let inputs: Vec<Vec<i64>> = vec![vec![2, 2, 2], vec![2, 2], vec![1, 2], vec![2]];
    let expected_desc = vec![vec![2, 2, 2], vec![2, 2], vec![2, 1], vec![2]];
    let expected_post = vec![vec![2, 2, 2], vec![2, 2], vec![2, 1], vec![2]];

    for (i, input) in inputs.iter().enumerate() {
        let tree = int_tree(input);
        assert_eq!(&collect(tree.ascend()), input, "ascend {:?}", input);
        assert_eq!(&collect(tree.walk_inorder()), input, "inorder {:?}", input);
        assert_eq!(&collect(tree.walk_preorder()), input, "preorder {:?}", input);
        assert_eq!(collect(tree.descend()), expected_desc[i], "descend {:?}", input);
        assert_eq!(
            collect(tree.walk_postorder()),
            expected_post[i],
            "postorder {:?}",
            input
        );
    }
}

fn upto_six<'a, I>(iter: I) -> Vec<i64>
where
    I: Iterator<Item = NodeRef<'a, i64>>,
{
    let mut keys = vec![];
    iter.foreach(|key| {
        if *key > 6 {
            false
        } else {
            keys.push(*key);
            true
        }
    });
    keys
}

#[test]
fn test_interruption() {
    let tree = sample_tree();

    assert_eq!(upto_six(tree.ascend()), vec![2, 3, 4, 6]);
    assert_eq!(upto_six(tree.descend()), Vec::<i64>::new());
    assert_eq!(upto_six(tree.walk_inorder()), vec![2, 3, 4, 6]);
    assert_eq!(upto_six(tree.walk_preorder()), vec![6, 3, 2, 4]);
    assert_eq!(upto_six(tree.walk_postorder()), vec![2, 4, 3]);

    // pull style, iterator is not restartable.
    let mut iter = tree.ascend();
    assert_eq!(iter.next().map(|n| *n.key()), Some(2));
    assert_eq!(iter.by_ref().count(), 10);
    assert!(iter.next().is_none());
}

#[test]
fn test_node_sizes() {
    let tree = sample_tree();
    for node in tree.walk_postorder() {
        let left = tree.left(node.id());
        let right = tree.right(node.id());
        assert_eq!(node.size(), tree.size(left) + tree.size(right) + 1);
    }
}

#[test]
fn test_inorder_strings() {
    let words = vec![
        "microsoft", "amd", "yyy", "intel", "abc", "fake", "russia", "cisco", "usa", "it",
        "do", "xxx", "zen", "let",
    ];
    let mut tree: RbTree<String> = RbTree::new("test-iterate");
    words.iter().for_each(|w| tree.insert(w.to_string()));

    let keys: Vec<&str> = tree.walk_inorder().map(|n| n.key().as_str()).collect();
    let mut sorted = words.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    // borrowed lookups.
    assert_eq!(tree.search("intel").map(|n| n.key().as_str()), Some("intel"));
    let keys: Vec<&str> = tree
        .open_ascend_range("j", "s")
        .map(|n| n.key().as_str())
        .collect();
    assert_eq!(keys, vec!["let", "microsoft", "russia"]);
}
