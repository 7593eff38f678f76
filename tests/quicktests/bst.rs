use arbor::bst::{flatten, insert_all, is_bst, is_bst_strict, Tree};

use quickcheck_macros::quickcheck;

fn build(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

#[quickcheck]
fn ordered_after_every_insert(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    xs.iter().all(|x| {
        tree.insert(*x);
        is_bst(&tree) && is_bst_strict(&tree)
    })
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree = build(&xs);
    let mut sorted = xs;
    sorted.sort();

    tree.in_order().into_iter().eq(sorted.iter())
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = build(&xs);

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| !tree.contains(x))
}

#[quickcheck]
fn list_range_matches_a_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree = build(&xs);
    let mut expected: Vec<_> = xs.iter().filter(|x| low <= **x && **x <= high).collect();
    expected.sort();

    let listed = tree.list_range(&low, &high);
    tree.range_count(&low, &high) == listed.len() && listed == expected
}

#[quickcheck]
fn size_tracks_inserts_and_deletes(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = build(&xs);
    let mut size = xs.len();

    deletes.iter().all(|x| {
        if tree.delete(x) {
            size -= 1;
        }
        tree.size() == size && is_bst_strict(&tree)
    })
}

#[quickcheck]
fn extract_max_then_reinsert(xs: Vec<i8>) -> bool {
    let mut tree = build(&xs);
    let before = tree.in_order().into_iter().copied().collect::<Vec<_>>();

    match tree.extract_max() {
        Ok(max) => {
            let was_largest = xs.iter().all(|x| *x <= max);
            tree.insert(max);
            was_largest && tree.in_order().into_iter().copied().eq(before)
        }
        Err(_) => xs.is_empty(),
    }
}

#[quickcheck]
fn kth_largest_matches_sorted(xs: Vec<i8>, k: usize) -> bool {
    let tree = build(&xs);
    let mut sorted = xs;
    sorted.sort_by(|a, b| b.cmp(a));

    tree.kth_largest(k) == k.checked_sub(1).and_then(|i| sorted.get(i))
}

#[quickcheck]
fn bulk_and_single_inserts_agree_on_values(xs: Vec<i8>) -> bool {
    let mut bulk = Tree::new();
    insert_all(&mut bulk, xs.clone());
    let single = build(&xs);

    is_bst_strict(&bulk) && bulk.iter().eq(single.iter())
}

#[quickcheck]
fn flatten_is_sorted(xs: Vec<i8>) -> bool {
    let tree = build(&xs);
    let list = flatten(&tree);

    list.len() == tree.size() && list.iter().eq(tree.iter())
}
