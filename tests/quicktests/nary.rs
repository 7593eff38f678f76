use arbor::nary::{
    count_from_depth, count_to_depth, count_to_depth_checked, limit_branches,
    satisfies_branching_limit, Tree,
};

use quickcheck_macros::quickcheck;
use rand::{rngs::StdRng, SeedableRng};

fn build(xs: &[i16], seed: u64) -> Tree<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = Tree::new();
    for x in xs {
        tree.insert_with(*x, &mut rng);
    }
    tree
}

#[quickcheck]
fn insert_keeps_every_value(xs: Vec<i16>, seed: u64) -> bool {
    let tree = build(&xs, seed);

    tree.size() == xs.len()
        && tree.root() == xs.first()
        && xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn heights_agree(xs: Vec<i16>, seed: u64) -> bool {
    let tree = build(&xs, seed);

    tree.height() == tree.height_alt() && tree.height() <= xs.len()
}

#[quickcheck]
fn depth_counts_partition_the_tree(xs: Vec<i16>, seed: u64, depth: u8) -> bool {
    let tree = build(&xs, seed);
    let depth = usize::from(depth) + 1;

    let shallow = count_to_depth(&tree, depth);
    let deep = count_from_depth(&tree, depth + 1);
    shallow + deep == tree.size()
}

#[quickcheck]
fn checked_depth_count_differs_only_at_the_root(xs: Vec<i16>, seed: u64, depth: u8) -> bool {
    let tree = build(&xs, seed);
    let depth = usize::from(depth);

    match depth {
        0 => count_to_depth_checked(&tree, 0) == 0,
        // The children get depth zero, which count_to_depth reads as unlimited.
        1 => count_to_depth_checked(&tree, 1) == tree.size(),
        _ => count_to_depth_checked(&tree, depth) == count_to_depth(&tree, depth),
    }
}

#[quickcheck]
fn delete_root_keeps_the_rest(xs: Vec<i16>, seed: u64) -> bool {
    let mut tree = build(&xs, seed);

    tree.delete_root() == xs.first().copied() && tree.size() == xs.len().saturating_sub(1)
}

#[quickcheck]
fn deletes_shrink_by_one(xs: Vec<i16>, seed: u64) -> bool {
    let mut spliced = build(&xs, seed);
    let mut promoted = spliced.clone();

    xs.iter().rev().all(|x| {
        let before = spliced.size();
        spliced.delete_item(x)
            && promoted.delete_item_alt(x)
            && spliced.size() == before - 1
            && promoted.size() == before - 1
    }) && spliced.is_empty()
        && promoted.is_empty()
}

#[quickcheck]
fn limit_branches_keeps_values(xs: Vec<i16>, seed: u64, limit: u8) -> bool {
    let mut tree = build(&xs, seed);
    let limit = usize::from(limit % 4) + 1;
    let original = tree.clone();
    let mut before: Vec<_> = tree.list_all().into_iter().copied().collect();

    if limit_branches(&mut tree, limit).is_err() {
        return false;
    }
    let mut after: Vec<_> = tree.list_all().into_iter().copied().collect();
    before.sort();
    after.sort();

    // Only nodes reached through trimmed parents are trimmed.
    let untouched = original.children().len() > limit || tree == original;
    tree.children().len() <= limit && before == after && untouched
}

#[quickcheck]
fn limit_branches_leaves_conforming_trees_alone(xs: Vec<i16>, seed: u64, limit: u8) -> bool {
    let mut tree = build(&xs, seed);
    let limit = usize::from(limit % 4) + 1;
    if !satisfies_branching_limit(&tree, limit) {
        return true;
    }
    let original = tree.clone();

    limit_branches(&mut tree, limit).is_ok() && tree == original
}
