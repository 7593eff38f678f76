use arbor::list::OrderedList;

use quickcheck_macros::quickcheck;

#[quickcheck]
fn matches_vec_after_inserts(ops: Vec<(usize, i8)>) -> bool {
    let mut list = OrderedList::new();
    let mut model = Vec::new();
    for (index, x) in ops {
        let index = index % (model.len() + 1);
        if list.insert(index, x).is_err() {
            return false;
        }
        model.insert(index, x);
    }

    list.len() == model.len() && list.iter().eq(model.iter())
}

#[quickcheck]
fn remove_range_matches_drain(xs: Vec<i8>, low: usize, high: usize) -> bool {
    let mut list: OrderedList<_> = xs.iter().copied().collect();
    let mut model = xs;
    let result = list.remove_range(low, high);

    if low <= high && high <= model.len() {
        model.drain(low..high);
        result.is_ok() && list.iter().eq(model.iter())
    } else {
        result.is_err() && list.iter().eq(model.iter())
    }
}
