//! List accumulation: append, first occurrence wins

/// Drop repeated items, keeping the first of each.
pub fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    dedup_extend(&mut out, items);
    out
}

/// Append the items of `incoming` that `list` doesn't hold yet.
pub fn dedup_extend(list: &mut Vec<String>, incoming: impl IntoIterator<Item = String>) {
    for item in incoming {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}
