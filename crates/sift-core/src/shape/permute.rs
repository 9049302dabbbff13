/// Number of combinations a product over lists of these sizes yields, or
/// `None` on overflow.
pub(crate) fn permutation_count(sizes: impl IntoIterator<Item = usize>) -> Option<usize> {
    sizes.into_iter().try_fold(1_usize, usize::checked_mul)
}

/// Every combination picking one element from each list, in odometer order
/// (the last list varies fastest).
pub(crate) fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    let mut combinations = Vec::new();
    let mut indices = vec![0_usize; lists.len()];

    loop {
        combinations.push(
            indices
                .iter()
                .zip(lists)
                .map(|(&index, list)| list[index].clone())
                .collect(),
        );

        // advance the odometer from the last wheel
        let mut wheel = lists.len();
        loop {
            if wheel == 0 {
                return combinations;
            }
            wheel -= 1;

            indices[wheel] += 1;
            if indices[wheel] < lists[wheel].len() {
                break;
            }
            indices[wheel] = 0;
        }
    }
}
