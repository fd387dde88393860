#![allow(dead_code)]

use list_blend::{Blend, allocate};

/// Wrapper for an item and the index of the source it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledItem<T> {
    pub item: T,
    pub source: usize,
}

/// Labels every item with its source
pub fn labeled<T: Copy>(input: &[Vec<T>]) -> Vec<Vec<LabeledItem<T>>> {
    input
        .iter()
        .enumerate()
        .map(|(source, items)| {
            items
                .iter()
                .map(|&item| LabeledItem { item, source })
                .collect()
        })
        .collect()
}

/// Source labels in the order a round-robin over `quotas` must produce them: pass `k`
/// visits, in order, every source with a quota above `k`.
pub fn expected_labels(quotas: &[usize]) -> Vec<usize> {
    let passes = quotas.iter().copied().max().unwrap_or(0);
    (0..passes)
        .flat_map(|pass| {
            quotas
                .iter()
                .enumerate()
                .filter(move |&(_, &quota)| quota > pass)
                .map(|(source, _)| source)
        })
        .collect()
}

struct BlendChecker<'a, T> {
    rest: Vec<&'a [T]>,
}

impl<'a, T> BlendChecker<'a, T>
where
    T: core::fmt::Debug + PartialEq,
{
    fn new(input: &'a [Vec<T>]) -> Self {
        Self {
            rest: input.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Every yielded item must be the front item of its source
    fn check_choice(&mut self, choice: &LabeledItem<T>) {
        let Some((item, rest)) = self.rest[choice.source].split_first() else {
            panic!("item was taken from empty source {}", choice.source);
        };
        assert_eq!(item, &choice.item, "source {} yielded out of order", choice.source);
        self.rest[choice.source] = rest;
    }
}

/// Blends `input` and checks quota bounds, conservation, per-source order and the
/// round-robin shape of the result. Returns the quotas.
pub fn check_blend<T>(input: &[Vec<T>], percentages: &[u32], result_size: usize) -> Vec<usize>
where
    T: core::fmt::Debug + PartialEq + Copy,
{
    let sizes = input.iter().map(Vec::len).collect::<Vec<_>>();
    let quotas = allocate(&sizes, percentages, result_size);

    assert_eq!(quotas.len(), sizes.len());
    for (source, (&quota, &size)) in quotas.iter().zip(&sizes).enumerate() {
        assert!(quota <= size, "source {source}: quota {quota} over size {size}");
    }
    let supply = sizes.iter().sum::<usize>();
    assert_eq!(quotas.iter().sum::<usize>(), supply.min(result_size));
    if supply <= result_size {
        assert_eq!(quotas, sizes);
    }

    let blended = Blend::new(labeled(input))
        .percentages(percentages.iter().copied())
        .result_size(result_size)
        .build()
        .unwrap()
        .into_vec();

    let mut checker = BlendChecker::new(input);
    blended
        .iter()
        .for_each(|choice| checker.check_choice(choice));
    let taken = input
        .iter()
        .zip(&checker.rest)
        .map(|(items, rest)| items.len() - rest.len())
        .collect::<Vec<_>>();
    assert_eq!(taken, quotas);
    assert_eq!(
        blended.iter().map(|choice| choice.source).collect::<Vec<_>>(),
        expected_labels(&quotas)
    );

    // Same input, same output
    let again = Blend::new(labeled(input))
        .percentages(percentages.iter().copied())
        .result_size(result_size)
        .build()
        .unwrap()
        .into_vec();
    assert_eq!(blended, again);

    quotas
}
