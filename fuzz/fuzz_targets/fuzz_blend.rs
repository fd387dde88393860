#![no_main]

use libfuzzer_sys::fuzz_target;
extern crate list_blend;

fuzz_target!(|data: (Vec<(Vec<i8>, u8)>, u8)| {
    let (sources, result_size) = data;
    let percentages = sources.iter().map(|(_, pct)| u32::from(*pct)).collect::<Vec<_>>();
    let sources = sources.into_iter().map(|(items, _)| items).collect::<Vec<_>>();
    list_blend::tests::invariants::assert_valid_blend(
        &sources,
        &percentages,
        usize::from(result_size),
    );
});
