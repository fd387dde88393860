#![no_main]

use libfuzzer_sys::fuzz_target;
extern crate list_blend;

fuzz_target!(|data: (Vec<(u8, u8)>, u16)| {
    let (sources, result_size) = data;
    let sizes = sources.iter().map(|&(size, _)| usize::from(size)).collect::<Vec<_>>();
    let percentages = sources.iter().map(|&(_, pct)| u32::from(pct)).collect::<Vec<_>>();
    list_blend::tests::invariants::assert_valid_allocation(
        &sizes,
        &percentages,
        usize::from(result_size),
    );
});
