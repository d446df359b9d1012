//! Seed fill regression test
//!
//! フラッドフィル、穴埋め、境界成分除去、シード付き成分除去をテスト。

use voxmorph_core::{Array, Connectivity};
use voxmorph_region::{
    component_sizes, fill_holes, flood_fill, kill_borders, label_components,
    remove_seeded_components,
};
use voxmorph_test::RegParams;
use voxmorph_test::fixtures::{random_binary, random_subset, random_u8};

#[test]
fn seedfill_reg() {
    let mut rp = RegParams::new("seedfill");

    // --- Test 1: flood fill size matches the component size ---
    eprintln!("=== Flood fill ===");
    for seed in 0..4u64 {
        let img = random_binary(&[24, 18], 0.55, 3000 + seed).expect("image");
        let conn = Connectivity::eight();
        let labels = label_components::<u32>(&img, &conn).expect("label");
        let sizes = component_sizes(&labels);

        let Some(start) = img.data().iter().position(|&v| v) else {
            continue;
        };
        let seed_pos = img.shape().position_of(start);
        let label = labels.at(start) as usize;

        let mut filled = img.map(|v| if v { 1u8 } else { 0 });
        let count = flood_fill(&mut filled, &seed_pos, 2, &conn).expect("flood fill");
        rp.compare_values(sizes[label - 1] as f64, count as f64, 0.0);
        rp.compare_values(count as f64, filled.count(|v| v == 2) as f64, 0.0);
        eprintln!("  seed {}: filled {} of {}", seed, count, img.count(|v| v));

        // Filling again with the same value is a no-op
        let again = flood_fill(&mut filled, &seed_pos, 2, &conn).expect("refill");
        rp.compare_values(0.0, again as f64, 0.0);
    }

    // --- Test 2: hole filling ---
    eprintln!("=== Fill holes ===");
    let ring = Array::from_rows(&[
        "..........",
        ".######...",
        ".#....#...",
        ".#.##.#...",
        ".#....#...",
        ".######...",
        "..........",
    ])
    .expect("ring");
    let filled = fill_holes(&ring, &Connectivity::four()).expect("fill holes");
    rp.compare_values(30.0, filled.count(|v| v) as f64, 0.0);

    // The same hole leaks through a diagonal gap under 8-connectivity
    let leaky = Array::from_rows(&[".....", ".##..", ".#.#.", "..##.", "....."]).expect("leaky");
    let four = fill_holes(&leaky, &Connectivity::four()).expect("four");
    let eight = fill_holes(&leaky, &Connectivity::eight()).expect("eight");
    rp.compare_true(four.get(&[2, 2]).expect("center"));
    rp.compare_true(!eight.get(&[2, 2]).expect("center"));

    // Grayscale: the filled image dominates the original and is idempotent
    for seed in 0..3u64 {
        let img = random_u8(&[15, 12, 4], 200, 3100 + seed).expect("gray");
        let filled = fill_holes(&img, &Connectivity::six()).expect("fill gray");
        let dominates = img.data().iter().zip(filled.data()).all(|(a, b)| a <= b);
        rp.compare_true(dominates);
        let again = fill_holes(&filled, &Connectivity::six()).expect("refill gray");
        rp.compare_arrays(&filled, &again);
    }

    // --- Test 3: border clearing ---
    eprintln!("=== Kill borders ===");
    for seed in 0..3u64 {
        let img = random_binary(&[20, 20], 0.5, 3200 + seed).expect("image");
        let cleared = kill_borders(&img, &Connectivity::four()).expect("kill borders");
        let touches_border = cleared
            .positions()
            .enumerate()
            .any(|(i, pos)| cleared.at(i) && cleared.is_border(&pos));
        rp.compare_true(!touches_border);
        let subset = img.data().iter().zip(cleared.data()).all(|(&a, &b)| a || !b);
        rp.compare_true(subset);
    }

    // --- Test 4: seeded component removal ---
    eprintln!("=== Remove seeded components ===");
    let mask = random_binary(&[18, 14, 6], 0.3, 3300).expect("mask");
    let seed = random_subset(&mask, 0.05, 3301);
    let conn = Connectivity::twenty_six();
    let kept = remove_seeded_components(&seed, &mask, &conn).expect("remove");
    let labels = label_components::<u32>(&mask, &conn).expect("label mask");
    let kept_labels = label_components::<u32>(&kept, &conn).expect("label kept");
    let seeded: std::collections::HashSet<u32> = seed
        .data()
        .iter()
        .zip(labels.data())
        .filter(|(s, _)| **s)
        .map(|(_, &l)| l)
        .collect();
    let total = *labels.data().iter().max().unwrap_or(&0) as usize;
    let remaining = *kept_labels.data().iter().max().unwrap_or(&0) as usize;
    rp.compare_values((total - seeded.len()) as f64, remaining as f64, 0.0);
    eprintln!(
        "  {} components, {} seeded, {} kept",
        total,
        seeded.len(),
        remaining
    );

    assert!(rp.cleanup(), "seedfill regression test failed");
}
