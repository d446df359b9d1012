//! Run-length volume regression test
//!
//! ランレングス表現の往復変換と、密配列による再構成・穴埋め・境界除去との
//! 一致をテスト。

use voxmorph_core::{Array, Connectivity};
use voxmorph_region::{
    RunLengthVolume, fill_holes, fill_holes_rle, kill_borders, kill_borders_rle,
    reconstruct_by_dilation, reconstruct_by_dilation_rle,
};
use voxmorph_test::RegParams;
use voxmorph_test::fixtures::{random_binary, random_subset};

#[test]
fn runlength_reg() {
    let mut rp = RegParams::new("runlength");

    // --- Test 1: round trip ---
    eprintln!("=== Round trip ===");
    for (seed, dims) in [vec![31usize, 17], vec![13, 9, 7], vec![1, 5, 5]].iter().enumerate() {
        let img = random_binary(dims, 0.4, 2000 + seed as u64).expect("image");
        let rle = RunLengthVolume::from_array(&img).expect("encode");
        rp.compare_arrays(&img, &rle.to_array());
        rp.compare_values(img.count(|v| v) as f64, rle.voxel_count() as f64, 0.0);
        rp.compare_arrays(&img.map(|v| !v), &rle.complement().to_array());
        eprintln!(
            "  dims {:?}: {} voxels in {} runs",
            dims,
            rle.voxel_count(),
            rle.run_count()
        );
    }

    // --- Test 2: dense and run-length reconstruction agree ---
    eprintln!("=== Dense vs run-length reconstruction ===");
    let cases = [
        (vec![16usize, 12], Connectivity::four()),
        (vec![10, 9, 8], Connectivity::six()),
        (vec![7, 7, 7], Connectivity::six()),
    ];
    for (k, (dims, conn)) in cases.iter().enumerate() {
        for density in [0.35, 0.55, 0.75] {
            let seed = 2100 + 10 * k as u64 + (density * 100.0) as u64;
            let mask = random_binary(dims, density, seed).expect("mask");
            let marker = random_subset(&mask, 0.03, seed + 1);

            let dense = reconstruct_by_dilation(&marker, &mask, conn).expect("dense");
            let rle = reconstruct_by_dilation_rle(
                &RunLengthVolume::from_array(&marker).expect("marker"),
                &RunLengthVolume::from_array(&mask).expect("mask"),
                conn,
            )
            .expect("run-length");
            rp.compare_arrays(&dense, &rle.to_array());
        }
    }

    // --- Test 3: hole filling and border clearing ---
    eprintln!("=== Fill holes / kill borders ===");
    for seed in 0..4u64 {
        let img = random_binary(&[11, 10, 9], 0.6, 2200 + seed).expect("volume");
        let rle = RunLengthVolume::from_array(&img).expect("encode");

        let dense = fill_holes(&img, &Connectivity::six()).expect("fill holes");
        let filled = fill_holes_rle(&rle).expect("fill holes rle");
        rp.compare_arrays(&dense, &filled.to_array());

        let dense = kill_borders(&img, &Connectivity::six()).expect("kill borders");
        let cleared = kill_borders_rle(&rle).expect("kill borders rle");
        rp.compare_arrays(&dense, &cleared.to_array());
    }

    // --- Test 4: enclosed cavity ---
    eprintln!("=== Enclosed cavity ===");
    let shell = Array::<bool>::from_fn(&[7, 7, 7], |p| {
        !p.iter().all(|&c| (2..=4).contains(&c))
    })
    .expect("shell");
    rp.compare_values(343.0 - 27.0, shell.count(|v| v) as f64, 0.0);
    let filled = fill_holes_rle(&RunLengthVolume::from_array(&shell).expect("encode"))
        .expect("fill cavity");
    rp.compare_values(343.0, filled.voxel_count() as f64, 0.0);
    let filled = fill_holes(&shell, &Connectivity::six()).expect("dense fill");
    rp.compare_values(343.0, filled.count(|v| v) as f64, 0.0);

    assert!(rp.cleanup(), "runlength regression test failed");
}
