//! End-to-end runs over sample files on disk.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use std::path::PathBuf;
use tuple_entropy::{assess_with, report, FileConfig, OutputFormat, SymbolSample};

fn write_sample(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tuple-entropy-{}-{}.bin",
        name,
        std::process::id()
    ));
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_file_to_report() {
    let mut rng = ChaCha8Rng::seed_from_u64(600);
    let data: Vec<u8> = (0..600).map(|_| (rng.next_u32() % 4) as u8).collect();
    let path = write_sample("report", &data);

    let sample = SymbolSample::from_file(&path, None, None).unwrap();
    assert_eq!(sample.alphabet_size(), 4);

    let assessment = assess_with(sample.symbols(), sample.alphabet_size(), true).unwrap();
    assert!(assessment.t_tuple.min_entropy <= 2.0);
    assert!(assessment.lrs.min_entropy <= 4.0);
    assert_eq!(assessment.lrs.u, assessment.t_tuple.u);

    let text = report::render(&assessment, OutputFormat::Text).unwrap();
    assert!(text.contains("LRS Estimate"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_config_limits_sample() {
    let config = FileConfig::from_toml("[sample]\nbits_per_symbol = 1\nmax_symbols = 100\n").unwrap();
    let path = write_sample("limit", &[0xFE; 500]);

    let sample = SymbolSample::from_file(
        &path,
        config.sample.bits_per_symbol,
        config.sample.max_symbols,
    )
    .unwrap();

    assert_eq!(sample.len(), 100);
    assert_eq!(sample.alphabet_size(), 2);
    assert!(sample.symbols().iter().all(|&s| s == 0));

    // a constant sample leaves nothing unpredictable
    let assessment = assess_with(sample.symbols(), sample.alphabet_size(), false).unwrap();
    assert!(assessment.min_entropy() < 1e-9);

    std::fs::remove_file(path).ok();
}
