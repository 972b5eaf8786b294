#![no_main]

use libfuzzer_sys::fuzz_target;

use darkscan::dedup::UniqueSentenceSet;
use darkscan::extractor::{ExtractOptions, extract_blocks};
use darkscan::segmenter::{MIN_SENTENCE_CHARS, PunctuationSegmenter, Segmenter};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // Extraction and segmentation must never panic regardless of input
    let blocks = extract_blocks(&html, &ExtractOptions::default());
    let pool = PunctuationSegmenter.segment(&blocks);
    assert!(pool.iter().all(|s| s.as_str().chars().count() >= MIN_SENTENCE_CHARS));

    let unique = UniqueSentenceSet::from_pool(pool);
    assert!(unique.len() <= blocks.iter().map(|b| b.as_str().len()).sum::<usize>());
});
