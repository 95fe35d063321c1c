// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use libfuzzer_sys::fuzz_target;

use folio::ProjectReference;

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(reference) = ProjectReference::from_query(query) else {
        return;
    };

    // The encoded folder must stay a single path segment under the base dir
    let path = reference.content_path("smallprojects");
    let segment = path
        .strip_prefix("smallprojects/")
        .expect("content path starts with the base dir");
    assert!(!segment.is_empty());
    assert!(!segment.contains('/'));
    assert!(segment != "." && segment != "..");
});
