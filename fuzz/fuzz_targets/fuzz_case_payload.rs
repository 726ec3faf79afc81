#![no_main]

//! Fuzz target for case and request payload encoding.
//!
//! Field values come straight from operators and can contain any Unicode.
//! JSON encoding must never fail and must round-trip.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use casekit::models::{CaseRecord, RequestRecord};

#[derive(Arbitrary, Debug)]
struct PayloadInput {
    issue_type: Option<String>,
    maker_comments: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    notes: Option<String>,
}

fuzz_target!(|input: PayloadInput| {
    let case = CaseRecord {
        issue_type: input.issue_type,
        maker_comments: input.maker_comments,
        priority: input.priority,
        ..Default::default()
    };
    let json = serde_json::to_string(&case).expect("case encodes");
    let back: CaseRecord = serde_json::from_str(&json).expect("case decodes");
    assert_eq!(back, case);

    let request = RequestRecord {
        request_description: input.description,
        notes: input.notes,
        ..Default::default()
    };
    let json = serde_json::to_string(&request).expect("request encodes");
    let back: RequestRecord = serde_json::from_str(&json).expect("request decodes");
    assert_eq!(back, request);
});
