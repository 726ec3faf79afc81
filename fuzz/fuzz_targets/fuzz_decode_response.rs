#![no_main]

//! Fuzz target for creation response decoding.
//!
//! The server is trusted but its bodies are not always JSON (HTML error
//! pages, truncated output). Decoding must classify every body as accepted
//! or rejected without panicking, and a rejection must keep the raw body.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use casekit::client::{decode_json, Outcome};
use casekit::models::{BulkCreated, CaseCreated};

#[derive(Arbitrary, Debug)]
struct ResponseInput {
    status: u16,
    /// Raw body - may or may not be JSON
    body: String,
}

fuzz_target!(|input: ResponseInput| {
    let single: Outcome<CaseCreated> =
        decode_json(input.status, input.body.clone(), Some("case_id"));
    if let Outcome::Rejected(rejection) = &single {
        assert_eq!(rejection.body, input.body);
        assert_eq!(rejection.status, input.status);
        let _ = rejection.to_string();
    }

    let bulk: Outcome<BulkCreated> = decode_json(input.status, input.body.clone(), None);
    if let Outcome::Accepted(created) = bulk {
        for id in &created.case_ids {
            let _ = id.to_string();
        }
    }
});
