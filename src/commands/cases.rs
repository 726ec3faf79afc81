use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::client::{Outcome, SessionClient};
use crate::models::{CaseId, CaseRecord, RequestRecord};

pub fn create(client: &SessionClient, case: &CaseRecord) -> Result<()> {
    println!("Creating case...");
    match client.create_case(case)? {
        Outcome::Accepted(()) => {
            println!("Case created successfully!");
            Ok(())
        }
        Outcome::Rejected(r) => bail!("Case creation failed: {}\n{}", r.status, r.body),
    }
}

pub fn create_via_api(client: &SessionClient, case: &CaseRecord) -> Result<CaseId> {
    println!("Creating case via API...");
    match client.create_case_via_api(case)? {
        Outcome::Accepted(created) => {
            println!("Case created successfully! ID: {}", created.case_id);
            Ok(created.case_id)
        }
        Outcome::Rejected(r) => bail!("API case creation failed: {}\n{}", r, r.body),
    }
}

pub fn create_request(client: &SessionClient, case_id: &str, request: &RequestRecord) -> Result<()> {
    println!("Creating request for case {}...", case_id);
    match client.create_request(case_id, request)? {
        Outcome::Accepted(()) => {
            println!("Request created successfully!");
            Ok(())
        }
        Outcome::Rejected(r) => bail!("Request creation failed: {}\n{}", r.status, r.body),
    }
}

/// Read a JSON array of case records from `path`.
pub fn load_cases(path: &Path) -> Result<Vec<CaseRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of cases", path.display()))
}

pub fn bulk_create(client: &SessionClient, cases: &[CaseRecord]) -> Result<Vec<CaseId>> {
    println!("Creating {} cases in one request...", cases.len());
    match client.bulk_create_cases(cases)? {
        Outcome::Accepted(created) => {
            println!("Created {} cases successfully!", created.case_ids.len());
            for id in &created.case_ids {
                println!("  {}", id);
            }
            Ok(created.case_ids)
        }
        Outcome::Rejected(r) => bail!("Bulk creation failed: {}\n{}", r, r.body),
    }
}

pub fn active(client: &SessionClient) -> Result<()> {
    println!("Fetching active cases...");
    match client.get_active_cases()? {
        Outcome::Accepted(()) => {
            println!("Retrieved active cases list");
            Ok(())
        }
        Outcome::Rejected(r) => bail!("Failed to get cases: {}", r.status),
    }
}
