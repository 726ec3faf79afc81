//! Fixed demonstration run: creates sample cases through every creation
//! path the application offers and narrates each outcome.
//!
//! Every step runs even if an earlier one failed; failures are printed and
//! logged, never propagated.

use chrono::{Duration, NaiveDate};
use tracing::error;

use crate::client::{Outcome, SessionClient};
use crate::models::{CaseId, CaseRecord, RequestRecord};

/// What a seed run managed to do.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub cases_attempted: usize,
    /// Local placeholders (`case_N`) for accepted form creates plus every
    /// id the server handed back.
    pub references: Vec<String>,
    pub server_ids: Vec<CaseId>,
    pub listing_available: Option<bool>,
    pub requests_created: usize,
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn form_case(
    issue_type: &str,
    maker: &str,
    comments: &str,
    priority: &str,
    due_date: NaiveDate,
) -> CaseRecord {
    CaseRecord {
        issue_type: text(issue_type),
        case_status: text("New"),
        maker: text(maker),
        checker: text("checker_user"),
        maker_comments: text(comments),
        checker_comments: text(""),
        priority: text(priority),
        due_date: Some(due_date),
        ..Default::default()
    }
}

pub fn sample_cases(today: NaiveDate) -> Vec<CaseRecord> {
    vec![
        form_case(
            "Technical",
            "manager",
            "Initial technical issue reported by customer",
            "High",
            today + Duration::days(7),
        ),
        form_case(
            "Billing",
            "manager",
            "Invoice discrepancy needs investigation",
            "Medium",
            today + Duration::days(5),
        ),
        form_case(
            "Service",
            "maker_user",
            "Service level agreement review required",
            "Low",
            today + Duration::days(14),
        ),
    ]
}

pub fn sample_requests(today: NaiveDate) -> Vec<RequestRecord> {
    vec![
        RequestRecord {
            request_type: text("Information"),
            request_description: text("Need additional details about the technical issue"),
            status: text("Pending"),
            priority: text("High"),
            assigned_to: text("technical_team"),
            due_date: Some(today + Duration::days(2)),
            notes: text("Urgent - customer waiting for resolution"),
            ..Default::default()
        },
        RequestRecord {
            request_type: text("Approval"),
            request_description: text("Approve billing adjustment for customer"),
            status: text("Pending"),
            priority: text("Medium"),
            assigned_to: text("finance_team"),
            due_date: Some(today + Duration::days(3)),
            notes: text("Standard procedure apply"),
            ..Default::default()
        },
    ]
}

pub fn api_case() -> CaseRecord {
    CaseRecord {
        issue_type: text("API Test Case"),
        priority: text("High"),
        maker_comments: text("Created via casekit API call"),
        ..Default::default()
    }
}

pub fn bulk_cases() -> Vec<CaseRecord> {
    (1..=2)
        .zip(["Medium", "Low"])
        .map(|(n, priority)| CaseRecord {
            issue_type: Some(format!("Bulk Test {}", n)),
            case_status: text("New"),
            priority: text(priority),
            maker_comments: Some(format!("Bulk created case {}", n)),
            ..Default::default()
        })
        .collect()
}

fn heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "-".repeat(40));
}

fn banner(title: &str) {
    println!();
    println!("{}", "=".repeat(50));
    println!("{}", title);
    println!("{}", "=".repeat(50));
}

pub fn run(client: &SessionClient, today: NaiveDate) -> SeedReport {
    let mut report = SeedReport::default();

    banner("CASE MANAGEMENT SEED RUN");

    heading("1. CREATING CASES VIA FORM SUBMISSION");
    let cases = sample_cases(today);
    report.cases_attempted = cases.len();
    for (i, case) in cases.iter().enumerate() {
        let n = i + 1;
        println!();
        println!("Creating case {}...", n);
        match client.create_case(case) {
            Ok(Outcome::Accepted(())) => {
                println!("Case created successfully!");
                report.references.push(format!("case_{}", n));
            }
            Ok(Outcome::Rejected(r)) => {
                println!("Case creation failed: {}", r.status);
                println!("{}", r.body);
            }
            Err(e) => {
                error!(error = %e, case = n, "form case creation failed");
                println!("Case creation failed: {}", e);
            }
        }
    }

    heading("2. CREATING CASES VIA API ENDPOINT");
    match client.create_case_via_api(&api_case()) {
        Ok(Outcome::Accepted(created)) => {
            println!("Case created successfully! ID: {}", created.case_id);
            report.references.push(created.case_id.to_string());
            report.server_ids.push(created.case_id);
        }
        Ok(Outcome::Rejected(r)) => {
            println!("API case creation failed: {}", r);
            println!("{}", r.body);
        }
        Err(e) => {
            error!(error = %e, "API case creation failed");
            println!("API endpoint not available: {}", e);
            println!("The /api/cases endpoint needs to be implemented first");
        }
    }

    heading("3. BULK CREATION DEMONSTRATION");
    match client.bulk_create_cases(&bulk_cases()) {
        Ok(Outcome::Accepted(created)) => {
            println!("Created {} cases successfully!", created.case_ids.len());
            for id in created.case_ids {
                report.references.push(id.to_string());
                report.server_ids.push(id);
            }
        }
        Ok(Outcome::Rejected(r)) => {
            println!("Bulk creation failed: {}", r);
            println!("{}", r.body);
        }
        Err(e) => {
            error!(error = %e, "bulk case creation failed");
            println!("Bulk endpoint not available: {}", e);
            println!("The /api/cases/bulk endpoint needs to be implemented first");
        }
    }

    heading("4. CREATING REQUESTS FOR CASES");
    if report.references.is_empty() {
        println!("No cases were created; skipping requests.");
    } else {
        report.listing_available = Some(check_listing(client));

        match report.server_ids.first() {
            Some(case_id) => {
                for request in sample_requests(today) {
                    println!("Creating request for case {}...", case_id);
                    match client.create_request(case_id.as_str(), &request) {
                        Ok(Outcome::Accepted(())) => {
                            println!("Request created successfully!");
                            report.requests_created += 1;
                        }
                        Ok(Outcome::Rejected(r)) => {
                            println!("Request creation failed: {}", r.status);
                            println!("{}", r.body);
                        }
                        Err(e) => {
                            error!(error = %e, case_id = %case_id, "request creation failed");
                            println!("Request creation failed: {}", e);
                        }
                    }
                }
            }
            None => {
                println!();
                println!("Form submissions do not return case IDs.");
                println!("Look up the IDs in the web interface, then run");
                println!("`casekit create-request <case-id>` for each case.");
            }
        }
    }

    print_summary(client, &report);
    report
}

fn check_listing(client: &SessionClient) -> bool {
    println!("Fetching active cases...");
    match client.get_active_cases() {
        Ok(Outcome::Accepted(())) => {
            println!("Retrieved active cases list");
            true
        }
        Ok(Outcome::Rejected(r)) => {
            println!("Failed to get cases: {}", r.status);
            false
        }
        Err(e) => {
            error!(error = %e, "active case listing failed");
            println!("Failed to get cases: {}", e);
            false
        }
    }
}

fn print_summary(client: &SessionClient, report: &SeedReport) {
    banner("SUMMARY");
    println!("Login: successful");
    println!("Cases attempted: {}", report.cases_attempted);
    println!("Requests created: {}", report.requests_created);
    if !report.references.is_empty() {
        println!("Created case references: {:?}", report.references);
    }

    println!();
    println!("Next steps:");
    println!("1. Check the application at {}/cases/active", client.base_url());
    println!("2. Note the actual case IDs from the web interface");
    println!("3. Create requests with `casekit create-request <case-id>`");
}
