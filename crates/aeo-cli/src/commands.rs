//! One function per subcommand, each just formatting
//! whatever `AeoClient` hands back.

use crate::client::AeoClient;
use crate::output::{colored_grade, colored_score, create_table, print_error, print_info, print_json, print_success};
use anyhow::Result;
use serde_json::Value;

pub async fn page_audit(client: &AeoClient, url: &str, json: bool) -> Result<()> {
    print_info(&format!("auditing {url}"));
    let response = client.audit_page(url).await?;
    let result = &response["result"];

    if json {
        print_json(&response);
        return Ok(());
    }

    render_page_audit(result);
    Ok(())
}

pub async fn domain_audit(client: &AeoClient, domain: &str, max_pages: Option<usize>, watch: bool, json: bool) -> Result<()> {
    let submission = client.submit_domain_audit(domain, max_pages).await?;
    let job_id = submission["job_id"].as_str().unwrap_or_default().to_string();

    if json {
        print_json(&submission);
    } else {
        print_success(&format!("domain audit queued: job {job_id}"));
    }

    if !watch {
        return Ok(());
    }

    let mut last_percentage = -1.0;
    client
        .stream_domain_progress(&job_id, |data| {
            let Ok(event) = serde_json::from_str::<Value>(data) else {
                return;
            };
            let percentage = event["percentage"].as_f64().unwrap_or(0.0);
            if !json && percentage > last_percentage {
                last_percentage = percentage;
                let message = event["message"].as_str().unwrap_or("");
                print_info(&format!("{percentage:.0}%  {message}"));
            }
            if json {
                print_json(&event);
            }
        })
        .await?;

    let result = client.domain_result(&job_id).await?;
    if json {
        print_json(&result);
        return Ok(());
    }

    match result["status"].as_str() {
        Some("completed") => render_domain_audit(&result["result"]),
        Some("failed") => print_error(result["failure_reason"].as_str().unwrap_or("audit failed")),
        _ => print_info("job is not finished yet; re-run with the result command later"),
    }
    Ok(())
}

pub async fn domain_result(client: &AeoClient, job_id: &str, json: bool) -> Result<()> {
    let result = client.domain_result(job_id).await?;
    if json {
        print_json(&result);
        return Ok(());
    }

    match result["status"].as_str() {
        Some("completed") => render_domain_audit(&result["result"]),
        Some("failed") => print_error(result["failure_reason"].as_str().unwrap_or("audit failed")),
        other => print_info(&format!("job status: {}", other.unwrap_or("unknown"))),
    }
    Ok(())
}

fn render_page_audit(result: &Value) {
    let overall = result["overall_score"].as_f64().unwrap_or(0.0);
    let grade = result["grade"].as_str().unwrap_or("?");
    println!("{}  overall {}  grade {}", result["url"].as_str().unwrap_or(""), colored_score(overall), colored_grade(grade));

    let mut table = create_table(vec!["category", "score", "max", "%"]);
    if let Some(breakdown) = result["breakdown"].as_object() {
        for (category, entry) in breakdown {
            let raw = entry["score"]["raw"].as_f64().unwrap_or(0.0);
            let max = entry["score"]["max"].as_f64().unwrap_or(0.0);
            let percentage = entry["percentage"].as_f64().unwrap_or(0.0);
            table.add_row(vec![category.clone(), format!("{raw:.1}"), format!("{max:.1}"), format!("{percentage:.0}%")]);
        }
    }
    println!("{table}");
}

fn render_domain_audit(result: &Value) {
    let overall = result["overall_score"].as_f64().unwrap_or(0.0);
    let grade = result["grade"].as_str().unwrap_or("?");
    println!(
        "{}  overall {}  grade {}  ({} pages)",
        result["domain"].as_str().unwrap_or(""),
        colored_score(overall),
        colored_grade(grade),
        result["pages_audited"].as_u64().unwrap_or(0),
    );

    if let Some(geo) = result["geo_score"].as_object() {
        let geo_overall = geo["overall"].as_f64().unwrap_or(0.0);
        println!("GEO score: {}", colored_score(geo_overall));
        if let Some(components) = geo["components"].as_array() {
            let mut table = create_table(vec!["component", "score", "max"]);
            for component in components {
                table.add_row(vec![
                    component["name"].as_str().unwrap_or("").to_string(),
                    format!("{:.1}", component["score"].as_f64().unwrap_or(0.0)),
                    format!("{:.1}", component["max"].as_f64().unwrap_or(0.0)),
                ]);
            }
            println!("{table}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_page_audit_handles_missing_breakdown_gracefully() {
        let result = serde_json::json!({ "url": "https://example.com/", "overall_score": 42.0, "grade": "C" });
        render_page_audit(&result);
    }
}
