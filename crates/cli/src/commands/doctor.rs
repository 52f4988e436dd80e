use chaiwala_core::config::{AppConfig, LoadOptions};
use chaiwala_core::{render_catalog, Catalog, CatalogFilter};
use serde::Serialize;

use crate::commands::load_catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> (bool, String) {
    let report = build_report();
    let passed = report.overall_status == CheckStatus::Pass;

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return (passed, output);
    }

    (passed, render_human(&report))
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_catalog(&config) {
                Ok(catalog) => {
                    checks.push(DoctorCheck {
                        name: "catalog_load",
                        status: CheckStatus::Pass,
                        details: catalog_details(&config, &catalog),
                    });
                    checks.push(check_page_binding(&config, &catalog));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "catalog_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("page_binding", "catalog did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("catalog_load", "configuration did not load"));
            checks.push(skipped("page_binding", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn catalog_details(config: &AppConfig, catalog: &Catalog) -> String {
    let source = match &config.catalog.path {
        Some(path) => format!("`{}`", path.display()),
        None => "builtin catalog".to_string(),
    };
    let mut details = format!("{} items loaded from {source}", catalog.len());
    if catalog.is_empty() {
        details.push_str(" (every search will show the no-results indicator)");
    }
    details
}

fn check_page_binding(config: &AppConfig, catalog: &Catalog) -> DoctorCheck {
    let surface = render_catalog(catalog, &config.page);
    match CatalogFilter::attach(&surface, &config.page) {
        Ok(filter) => DoctorCheck {
            name: "page_binding",
            status: CheckStatus::Pass,
            details: format!(
                "bound #{}, #{}, #{} and {} `.{}` cards",
                config.page.search_input_id,
                config.page.grid_id,
                config.page.no_results_id,
                filter.card_count(),
                config.page.item_class
            ),
        },
        Err(error) => {
            DoctorCheck { name: "page_binding", status: CheckStatus::Fail, details: error.to_string() }
        }
    }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
