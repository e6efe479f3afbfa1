//! MoSCoW prioritisation reports: breakdown, capacity planning, and
//! dependency validation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// MoSCoW priority, ordered most important first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Must,
    Should,
    Could,
    #[serde(rename = "Won't", alias = "Wont")]
    Wont,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Must,
        Priority::Should,
        Priority::Could,
        Priority::Wont,
    ];

    /// Won't-have items are out of the delivery scope.
    pub fn is_active(self) -> bool {
        self != Priority::Wont
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Must => "Must",
            Priority::Should => "Should",
            Priority::Could => "Could",
            Priority::Wont => "Won't",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub priority: Priority,
    #[serde(default)]
    pub points: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// Reject requirements whose points are negative or not finite.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] naming the first offending
/// requirement.
pub fn check_points(requirements: &[Requirement]) -> Result<(), CalendarError> {
    match requirements
        .iter()
        .find(|r| !r.points.is_finite() || r.points < 0.0)
    {
        Some(bad) => Err(CalendarError::InvalidArgument(format!(
            "requirement {} has {} points; points must be a non-negative number",
            bad.id, bad.points
        ))),
        None => Ok(()),
    }
}

// ── Priority breakdown ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityBucket {
    pub count: usize,
    pub points: f64,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByPriority<T> {
    pub must: T,
    pub should: T,
    pub could: T,
    pub wont: T,
}

impl<T> ByPriority<T> {
    pub fn get(&self, priority: Priority) -> &T {
        match priority {
            Priority::Must => &self.must,
            Priority::Should => &self.should,
            Priority::Could => &self.could,
            Priority::Wont => &self.wont,
        }
    }

    fn get_mut(&mut self, priority: Priority) -> &mut T {
        match priority {
            Priority::Must => &mut self.must,
            Priority::Should => &mut self.should,
            Priority::Could => &mut self.could,
            Priority::Wont => &mut self.wont,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySummary {
    pub summary: ByPriority<PriorityBucket>,
    pub total_requirements: usize,
    pub total_points: f64,
    /// Share of total points per priority, rounded to whole percent.
    pub percentages: ByPriority<u32>,
}

/// Count and total the requirements in each priority bucket.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if any requirement carries
/// negative or non-finite points.
pub fn summarize_priorities(requirements: &[Requirement]) -> Result<PrioritySummary, CalendarError> {
    check_points(requirements)?;
    let mut summary: ByPriority<PriorityBucket> = ByPriority::default();
    for req in requirements {
        let bucket = summary.get_mut(req.priority);
        bucket.count += 1;
        bucket.points += req.points;
        bucket.items.push(req.id.clone());
    }

    let total_points: f64 = Priority::ALL.iter().map(|p| summary.get(*p).points).sum();
    let mut percentages: ByPriority<u32> = ByPriority::default();
    if total_points > 0.0 {
        for p in Priority::ALL {
            *percentages.get_mut(p) = (summary.get(p).points / total_points * 100.0).round() as u32;
        }
    }

    Ok(PrioritySummary {
        summary,
        total_requirements: requirements.len(),
        total_points,
        percentages,
    })
}

// ── Capacity planning ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentGroup {
    pub items: Vec<Requirement>,
    pub count: usize,
    pub total_points: f64,
}

impl CommitmentGroup {
    fn new(items: Vec<Requirement>) -> Self {
        Self {
            count: items.len(),
            total_points: items.iter().map(|r| r.points).sum(),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityPlan {
    pub available_capacity: f64,
    pub committed: CommitmentGroup,
    pub deferred: CommitmentGroup,
    pub remaining_capacity: f64,
}

/// Fill `capacity` with requirements in priority order.
///
/// Requirements are taken Must first, keeping input order within a priority.
/// Anything that does not fit the remaining capacity is deferred, but smaller
/// items further down the list may still be committed after it.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `capacity` or any
/// requirement's points are negative or non-finite.
pub fn plan_capacity(
    requirements: &[Requirement],
    capacity: f64,
) -> Result<CapacityPlan, CalendarError> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(CalendarError::InvalidArgument(format!(
            "available capacity must be a non-negative number, got {capacity}"
        )));
    }
    check_points(requirements)?;

    let mut sorted = requirements.to_vec();
    sorted.sort_by_key(|r| r.priority);

    let mut remaining = capacity;
    let (mut committed, mut deferred) = (Vec::new(), Vec::new());
    for req in sorted {
        if remaining >= req.points {
            remaining -= req.points;
            committed.push(req);
        } else {
            deferred.push(req);
        }
    }

    Ok(CapacityPlan {
        available_capacity: capacity,
        committed: CommitmentGroup::new(committed),
        deferred: CommitmentGroup::new(deferred),
        remaining_capacity: remaining,
    })
}

// ── Dependency validation ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyIssue {
    pub requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_priority: Option<Priority>,
    pub issue: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub valid: bool,
    pub issues_found: usize,
    pub issues: Vec<DependencyIssue>,
    pub summary: String,
}

/// Check that no requirement depends on something missing, less important,
/// or out of scope.
pub fn validate_dependencies(requirements: &[Requirement]) -> DependencyReport {
    let by_id: HashMap<&str, &Requirement> =
        requirements.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut issues = Vec::new();

    for req in requirements {
        for dep_id in &req.depends_on {
            let Some(dep) = by_id.get(dep_id.as_str()) else {
                issues.push(DependencyIssue {
                    requirement: req.id.clone(),
                    priority: None,
                    depends_on: None,
                    dependency_priority: None,
                    issue: format!("Depends on {dep_id} which doesn't exist"),
                    severity: Severity::Critical,
                });
                continue;
            };

            // Ord puts Must first, so "more important" compares as less.
            if req.priority < dep.priority {
                issues.push(DependencyIssue {
                    requirement: req.id.clone(),
                    priority: Some(req.priority),
                    depends_on: Some(dep_id.clone()),
                    dependency_priority: Some(dep.priority),
                    issue: format!(
                        "{} priority depends on lower priority {}",
                        req.priority, dep.priority
                    ),
                    severity: Severity::High,
                });
            }

            if !dep.priority.is_active() && req.priority.is_active() {
                issues.push(DependencyIssue {
                    requirement: req.id.clone(),
                    priority: Some(req.priority),
                    depends_on: Some(dep_id.clone()),
                    dependency_priority: None,
                    issue: "Active requirement depends on Won't priority item".to_string(),
                    severity: Severity::Critical,
                });
            }
        }
    }

    let summary = if issues.is_empty() {
        "All dependencies are valid".to_string()
    } else {
        format!("Found {} dependency issue(s)", issues.len())
    };

    DependencyReport {
        valid: issues.is_empty(),
        issues_found: issues.len(),
        issues,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(id: &str, priority: Priority, points: f64) -> Requirement {
        Requirement {
            id: id.to_string(),
            priority,
            points,
            depends_on: Vec::new(),
        }
    }

    fn with_deps(mut r: Requirement, deps: &[&str]) -> Requirement {
        r.depends_on = deps.iter().map(|d| d.to_string()).collect();
        r
    }

    #[test]
    fn test_priority_parses_wont_spellings() {
        let p: Priority = serde_json::from_str("\"Won't\"").unwrap();
        assert_eq!(p, Priority::Wont);
        let p: Priority = serde_json::from_str("\"Wont\"").unwrap();
        assert_eq!(p, Priority::Wont);
        assert!(serde_json::from_str::<Priority>("\"Maybe\"").is_err());
    }

    #[test]
    fn test_summary_buckets_and_percentages() {
        let reqs = [
            req("R1", Priority::Must, 5.0),
            req("R2", Priority::Must, 3.0),
            req("R3", Priority::Should, 8.0),
            req("R4", Priority::Wont, 4.0),
        ];
        let s = summarize_priorities(&reqs).unwrap();
        assert_eq!(s.total_requirements, 4);
        assert_eq!(s.total_points, 20.0);
        assert_eq!(s.summary.must.count, 2);
        assert_eq!(s.summary.must.items, vec!["R1", "R2"]);
        assert_eq!(s.percentages.must, 40);
        assert_eq!(s.percentages.should, 40);
        assert_eq!(s.percentages.could, 0);
        assert_eq!(s.percentages.wont, 20);
    }

    #[test]
    fn test_summary_without_points_has_zero_percentages() {
        let s = summarize_priorities(&[req("R1", Priority::Could, 0.0)]).unwrap();
        assert_eq!(s.percentages.could, 0);
        assert_eq!(s.summary.could.count, 1);
    }

    #[test]
    fn test_summary_serializes_bucket_names() {
        let s = summarize_priorities(&[req("R1", Priority::Wont, 1.0)]).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["summary"]["Wont"]["count"], 1);
        assert_eq!(json["percentages"]["Wont"], 100);
        assert_eq!(json["totalRequirements"], 1);
    }

    #[test]
    fn test_capacity_commits_in_priority_order() {
        let reqs = [
            req("C1", Priority::Could, 3.0),
            req("M1", Priority::Must, 8.0),
            req("S1", Priority::Should, 5.0),
            req("M2", Priority::Must, 2.0),
        ];
        let plan = plan_capacity(&reqs, 13.0).unwrap();
        let ids: Vec<&str> = plan.committed.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["M1", "M2", "C1"]);
        assert_eq!(plan.committed.total_points, 13.0);
        assert_eq!(plan.deferred.count, 1);
        assert_eq!(plan.deferred.items[0].id, "S1");
        assert_eq!(plan.remaining_capacity, 0.0);
    }

    #[test]
    fn test_capacity_zero_point_items_always_fit() {
        let plan = plan_capacity(&[req("X", Priority::Wont, 0.0)], 0.0).unwrap();
        assert_eq!(plan.committed.count, 1);
    }

    #[test]
    fn test_negative_points_rejected() {
        let reqs = [req("M1", Priority::Must, -50.0), req("S1", Priority::Should, 40.0)];
        let err = plan_capacity(&reqs, 10.0).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidArgument(_)));
        assert!(err.to_string().contains("M1"), "got: {err}");

        let reqs = [req("C1", Priority::Could, -5.0), req("M1", Priority::Must, 10.0)];
        let err = summarize_priorities(&reqs).unwrap_err();
        assert!(err.to_string().contains("C1"), "got: {err}");
    }

    #[test]
    fn test_non_finite_points_rejected() {
        assert!(check_points(&[req("A", Priority::Must, f64::NAN)]).is_err());
        assert!(check_points(&[req("A", Priority::Must, f64::INFINITY)]).is_err());
        assert!(check_points(&[req("A", Priority::Must, 0.0)]).is_ok());
    }

    #[test]
    fn test_capacity_must_be_non_negative() {
        let err = plan_capacity(&[], -1.0).unwrap_err();
        assert!(err.to_string().contains("available capacity"), "got: {err}");
        assert!(plan_capacity(&[], f64::NAN).is_err());
    }

    #[test]
    fn test_dependencies_valid() {
        let reqs = [
            req("A", Priority::Must, 1.0),
            with_deps(req("B", Priority::Should, 1.0), &["A"]),
        ];
        let report = validate_dependencies(&reqs);
        assert!(report.valid);
        assert_eq!(report.summary, "All dependencies are valid");
    }

    #[test]
    fn test_missing_dependency_is_critical() {
        let reqs = [with_deps(req("A", Priority::Must, 1.0), &["GHOST"])];
        let report = validate_dependencies(&reqs);
        assert!(!report.valid);
        assert_eq!(report.issues[0].severity, Severity::Critical);
        assert!(report.issues[0].issue.contains("GHOST"));
    }

    #[test]
    fn test_priority_inversion_is_high() {
        let reqs = [
            with_deps(req("A", Priority::Must, 1.0), &["B"]),
            req("B", Priority::Could, 1.0),
        ];
        let report = validate_dependencies(&reqs);
        assert_eq!(report.issues_found, 1);
        assert_eq!(report.issues[0].severity, Severity::High);
        assert_eq!(report.issues[0].issue, "Must priority depends on lower priority Could");
    }

    #[test]
    fn test_depending_on_wont_reports_both_issues() {
        let reqs = [
            with_deps(req("A", Priority::Should, 1.0), &["W"]),
            req("W", Priority::Wont, 1.0),
        ];
        let report = validate_dependencies(&reqs);
        assert_eq!(report.issues_found, 2);
        assert_eq!(report.summary, "Found 2 dependency issue(s)");
        assert_eq!(report.issues[1].severity, Severity::Critical);
    }

    #[test]
    fn test_wont_depending_on_wont_is_fine() {
        let reqs = [
            with_deps(req("A", Priority::Wont, 1.0), &["W"]),
            req("W", Priority::Wont, 1.0),
        ];
        assert!(validate_dependencies(&reqs).valid);
    }
}
