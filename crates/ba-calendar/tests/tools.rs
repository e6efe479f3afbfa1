//! End-to-end tool calls through [`Toolkit`], one scenario per workflow.

use ba_calendar::{EngineConfig, Toolkit};
use serde_json::{json, Value};

fn call(name: &str, args: Value) -> Value {
    Toolkit::default().call(name, args).unwrap()
}

#[test]
fn test_christmas_week_working_days() {
    let out = call(
        "calculate_working_days",
        json!({ "startDate": "2024-12-23", "endDate": "2024-12-27" }),
    );
    // Mon 23, Tue 24, Fri 27; the 25th and 26th are bank holidays.
    assert_eq!(out["workingDays"], 3);
}

#[test]
fn test_add_and_subtract_across_easter() {
    let out = call(
        "add_working_days",
        json!({ "startDate": "2025-04-17", "daysToAdd": 1 }),
    );
    // Good Friday 18th and Easter Monday 21st are skipped.
    assert_eq!(out["resultDate"], "2025-04-22");
    assert_eq!(out["daysAdded"], 1);

    let out = call(
        "subtract_working_days",
        json!({ "startDate": "2025-04-22", "daysToSubtract": 1 }),
    );
    assert_eq!(out["resultDate"], "2025-04-17");
    assert_eq!(out["daysSubtracted"], 1);
}

#[test]
fn test_sprint_plan() {
    let out = call(
        "calculate_sprint_dates",
        json!({ "sprintStart": "2024-12-16", "sprintLength": 2, "numberOfSprints": 2 }),
    );
    assert_eq!(out["sprintLength"], "2 weeks");
    let sprints = out["sprints"].as_array().unwrap();
    assert_eq!(sprints.len(), 2);
    assert_eq!(sprints[0]["sprintNumber"], 1);
    assert_eq!(sprints[0]["startDate"], "2024-12-16");
    assert_eq!(sprints[0]["endDate"], "2024-12-29");
    // Ten weekdays less Christmas Day and Boxing Day.
    assert_eq!(sprints[0]["workingDays"], 8);
    assert_eq!(sprints[1]["startDate"], "2024-12-30");
}

#[test]
fn test_release_projection() {
    let out = call(
        "calculate_release_date",
        json!({
            "startDate": "2025-01-06",
            "storyPointsRemaining": 100,
            "teamVelocity": 25,
            "sprintLength": 2
        }),
    );
    assert_eq!(out["estimatedReleaseDate"], "2025-03-03");
    assert_eq!(out["sprintsNeeded"], 4);
    assert_eq!(out["weeksNeeded"], 8);
}

#[test]
fn test_release_rejects_zero_velocity() {
    let err = Toolkit::default()
        .call(
            "calculate_release_date",
            json!({ "startDate": "2025-01-06", "storyPointsRemaining": 10, "teamVelocity": 0 }),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_argument");
}

#[test]
fn test_fiscal_quarter_default_april() {
    let out = call("calculate_fiscal_quarter", json!({ "date": "2024-04-01" }));
    assert_eq!(out["fiscalYear"], "FY2024/25");
    assert_eq!(out["quarter"], "Q1");
    assert_eq!(out["quarterNumber"], 1);
    assert_eq!(out["quarterEnd"], "2024-06-30");
}

#[test]
fn test_meeting_between_london_and_new_york() {
    let out = call(
        "find_meeting_time",
        json!({
            "participants": [
                { "name": "Ada", "timezone": "GMT", "availableHours": [9, 17] },
                { "name": "Grace", "timezone": "EST", "availableHours": [9, 17] }
            ],
            "duration": 1
        }),
    );
    assert_eq!(out["totalSuggestions"], 4);
    let times: Vec<&str> = out["suitableTimes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["baseTime"].as_str())
        .collect();
    assert_eq!(times, vec!["14:00", "15:00", "16:00", "17:00"]);
}

#[test]
fn test_velocity_with_days_off() {
    let out = call(
        "calculate_velocity",
        json!({
            "completedPoints": [30, 30, 30],
            "capacityAdjustments": { "daysOff": 1, "sprintLength": 2 }
        }),
    );
    assert_eq!(out["averageVelocity"], 30.0);
    // One day off in a ten-day sprint removes a tenth.
    assert_eq!(out["adjustedVelocity"], 27.0);
}

#[test]
fn test_estimation_not_found() {
    let err = Toolkit::default()
        .call(
            "convert_estimation",
            json!({ "value": "XXXL", "fromSystem": "tshirt", "toSystem": "points" }),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_requirement_ids() {
    let out = call(
        "generate_requirement_ids",
        json!({ "prefix": "US", "startNumber": 9, "count": 3 }),
    );
    assert_eq!(out["ids"], json!(["US-009", "US-010", "US-011"]));
}

#[test]
fn test_moscow_workflow() {
    let requirements = json!([
        { "id": "R1", "priority": "Must", "points": 8 },
        { "id": "R2", "priority": "Should", "points": 5, "dependsOn": ["R1"] },
        { "id": "R3", "priority": "Could", "points": 3 },
        { "id": "R4", "priority": "Won't", "points": 4 }
    ]);

    let summary = call(
        "calculate_moscow_priority",
        json!({ "requirements": requirements }),
    );
    assert_eq!(summary["totalRequirements"], 4);
    assert_eq!(summary["totalPoints"], 20.0);
    assert_eq!(summary["percentages"]["Must"], 40);

    let plan = call(
        "plan_moscow_capacity",
        json!({ "requirements": requirements, "availableCapacity": 14 }),
    );
    assert_eq!(plan["committed"]["count"], 2);
    assert_eq!(plan["deferred"]["count"], 2);
    assert_eq!(plan["remainingCapacity"], 1.0);

    let deps = call(
        "validate_moscow_dependencies",
        json!({ "requirements": requirements }),
    );
    assert_eq!(deps["valid"], true);
}

#[test]
fn test_requirement_list_cleanup() {
    let raw = "  REQ-002 \nREQ-001\nREQ-002\n contact: owner@example.org ";
    let trimmed = call("text_utilities", json!({ "operation": "trim_whitespace", "text": raw }));
    let deduped = call(
        "text_utilities",
        json!({ "operation": "remove_duplicates", "text": trimmed["result"] }),
    );
    assert_eq!(deduped["result"], "REQ-002\nREQ-001\ncontact: owner@example.org");

    let emails = call(
        "text_utilities",
        json!({ "operation": "extract_emails", "text": deduped["result"] }),
    );
    assert_eq!(emails["result"], "owner@example.org");

    let chars = call(
        "text_utilities",
        json!({ "operation": "char_count", "text": "REQ-001" }),
    );
    assert_eq!(chars["result"], 7);
}

#[test]
fn test_user_story_with_free_text_criteria() {
    let out = call(
        "format_user_story",
        json!({
            "role": "Care Home Manager",
            "feature": "a shift calendar",
            "businessValue": "gaps are visible a week ahead",
            "placement": "the dashboard sidebar",
            "visualType": "a calendar widget",
            "behavior": "Unfilled shifts are highlighted.",
            "extraInfo": "Reads from the rota service",
            "acceptanceCriteria": "Given an unfilled shift, when I open the dashboard, then it is highlighted"
        }),
    );
    let story = out["story"].as_str().unwrap();
    assert!(story.contains("**Extra Information**\nReads from the rota service\n\n"));
    assert!(story.ends_with("then it is highlighted\n"));
}

#[test]
fn test_configured_holidays_replace_builtin_table() {
    let cfg = EngineConfig::from_toml_str(r#"holidays = ["2024-12-24"]"#).unwrap();
    let kit = Toolkit::from_config(&cfg).unwrap();
    let out = kit
        .call(
            "calculate_working_days",
            json!({ "startDate": "2024-12-23", "endDate": "2024-12-27" }),
        )
        .unwrap();
    // Only the 24th is closed now.
    assert_eq!(out["workingDays"], 4);
}

#[test]
fn test_configured_timezone() {
    let cfg = EngineConfig::from_toml_str("[timezones]\nNZST = 12.0\n").unwrap();
    let kit = Toolkit::from_config(&cfg).unwrap();
    let out = kit
        .call(
            "convert_timezone",
            json!({ "time": "09:00", "fromTimezone": "GMT", "toTimezone": "NZST" }),
        )
        .unwrap();
    assert_eq!(out["convertedTime"], "21:00");
    assert_eq!(out["note"], "Same day");
}
