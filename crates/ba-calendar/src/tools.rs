//! Named-tool dispatch over the calendar and planning operations.
//!
//! A [`Toolkit`] owns the holiday and timezone tables plus configured
//! defaults. Each operation is exposed under a stable snake_case name with a
//! JSON input schema. [`Toolkit::call`] takes camelCase JSON arguments and
//! returns a JSON result object.
//!
//! ## Tools
//!
//! | Name | Operation |
//! |------|-----------|
//! | `calculate_working_days` | [`BusinessCalendar::count_working_days`] |
//! | `add_working_days` | [`BusinessCalendar::add_working_days`] |
//! | `subtract_working_days` | [`BusinessCalendar::subtract_working_days`] |
//! | `calculate_sprint_dates` | [`schedule_sprints`] |
//! | `calculate_release_date` | [`project_release`] |
//! | `calculate_fiscal_quarter` | [`resolve_fiscal_period`] |
//! | `convert_timezone` | [`TimezoneTable::convert`] |
//! | `find_meeting_time` | [`find_meeting_time`] |
//! | `calculate_velocity` | [`velocity_report`] |
//! | `convert_points_to_hours` | [`points_to_hours`] |
//! | `convert_estimation` | [`convert_estimation`] |
//! | `generate_requirement_ids` | [`requirement_ids`] |
//! | `calculate_moscow_priority` | [`summarize_priorities`] |
//! | `plan_moscow_capacity` | [`plan_capacity`] |
//! | `validate_moscow_dependencies` | [`validate_dependencies`] |
//! | `text_utilities` | [`text::apply`] |
//! | `format_user_story` | [`format_user_story`] |

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::agile::{
    convert_estimation, points_to_hours, requirement_ids, velocity_report, CapacityAdjustments,
    EstimationSystem,
};
use crate::calendar::{parse_date, BusinessCalendar};
use crate::config::EngineConfig;
use crate::error::{CalendarError, Result};
use crate::fiscal::resolve_fiscal_period;
use crate::meeting::{find_meeting_time, MeetingSearch, Participant};
use crate::moscow::{
    check_points, plan_capacity, summarize_priorities, validate_dependencies, Requirement,
};
use crate::release::project_release;
use crate::sprint::schedule_sprints;
use crate::text::{self, format_user_story, TextOperation, TextOptions, UserStory};
use crate::timezone::{TimezoneTable, WallClock};

const DEFAULT_MEETING_DURATION_HOURS: f64 = 1.0;
const DEFAULT_ID_PADDING: usize = 3;

/// Values used when a tool call omits an optional argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub fiscal_year_start_month: u32,
    pub sprint_length_weeks: u32,
    pub point_to_hour_ratio: f64,
    pub overhead_factor: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        let cfg = EngineConfig::default();
        Self {
            fiscal_year_start_month: cfg.fiscal_year_start_month,
            sprint_length_weeks: cfg.default_sprint_length_weeks,
            point_to_hour_ratio: cfg.point_to_hour_ratio,
            overhead_factor: cfg.overhead_factor,
        }
    }
}

/// Name, description and JSON input schema for one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The engine's tables and defaults behind a name-based call interface.
///
/// Cloning is cheap; the tables are shared.
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    calendar: BusinessCalendar,
    timezones: Arc<TimezoneTable>,
    defaults: Defaults,
}

impl Toolkit {
    pub fn new(calendar: BusinessCalendar, timezones: TimezoneTable, defaults: Defaults) -> Self {
        Self {
            calendar,
            timezones: Arc::new(timezones),
            defaults,
        }
    }

    /// Build a toolkit from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if the configuration is out of range
    /// or lists a malformed holiday.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let calendar = BusinessCalendar::new(config.holiday_set()?);
        let defaults = Defaults {
            fiscal_year_start_month: config.fiscal_year_start_month,
            sprint_length_weeks: config.default_sprint_length_weeks,
            point_to_hour_ratio: config.point_to_hour_ratio,
            overhead_factor: config.overhead_factor,
        };
        debug!(
            holidays = calendar.holidays().len(),
            timezones = config.timezones.len(),
            "toolkit configured"
        );
        Ok(Self::new(calendar, config.timezone_table(), defaults))
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    pub fn timezones(&self) -> &TimezoneTable {
        &self.timezones
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Every tool this toolkit answers to, in a stable order.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        descriptors()
    }

    /// Run the tool called `name` with JSON `arguments`.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::Unsupported`] for an unknown tool name
    /// - [`CalendarError::InvalidArgument`] for missing or mistyped arguments
    /// - [`CalendarError::InvalidDate`] / [`CalendarError::InvalidTime`] for
    ///   malformed date or time strings
    /// - any error the underlying operation reports
    pub fn call(&self, name: &str, arguments: Value) -> Result<Value> {
        debug!(tool = name, "dispatching tool call");
        // Tools without required arguments accept a missing body.
        let arguments = if arguments.is_null() {
            json!({})
        } else {
            arguments
        };

        match name {
            "calculate_working_days" => self.working_days(arguments),
            "add_working_days" => self.add_working_days(arguments),
            "subtract_working_days" => self.subtract_working_days(arguments),
            "calculate_sprint_dates" => self.sprint_dates(arguments),
            "calculate_release_date" => self.release_date(arguments),
            "calculate_fiscal_quarter" => self.fiscal_quarter(arguments),
            "convert_timezone" => self.convert_timezone(arguments),
            "find_meeting_time" => self.meeting_time(arguments),
            "calculate_velocity" => self.velocity(arguments),
            "convert_points_to_hours" => self.points_to_hours(arguments),
            "convert_estimation" => self.estimation(arguments),
            "generate_requirement_ids" => self.requirement_ids(arguments),
            "calculate_moscow_priority" => self.moscow_priority(arguments),
            "plan_moscow_capacity" => self.moscow_capacity(arguments),
            "validate_moscow_dependencies" => self.moscow_dependencies(arguments),
            "text_utilities" => self.text_utilities(arguments),
            "format_user_story" => self.user_story(arguments),
            other => Err(CalendarError::Unsupported(format!("unknown tool '{other}'"))),
        }
    }

    // ── Calendar ────────────────────────────────────────────────────────────

    fn working_days(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            start_date: String,
            end_date: String,
        }
        let args: Args = parse_args("calculate_working_days", arguments)?;
        let start = parse_date(&args.start_date)?;
        let end = parse_date(&args.end_date)?;
        Ok(json!({
            "startDate": start,
            "endDate": end,
            "workingDays": self.calendar.count_working_days(start, end),
        }))
    }

    fn add_working_days(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            start_date: String,
            days_to_add: u32,
        }
        let args: Args = parse_args("add_working_days", arguments)?;
        let start = parse_date(&args.start_date)?;
        let result = self.calendar.add_working_days(start, args.days_to_add)?;
        Ok(json!({
            "startDate": start,
            "daysAdded": args.days_to_add,
            "resultDate": result,
        }))
    }

    fn subtract_working_days(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            start_date: String,
            days_to_subtract: u32,
        }
        let args: Args = parse_args("subtract_working_days", arguments)?;
        let start = parse_date(&args.start_date)?;
        let result = self
            .calendar
            .subtract_working_days(start, args.days_to_subtract)?;
        Ok(json!({
            "startDate": start,
            "daysSubtracted": args.days_to_subtract,
            "resultDate": result,
        }))
    }

    fn sprint_dates(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            sprint_start: String,
            sprint_length: Option<u32>,
            number_of_sprints: u32,
        }
        let args: Args = parse_args("calculate_sprint_dates", arguments)?;
        let start = parse_date(&args.sprint_start)?;
        let weeks = args
            .sprint_length
            .unwrap_or(self.defaults.sprint_length_weeks);
        let sprints = schedule_sprints(&self.calendar, start, weeks, args.number_of_sprints)?;
        Ok(json!({
            "sprintLength": format!("{weeks} weeks"),
            "sprints": sprints,
        }))
    }

    fn release_date(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            start_date: String,
            story_points_remaining: f64,
            team_velocity: f64,
            sprint_length: Option<u32>,
        }
        let args: Args = parse_args("calculate_release_date", arguments)?;
        let start = parse_date(&args.start_date)?;
        let projection = project_release(
            &self.calendar,
            start,
            args.story_points_remaining,
            args.team_velocity,
            args.sprint_length
                .unwrap_or(self.defaults.sprint_length_weeks),
        )?;
        to_value(&projection)
    }

    fn fiscal_quarter(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            date: String,
            fiscal_year_start: Option<u32>,
        }
        let args: Args = parse_args("calculate_fiscal_quarter", arguments)?;
        let date = parse_date(&args.date)?;
        let month = args
            .fiscal_year_start
            .unwrap_or(self.defaults.fiscal_year_start_month);
        to_value(&resolve_fiscal_period(date, month)?)
    }

    // ── Timezones ───────────────────────────────────────────────────────────

    fn convert_timezone(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            time: String,
            from_timezone: String,
            to_timezone: String,
        }
        let args: Args = parse_args("convert_timezone", arguments)?;
        let time: WallClock = args.time.parse()?;
        let converted = self
            .timezones
            .convert(time, &args.from_timezone, &args.to_timezone);
        Ok(json!({
            "originalTime": time,
            "originalTimezone": args.from_timezone,
            "convertedTime": converted.time,
            "convertedTimezone": args.to_timezone,
            "dayOffset": converted.day_offset,
            "note": converted.day_note(),
        }))
    }

    fn meeting_time(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            participants: Vec<Participant>,
            duration: Option<f64>,
            base_timezone: Option<String>,
            candidate_hours: Option<[u32; 2]>,
        }
        let args: Args = parse_args("find_meeting_time", arguments)?;
        let search = match (args.base_timezone, args.candidate_hours) {
            (None, None) => MeetingSearch::default(),
            (base, hours) => {
                let default = MeetingSearch::default();
                let range = match hours {
                    Some([from, to]) => from..=to,
                    None => default.candidate_hours(),
                };
                let base = base.unwrap_or_else(|| default.base_timezone().to_string());
                MeetingSearch::new(base, range)?
            }
        };
        let suggestions = find_meeting_time(&self.timezones, &args.participants, &search);
        Ok(json!({
            "duration": args.duration.unwrap_or(DEFAULT_MEETING_DURATION_HOURS),
            "totalSuggestions": suggestions.len(),
            "suitableTimes": suggestions,
        }))
    }

    // ── Agile estimation ────────────────────────────────────────────────────

    fn velocity(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            completed_points: Vec<f64>,
            #[serde(default)]
            capacity_adjustments: CapacityAdjustments,
        }
        let args: Args = parse_args("calculate_velocity", arguments)?;
        to_value(&velocity_report(
            &args.completed_points,
            &args.capacity_adjustments,
        )?)
    }

    fn points_to_hours(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            story_points: f64,
            point_to_hour_ratio: Option<f64>,
            overhead_factor: Option<f64>,
        }
        let args: Args = parse_args("convert_points_to_hours", arguments)?;
        to_value(&points_to_hours(
            args.story_points,
            args.point_to_hour_ratio
                .unwrap_or(self.defaults.point_to_hour_ratio),
            args.overhead_factor
                .unwrap_or(self.defaults.overhead_factor),
        )?)
    }

    fn estimation(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            value: Value,
            from_system: String,
            to_system: String,
        }
        let args: Args = parse_args("convert_estimation", arguments)?;
        let value = match &args.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(CalendarError::InvalidArgument(format!(
                    "convert_estimation: value must be a string or number, got {other}"
                )))
            }
        };
        let from: EstimationSystem = args.from_system.parse()?;
        let to: EstimationSystem = args.to_system.parse()?;
        to_value(&convert_estimation(&value, from, to)?)
    }

    fn requirement_ids(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            prefix: String,
            start_number: u64,
            count: u32,
            padding: Option<usize>,
        }
        let args: Args = parse_args("generate_requirement_ids", arguments)?;
        let ids = requirement_ids(
            &args.prefix,
            args.start_number,
            args.count,
            args.padding.unwrap_or(DEFAULT_ID_PADDING),
        )?;
        Ok(json!({
            "prefix": args.prefix,
            "startNumber": args.start_number,
            "count": args.count,
            "ids": ids,
        }))
    }

    // ── MoSCoW ──────────────────────────────────────────────────────────────

    fn moscow_priority(&self, arguments: Value) -> Result<Value> {
        let args: RequirementsArgs = parse_args("calculate_moscow_priority", arguments)?;
        to_value(&summarize_priorities(&args.requirements)?)
    }

    fn moscow_capacity(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            requirements: Vec<Requirement>,
            available_capacity: f64,
        }
        let args: Args = parse_args("plan_moscow_capacity", arguments)?;
        to_value(&plan_capacity(&args.requirements, args.available_capacity)?)
    }

    fn moscow_dependencies(&self, arguments: Value) -> Result<Value> {
        let args: RequirementsArgs = parse_args("validate_moscow_dependencies", arguments)?;
        check_points(&args.requirements)?;
        to_value(&validate_dependencies(&args.requirements))
    }

    // ── Text ────────────────────────────────────────────────────────────────

    fn text_utilities(&self, arguments: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct Args {
            operation: String,
            text: String,
            #[serde(default)]
            options: TextOptions,
        }
        let args: Args = parse_args("text_utilities", arguments)?;
        let operation: TextOperation = args.operation.parse()?;
        Ok(json!({
            "operation": operation,
            "result": text::apply(operation, &args.text, args.options),
        }))
    }

    fn user_story(&self, arguments: Value) -> Result<Value> {
        let story: UserStory = parse_args("format_user_story", arguments)?;
        Ok(json!({ "story": format_user_story(&story) }))
    }
}

#[derive(Deserialize)]
struct RequirementsArgs {
    requirements: Vec<Requirement>,
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| CalendarError::InvalidArgument(format!("{tool}: {e}")))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| CalendarError::InvalidArgument(format!("result not representable: {e}")))
}

// ── Descriptors ─────────────────────────────────────────────────────────────

fn date_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn requirement_list(description: &str, extra: Value) -> Value {
    let mut properties = json!({
        "id": { "type": "string" },
        "priority": { "type": "string", "enum": ["Must", "Should", "Could", "Won't"] },
        "points": { "type": "number" },
    });
    if let (Some(props), Value::Object(more)) = (properties.as_object_mut(), extra) {
        props.extend(more);
    }
    json!({
        "type": "array",
        "description": description,
        "items": { "type": "object", "properties": properties, "required": ["id", "priority"] },
    })
}

fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "calculate_working_days",
            description: "Count working days between two dates inclusive, excluding weekends and holidays",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "startDate": date_prop("Start date in YYYY-MM-DD format"),
                    "endDate": date_prop("End date in YYYY-MM-DD format"),
                },
                "required": ["startDate", "endDate"],
            }),
        },
        ToolDescriptor {
            name: "add_working_days",
            description: "Add working days to a date, skipping weekends and holidays",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "startDate": date_prop("Start date in YYYY-MM-DD format"),
                    "daysToAdd": { "type": "integer", "minimum": 0, "description": "Working days to add" },
                },
                "required": ["startDate", "daysToAdd"],
            }),
        },
        ToolDescriptor {
            name: "subtract_working_days",
            description: "Subtract working days from a date, skipping weekends and holidays",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "startDate": date_prop("Start date in YYYY-MM-DD format"),
                    "daysToSubtract": { "type": "integer", "minimum": 0, "description": "Working days to subtract" },
                },
                "required": ["startDate", "daysToSubtract"],
            }),
        },
        ToolDescriptor {
            name: "calculate_sprint_dates",
            description: "Lay out consecutive sprints with start, end and working days for each",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "sprintStart": date_prop("First sprint start date in YYYY-MM-DD format"),
                    "sprintLength": { "type": "integer", "minimum": 1, "description": "Sprint length in weeks (defaults to the configured length)" },
                    "numberOfSprints": { "type": "integer", "minimum": 1, "description": "How many sprints to lay out" },
                },
                "required": ["sprintStart", "numberOfSprints"],
            }),
        },
        ToolDescriptor {
            name: "calculate_release_date",
            description: "Project a release date from remaining story points, team velocity and sprint length",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "startDate": date_prop("Start date in YYYY-MM-DD format"),
                    "storyPointsRemaining": { "type": "number", "minimum": 0 },
                    "teamVelocity": { "type": "number", "exclusiveMinimum": 0, "description": "Points completed per sprint" },
                    "sprintLength": { "type": "integer", "minimum": 1, "description": "Sprint length in weeks (defaults to the configured length)" },
                },
                "required": ["startDate", "storyPointsRemaining", "teamVelocity"],
            }),
        },
        ToolDescriptor {
            name: "calculate_fiscal_quarter",
            description: "Resolve the fiscal year and quarter containing a date",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "date": date_prop("Date in YYYY-MM-DD format"),
                    "fiscalYearStart": { "type": "integer", "minimum": 1, "maximum": 12, "description": "Fiscal year start month (defaults to the configured month)" },
                },
                "required": ["date"],
            }),
        },
        ToolDescriptor {
            name: "convert_timezone",
            description: "Convert a wall-clock time between timezone abbreviations",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "time": { "type": "string", "description": "Time in HH:MM format (24-hour)" },
                    "fromTimezone": { "type": "string", "description": "Source timezone, e.g. GMT, EST, IST" },
                    "toTimezone": { "type": "string", "description": "Target timezone, e.g. PST, AEST, CET" },
                },
                "required": ["time", "fromTimezone", "toTimezone"],
            }),
        },
        ToolDescriptor {
            name: "find_meeting_time",
            description: "Find whole-hour slots that fall inside every participant's local availability",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "participants": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "timezone": { "type": "string" },
                                "availableHours": { "type": "array", "items": { "type": "integer" }, "minItems": 2, "maxItems": 2 },
                            },
                            "required": ["name", "timezone", "availableHours"],
                        },
                    },
                    "duration": { "type": "number", "description": "Meeting length in hours (informational)" },
                    "baseTimezone": { "type": "string", "description": "Timezone the candidate hours are given in (default GMT)" },
                    "candidateHours": { "type": "array", "items": { "type": "integer" }, "minItems": 2, "maxItems": 2, "description": "First and last candidate hour (default [8, 18])" },
                },
                "required": ["participants"],
            }),
        },
        ToolDescriptor {
            name: "calculate_velocity",
            description: "Average historical velocity and adjust it for days off and team changes",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "completedPoints": { "type": "array", "items": { "type": "number" }, "minItems": 1 },
                    "capacityAdjustments": {
                        "type": "object",
                        "properties": {
                            "daysOff": { "type": "number" },
                            "sprintLength": { "type": "integer", "minimum": 1 },
                            "adjustmentFactor": { "type": "number" },
                        },
                    },
                },
                "required": ["completedPoints"],
            }),
        },
        ToolDescriptor {
            name: "convert_points_to_hours",
            description: "Convert story points to hours with a per-point ratio and overhead",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "storyPoints": { "type": "number", "minimum": 0 },
                    "pointToHourRatio": { "type": "number", "minimum": 0 },
                    "overheadFactor": { "type": "number", "minimum": 0, "description": "Overhead as a fraction, e.g. 0.2" },
                },
                "required": ["storyPoints"],
            }),
        },
        ToolDescriptor {
            name: "convert_estimation",
            description: "Convert between t-shirt sizes, story points and hours",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "value": { "type": ["string", "number"], "description": "Value to convert, e.g. \"L\" or 5" },
                    "fromSystem": { "type": "string", "enum": ["tshirt", "points", "hours"] },
                    "toSystem": { "type": "string", "enum": ["tshirt", "points", "hours"] },
                },
                "required": ["value", "fromSystem", "toSystem"],
            }),
        },
        ToolDescriptor {
            name: "generate_requirement_ids",
            description: "Generate sequential zero-padded requirement IDs such as REQ-001",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prefix": { "type": "string" },
                    "startNumber": { "type": "integer", "minimum": 0 },
                    "count": { "type": "integer", "minimum": 0 },
                    "padding": { "type": "integer", "minimum": 0, "description": "Digits of zero padding (default 3)" },
                },
                "required": ["prefix", "startNumber", "count"],
            }),
        },
        ToolDescriptor {
            name: "calculate_moscow_priority",
            description: "Break requirements down by MoSCoW priority with counts, points and percentages",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirements": requirement_list("Requirements with id, priority and points", json!({})),
                },
                "required": ["requirements"],
            }),
        },
        ToolDescriptor {
            name: "plan_moscow_capacity",
            description: "Commit requirements in MoSCoW order until the available capacity is used",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirements": requirement_list("Requirements with id, priority and points", json!({})),
                    "availableCapacity": { "type": "number", "minimum": 0 },
                },
                "required": ["requirements", "availableCapacity"],
            }),
        },
        ToolDescriptor {
            name: "validate_moscow_dependencies",
            description: "Find missing dependencies and priority inversions between requirements",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "requirements": requirement_list(
                        "Requirements with id, priority and dependsOn",
                        json!({ "dependsOn": { "type": "array", "items": { "type": "string" } } }),
                    ),
                },
                "required": ["requirements"],
            }),
        },
        ToolDescriptor {
            name: "text_utilities",
            description: "Apply a text operation: word_count, char_count, remove_duplicates, sort_lines, extract_emails, extract_urls, to_uppercase, to_lowercase, to_title_case, trim_whitespace, add_line_numbers",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "operation": {
                        "type": "string",
                        "enum": TextOperation::ALL.iter().map(|op| op.name()).collect::<Vec<_>>(),
                    },
                    "text": { "type": "string", "description": "Text to process" },
                    "options": {
                        "type": "object",
                        "description": "Operation options, e.g. {\"reverse\": true} for sort_lines",
                        "properties": { "reverse": { "type": "boolean" } },
                    },
                },
                "required": ["operation", "text"],
            }),
        },
        ToolDescriptor {
            name: "format_user_story",
            description: "Format a user story with requirement, placement, behavior and acceptance criteria sections",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "role": { "type": "string", "description": "User role, e.g. \"Care Home Manager\"" },
                    "feature": { "type": "string" },
                    "businessValue": { "type": "string" },
                    "placement": { "type": "string", "description": "Where on the page, e.g. \"Header\"" },
                    "visualType": { "type": "string", "description": "e.g. button, dropdown, modal" },
                    "behavior": { "type": "string" },
                    "extraInfo": { "type": "string", "description": "Technical details (optional)" },
                    "acceptanceCriteria": {
                        "description": "Free text, or a list of Given/When/Then scenarios",
                        "oneOf": [
                            { "type": "string" },
                            {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "precondition": { "type": "string" },
                                        "action": { "type": "string" },
                                        "outcome": { "type": "string" },
                                    },
                                    "required": ["precondition", "action", "outcome"],
                                },
                            },
                        ],
                    },
                },
                "required": ["role", "feature", "businessValue", "placement", "visualType", "behavior", "acceptanceCriteria"],
            }),
        },
    ]
}
